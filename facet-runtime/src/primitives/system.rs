use crate::coerce;
use crate::error::Error;
use crate::expect_args;
use crate::primitives::PrimitiveFn;
use crate::universe::Universe;
use crate::value::Value;

/// Messages answered by `system`.
pub static PRIMITIVES: &[(&str, PrimitiveFn)] = &[("import", self::import)];

fn import(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "system>>#import";

    expect_args!(SIGNATURE, args, [
        Value::Native(_),
        id => id,
    ]);

    let id = coerce::as_string(universe, id)?;
    universe.import(id.as_str())
}
