use crate::coerce;
use crate::error::Error;
use crate::expect_args;
use crate::primitives::PrimitiveFn;
use crate::universe::Universe;
use crate::value::Value;

/// Messages answered by `console`.
pub static PRIMITIVES: &[(&str, PrimitiveFn)] = &[
    ("print", self::print),
    ("println", self::println),
    ("readLine", self::read_line),
];

/// Writes every argument after the receiver, coerced with `asString`.
fn write_all(universe: &mut Universe, args: Vec<Value>) -> Result<(), Error> {
    for value in args.into_iter().skip(1) {
        let string = coerce::as_string(universe, value)?;
        universe.write_output(string.as_str())?;
    }
    Ok(())
}

fn print(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    write_all(universe, args)?;
    universe.flush_output()?;
    Ok(Value::Nil)
}

fn println(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    write_all(universe, args)?;
    universe.write_output("\n")?;
    Ok(Value::Nil)
}

fn read_line(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "console>>#readLine";

    expect_args!(SIGNATURE, args, [Value::Native(_)]);

    match universe.read_input_line()? {
        Some(line) => Ok(Value::string(line)),
        None => Ok(Value::Nil),
    }
}
