use crate::error::Error;
use crate::expect_args;
use crate::primitives::PrimitiveFn;
use crate::universe::Universe;
use crate::value::Value;

/// Messages answered by nil.
pub static INSTANCE_PRIMITIVES: &[(&str, PrimitiveFn)] = &[
    ("==", self::eq),
    ("!=", self::neq),
    ("isNil", self::is_nil),
    ("asString", self::as_string),
];

fn eq(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "nil>>#==";

    expect_args!(SIGNATURE, args, [
        Value::Nil,
        other => other,
    ]);

    Ok(Value::Boolean(matches!(other, Value::Nil)))
}

fn neq(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "nil>>#!=";

    expect_args!(SIGNATURE, args, [
        Value::Nil,
        other => other,
    ]);

    Ok(Value::Boolean(!matches!(other, Value::Nil)))
}

fn is_nil(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "nil>>#isNil";

    expect_args!(SIGNATURE, args, [Value::Nil]);

    Ok(Value::Boolean(true))
}

fn as_string(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "nil>>#asString";

    expect_args!(SIGNATURE, args, [Value::Nil]);

    Ok(Value::string("nil"))
}
