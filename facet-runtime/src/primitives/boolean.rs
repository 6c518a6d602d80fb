use crate::coerce;
use crate::error::Error;
use crate::expect_args;
use crate::primitives::PrimitiveFn;
use crate::universe::Universe;
use crate::value::Value;

/// Messages answered by booleans.
pub static INSTANCE_PRIMITIVES: &[(&str, PrimitiveFn)] = &[
    ("if", self::if_then_else),
    ("and", self::and),
    ("or", self::or),
    ("not", self::not),
    ("==", self::eq),
    ("!=", self::neq),
    ("asString", self::as_string),
];

fn if_then_else(universe: &mut Universe, mut args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "boolean>>#if";

    // The else branch is optional.
    if args.len() == 2 {
        args.push(Value::Nil);
    }

    expect_args!(SIGNATURE, args, [
        Value::Boolean(condition) => condition,
        then_branch => then_branch,
        else_branch => else_branch,
    ]);

    let branch = if condition { then_branch } else { else_branch };
    match branch {
        Value::Nil => Ok(Value::Nil),
        branch => universe.send(branch, "call", Vec::new()),
    }
}

fn and(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "boolean>>#and";

    expect_args!(SIGNATURE, args, [
        Value::Boolean(a) => a,
        b => b,
    ]);

    Ok(Value::Boolean(a && coerce::as_boolean(&b)?))
}

fn or(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "boolean>>#or";

    expect_args!(SIGNATURE, args, [
        Value::Boolean(a) => a,
        b => b,
    ]);

    Ok(Value::Boolean(a || coerce::as_boolean(&b)?))
}

fn not(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "boolean>>#not";

    expect_args!(SIGNATURE, args, [
        Value::Boolean(value) => value,
    ]);

    Ok(Value::Boolean(!value))
}

fn eq(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "boolean>>#==";

    expect_args!(SIGNATURE, args, [
        a @ Value::Boolean(_) => a,
        b => b,
    ]);

    Ok(Value::Boolean(a == b))
}

fn neq(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "boolean>>#!=";

    expect_args!(SIGNATURE, args, [
        a @ Value::Boolean(_) => a,
        b => b,
    ]);

    Ok(Value::Boolean(a != b))
}

fn as_string(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "boolean>>#asString";

    expect_args!(SIGNATURE, args, [
        Value::Boolean(value) => value,
    ]);

    Ok(Value::string(value.to_string()))
}
