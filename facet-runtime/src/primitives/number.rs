use crate::coerce;
use crate::error::Error;
use crate::expect_args;
use crate::primitives::PrimitiveFn;
use crate::universe::Universe;
use crate::value::Value;

/// Messages answered by numbers.
pub static INSTANCE_PRIMITIVES: &[(&str, PrimitiveFn)] = &[
    ("+", self::plus),
    ("-", self::minus),
    ("*", self::times),
    ("/", self::divide),
    ("%", self::modulo),
    ("<", self::lt),
    (">", self::gt),
    ("<=", self::lte),
    (">=", self::gte),
    ("==", self::eq),
    ("!=", self::neq),
    ("asString", self::as_string),
    ("asNumber", self::as_number),
    ("negated", self::negated),
    ("abs", self::abs),
    ("floor", self::floor),
    ("max", self::max),
    ("min", self::min),
    ("timesRepeat", self::times_repeat),
    ("to", self::to),
];

/// Applies a binary operation, coercing the operand to a number first.
fn binary(
    universe: &mut Universe,
    signature: &str,
    args: Vec<Value>,
    op: fn(f64, f64) -> Value,
) -> Result<Value, Error> {
    expect_args!(signature, args, [
        Value::Number(a) => a,
        other => other,
    ]);

    let b = coerce::as_number(universe, other)?;
    Ok(op(a, b))
}

fn plus(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    binary(universe, "number>>#+", args, |a, b| Value::Number(a + b))
}

fn minus(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    binary(universe, "number>>#-", args, |a, b| Value::Number(a - b))
}

fn times(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    binary(universe, "number>>#*", args, |a, b| Value::Number(a * b))
}

fn divide(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    binary(universe, "number>>#/", args, |a, b| Value::Number(a / b))
}

fn modulo(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    binary(universe, "number>>#%", args, |a, b| Value::Number(a % b))
}

fn lt(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    binary(universe, "number>>#<", args, |a, b| Value::Boolean(a < b))
}

fn gt(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    binary(universe, "number>>#>", args, |a, b| Value::Boolean(a > b))
}

fn lte(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    binary(universe, "number>>#<=", args, |a, b| Value::Boolean(a <= b))
}

fn gte(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    binary(universe, "number>>#>=", args, |a, b| Value::Boolean(a >= b))
}

fn max(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    binary(universe, "number>>#max", args, |a, b| Value::Number(a.max(b)))
}

fn min(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    binary(universe, "number>>#min", args, |a, b| Value::Number(a.min(b)))
}

fn eq(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "number>>#==";

    expect_args!(SIGNATURE, args, [
        a @ Value::Number(_) => a,
        b => b,
    ]);

    Ok(Value::Boolean(a == b))
}

fn neq(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "number>>#!=";

    expect_args!(SIGNATURE, args, [
        a @ Value::Number(_) => a,
        b => b,
    ]);

    Ok(Value::Boolean(a != b))
}

fn as_string(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "number>>#asString";

    expect_args!(SIGNATURE, args, [
        Value::Number(value) => value,
    ]);

    Ok(Value::string(value.to_string()))
}

fn as_number(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "number>>#asNumber";

    expect_args!(SIGNATURE, args, [
        Value::Number(value) => value,
    ]);

    Ok(Value::Number(value))
}

fn negated(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "number>>#negated";

    expect_args!(SIGNATURE, args, [
        Value::Number(value) => value,
    ]);

    Ok(Value::Number(-value))
}

fn abs(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "number>>#abs";

    expect_args!(SIGNATURE, args, [
        Value::Number(value) => value,
    ]);

    Ok(Value::Number(value.abs()))
}

fn floor(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "number>>#floor";

    expect_args!(SIGNATURE, args, [
        Value::Number(value) => value,
    ]);

    Ok(Value::Number(value.floor()))
}

fn times_repeat(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "number>>#timesRepeat";

    expect_args!(SIGNATURE, args, [
        Value::Number(count) => count,
        procedure => procedure,
    ]);

    let mut done = 0.0;
    while done < count {
        universe.send(procedure.clone(), "call", Vec::new())?;
        done += 1.0;
    }

    Ok(Value::Nil)
}

fn to(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "number>>#to";

    expect_args!(SIGNATURE, args, [
        Value::Number(start) => start,
        end => end,
        procedure => procedure,
    ]);

    let end = coerce::as_number(universe, end)?;
    let mut counter = start;
    while counter <= end {
        universe.send(procedure.clone(), "call", vec![Value::Number(counter)])?;
        counter += 1.0;
    }

    Ok(Value::Nil)
}
