use std::cmp::Ordering;

use crate::coerce;
use crate::error::Error;
use crate::expect_args;
use crate::primitives::{index, PrimitiveFn};
use crate::universe::Universe;
use crate::value::Value;

/// Messages answered by strings.
pub static INSTANCE_PRIMITIVES: &[(&str, PrimitiveFn)] = &[
    ("+", self::concatenate),
    ("size", self::size),
    ("==", self::eq),
    ("!=", self::neq),
    ("<", self::lt),
    (">", self::gt),
    ("<=", self::lte),
    (">=", self::gte),
    ("asString", self::as_string),
    ("asNumber", self::as_number),
    ("at", self::at),
    ("substring", self::substring),
    ("upper", self::upper),
    ("lower", self::lower),
    ("trim", self::trim),
];

fn concatenate(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "string>>#+";

    expect_args!(SIGNATURE, args, [
        Value::String(s1) => s1,
        other => other,
    ]);

    let s2 = coerce::as_string(universe, other)?;
    Ok(Value::string(format!("{}{}", s1, s2)))
}

fn size(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "string>>#size";

    expect_args!(SIGNATURE, args, [
        Value::String(value) => value,
    ]);

    Ok(Value::Number(value.chars().count() as f64))
}

fn eq(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "string>>#==";

    expect_args!(SIGNATURE, args, [
        a @ Value::String(_) => a,
        b => b,
    ]);

    Ok(Value::Boolean(a == b))
}

fn neq(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "string>>#!=";

    expect_args!(SIGNATURE, args, [
        a @ Value::String(_) => a,
        b => b,
    ]);

    Ok(Value::Boolean(a != b))
}

/// Compares two strings, coercing the operand to a string first.
fn compare(
    universe: &mut Universe,
    signature: &str,
    args: Vec<Value>,
    accept: fn(Ordering) -> bool,
) -> Result<Value, Error> {
    expect_args!(signature, args, [
        Value::String(s1) => s1,
        other => other,
    ]);

    let s2 = coerce::as_string(universe, other)?;
    Ok(Value::Boolean(accept(s1.as_str().cmp(s2.as_str()))))
}

fn lt(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    compare(universe, "string>>#<", args, Ordering::is_lt)
}

fn gt(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    compare(universe, "string>>#>", args, Ordering::is_gt)
}

fn lte(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    compare(universe, "string>>#<=", args, Ordering::is_le)
}

fn gte(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    compare(universe, "string>>#>=", args, Ordering::is_ge)
}

fn as_string(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "string>>#asString";

    expect_args!(SIGNATURE, args, [
        value @ Value::String(_) => value,
    ]);

    Ok(value)
}

fn as_number(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "string>>#asNumber";

    expect_args!(SIGNATURE, args, [
        value @ Value::String(_) => value,
    ]);

    let parsed = match &value {
        Value::String(string) => string.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(number) if number.is_finite() => Ok(Value::Number(number)),
        _ => Err(coerce::failure("number", &value)),
    }
}

fn at(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "string>>#at";

    expect_args!(SIGNATURE, args, [
        Value::String(value) => value,
        idx => idx,
    ]);

    let chars: Vec<char> = value.chars().collect();
    let idx = coerce::as_number(universe, idx)?;
    let idx = index(SIGNATURE, idx, chars.len())?;
    Ok(Value::string(chars[idx].to_string()))
}

fn substring(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "string>>#substring";

    expect_args!(SIGNATURE, args, [
        Value::String(value) => value,
        from => from,
        to => to,
    ]);

    let chars: Vec<char> = value.chars().collect();
    let from = coerce::as_number(universe, from)?;
    let to = coerce::as_number(universe, to)?;
    // Both bounds may sit right after the last character.
    let from = index(SIGNATURE, from, chars.len() + 1)?;
    let to = index(SIGNATURE, to, chars.len() + 1)?;
    if from > to {
        return Err(Error::native(format!(
            "'{}': start {} is after end {}",
            SIGNATURE, from, to
        )));
    }

    Ok(Value::string(chars[from..to].iter().collect::<String>()))
}

fn upper(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "string>>#upper";

    expect_args!(SIGNATURE, args, [
        Value::String(value) => value,
    ]);

    Ok(Value::string(value.to_uppercase()))
}

fn lower(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "string>>#lower";

    expect_args!(SIGNATURE, args, [
        Value::String(value) => value,
    ]);

    Ok(Value::string(value.to_lowercase()))
}

fn trim(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "string>>#trim";

    expect_args!(SIGNATURE, args, [
        Value::String(value) => value,
    ]);

    Ok(Value::string(value.trim()))
}
