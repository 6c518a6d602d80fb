//! Operands of primitive operators are converted by sending them `asNumber` or `asString`,
//! so instances can take part in arithmetic and concatenation by answering those messages.

use std::rc::Rc;

use crate::error::Error;
use crate::universe::Universe;
use crate::value::Value;

/// Converts a value into a number, sending it `asNumber` unless it already is one.
pub fn as_number(universe: &mut Universe, value: Value) -> Result<f64, Error> {
    if let Value::Number(value) = value {
        return Ok(value);
    }
    match convert(universe, &value, "asNumber", "number")? {
        Value::Number(number) => Ok(number),
        _ => Err(failure("number", &value)),
    }
}

/// Converts a value into a string, sending it `asString` unless it already is one.
pub fn as_string(universe: &mut Universe, value: Value) -> Result<Rc<String>, Error> {
    if let Value::String(value) = value {
        return Ok(value);
    }
    match convert(universe, &value, "asString", "string")? {
        Value::String(string) => Ok(string),
        _ => Err(failure("string", &value)),
    }
}

/// Sends the conversion message, a receiver not understanding it being a failed conversion.
fn convert(
    universe: &mut Universe,
    value: &Value,
    message: &str,
    kind: &str,
) -> Result<Value, Error> {
    match universe.send(value.clone(), message, Vec::new()) {
        Err(Error::MessageNotUnderstood {
            message: missing,
            line: None,
            ..
        }) if missing == message => Err(failure(kind, value)),
        result => result,
    }
}

/// Converts a value into a boolean, without sending anything.
pub fn as_boolean(value: &Value) -> Result<bool, Error> {
    match value {
        Value::Boolean(value) => Ok(*value),
        value => Err(failure("boolean", value)),
    }
}

/// Construct the error describing a failed conversion.
pub fn failure(kind: &str, value: &Value) -> Error {
    let value = match value {
        Value::String(string) => format!("'{}'", string),
        Value::Nil | Value::Instance(_) | Value::Native(_) => String::from(value.kind()),
        value => format!("{} {}", value.kind(), value),
    };
    Error::CoercionFailure {
        kind: String::from(kind),
        value,
    }
}
