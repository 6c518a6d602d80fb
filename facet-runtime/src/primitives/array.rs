use std::cell::RefCell;
use std::rc::Rc;

use crate::coerce;
use crate::error::Error;
use crate::expect_args;
use crate::primitives::{index, Native, NativeState, PrimitiveFn};
use crate::universe::Universe;
use crate::value::Value;

/// Messages answered by the `Array` global.
pub static CLASS_PRIMITIVES: &[(&str, PrimitiveFn)] = &[("new", self::new)];

/// Messages answered by arrays.
pub static INSTANCE_PRIMITIVES: &[(&str, PrimitiveFn)] = &[
    ("size", self::size),
    ("push", self::push),
    ("pop", self::pop),
    ("at", self::at),
    ("atPut", self::at_put),
    ("each", self::each),
    ("asString", self::as_string),
];

fn new(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    let values = args.into_iter().skip(1).collect();
    let array = Native::new(
        "array",
        INSTANCE_PRIMITIVES,
        NativeState::Array(RefCell::new(values)),
    );
    Ok(Value::Native(Rc::new(array)))
}

/// Get the elements held by an array receiver.
fn elements<'a>(signature: &str, array: &'a Native) -> Result<&'a RefCell<Vec<Value>>, Error> {
    match array.state() {
        NativeState::Array(values) => Ok(values),
        _ => Err(Error::native(format!("'{}': invalid self type", signature))),
    }
}

fn size(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "array>>#size";

    expect_args!(SIGNATURE, args, [
        Value::Native(array) => array,
    ]);

    let values = elements(SIGNATURE, &array)?;
    let len = values.borrow().len();
    Ok(Value::Number(len as f64))
}

fn push(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "array>>#push";

    expect_args!(SIGNATURE, args, [
        Value::Native(array) => array,
        value => value,
    ]);

    elements(SIGNATURE, &array)?.borrow_mut().push(value.clone());
    Ok(value)
}

fn pop(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "array>>#pop";

    expect_args!(SIGNATURE, args, [
        Value::Native(array) => array,
    ]);

    let popped = elements(SIGNATURE, &array)?.borrow_mut().pop();
    Ok(popped.unwrap_or(Value::Nil))
}

fn at(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "array>>#at";

    expect_args!(SIGNATURE, args, [
        Value::Native(array) => array,
        idx => idx,
    ]);

    let idx = coerce::as_number(universe, idx)?;
    let values = elements(SIGNATURE, &array)?.borrow();
    let idx = index(SIGNATURE, idx, values.len())?;
    Ok(values[idx].clone())
}

fn at_put(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "array>>#atPut";

    expect_args!(SIGNATURE, args, [
        Value::Native(array) => array,
        idx => idx,
        value => value,
    ]);

    let idx = coerce::as_number(universe, idx)?;
    let mut values = elements(SIGNATURE, &array)?.borrow_mut();
    let idx = index(SIGNATURE, idx, values.len())?;
    values[idx] = value.clone();
    Ok(value)
}

fn each(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "array>>#each";

    expect_args!(SIGNATURE, args, [
        Value::Native(array) => array,
        procedure => procedure,
    ]);

    // Iterate over a snapshot, the procedure may push to the array.
    let values = elements(SIGNATURE, &array)?.borrow().clone();
    for value in values {
        universe.send(procedure.clone(), "call", vec![value])?;
    }

    Ok(Value::Nil)
}

fn as_string(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "array>>#asString";

    expect_args!(SIGNATURE, args, [
        Value::Native(array) => array,
    ]);

    let values = elements(SIGNATURE, &array)?.borrow().clone();
    let mut strings = Vec::with_capacity(values.len());
    for value in values {
        strings.push(coerce::as_string(universe, value)?.to_string());
    }

    Ok(Value::string(format!("[{}]", strings.join(", "))))
}
