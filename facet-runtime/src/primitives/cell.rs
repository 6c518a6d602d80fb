use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Error;
use crate::expect_args;
use crate::primitives::{Native, NativeState, PrimitiveFn};
use crate::universe::Universe;
use crate::value::Value;

/// Messages answered by the `Cell` global.
pub static CLASS_PRIMITIVES: &[(&str, PrimitiveFn)] = &[("new", self::new)];

/// Messages answered by cells.
pub static INSTANCE_PRIMITIVES: &[(&str, PrimitiveFn)] =
    &[("get", self::get), ("set", self::set)];

fn new(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    let value = args.into_iter().nth(1).unwrap_or(Value::Nil);
    let cell = Native::new(
        "cell",
        INSTANCE_PRIMITIVES,
        NativeState::Cell(RefCell::new(value)),
    );
    Ok(Value::Native(Rc::new(cell)))
}

fn get(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "cell>>#get";

    expect_args!(SIGNATURE, args, [
        Value::Native(cell) => cell,
    ]);

    match cell.state() {
        NativeState::Cell(value) => Ok(value.borrow().clone()),
        _ => Err(Error::native(format!("'{}': invalid self type", SIGNATURE))),
    }
}

fn set(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "cell>>#set";

    expect_args!(SIGNATURE, args, [
        Value::Native(cell) => cell,
        value => value,
    ]);

    match cell.state() {
        NativeState::Cell(slot) => {
            slot.replace(value.clone());
            Ok(value)
        }
        _ => Err(Error::native(format!("'{}': invalid self type", SIGNATURE))),
    }
}
