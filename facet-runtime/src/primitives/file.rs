use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Write};
use std::rc::Rc;

use crate::coerce;
use crate::error::Error;
use crate::expect_args;
use crate::primitives::{Native, NativeState, PrimitiveFn};
use crate::universe::Universe;
use crate::value::Value;

/// Messages answered by the `File` global.
pub static CLASS_PRIMITIVES: &[(&str, PrimitiveFn)] = &[("open", self::open)];

/// Messages answered by open files.
pub static INSTANCE_PRIMITIVES: &[(&str, PrimitiveFn)] = &[
    ("read", self::read),
    ("readLine", self::read_line),
    ("write", self::write),
    ("close", self::close),
];

/// An open file, either for reading or for writing.
pub enum Handle {
    /// Opened with mode `'r'`.
    Reader(BufReader<File>),
    /// Opened with mode `'w'` or `'a'`.
    Writer(File),
}

fn open(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "File>>#open";

    let mut args = args;
    // The mode defaults to reading.
    if args.len() == 2 {
        args.push(Value::string("r"));
    }

    expect_args!(SIGNATURE, args, [
        Value::Native(_),
        path => path,
        mode => mode,
    ]);

    let path = coerce::as_string(universe, path)?;
    let mode = coerce::as_string(universe, mode)?;
    let failure = |err: std::io::Error| {
        Error::native(format!(
            "'{}': could not open '{}': {}",
            SIGNATURE, path, err
        ))
    };
    let handle = match mode.as_str() {
        "r" => Handle::Reader(BufReader::new(File::open(path.as_str()).map_err(failure)?)),
        "w" => Handle::Writer(File::create(path.as_str()).map_err(failure)?),
        "a" => Handle::Writer(
            OpenOptions::new()
                .append(true)
                .create(true)
                .open(path.as_str())
                .map_err(failure)?,
        ),
        mode => {
            return Err(Error::native(format!(
                "'{}': unknown mode '{}'",
                SIGNATURE, mode
            )))
        }
    };

    let file = Native::new(
        "file",
        INSTANCE_PRIMITIVES,
        NativeState::File(RefCell::new(Some(handle))),
    );
    Ok(Value::Native(Rc::new(file)))
}

/// Runs an operation on the handle of a file receiver, failing if it got closed.
fn with_handle<T>(
    signature: &str,
    file: &Native,
    func: impl FnOnce(&mut Handle) -> Result<T, Error>,
) -> Result<T, Error> {
    match file.state() {
        NativeState::File(handle) => match handle.borrow_mut().as_mut() {
            Some(handle) => func(handle),
            None => Err(Error::native(format!("'{}': file is closed", signature))),
        },
        _ => Err(Error::native(format!("'{}': invalid self type", signature))),
    }
}

fn io_failure(signature: &str, err: std::io::Error) -> Error {
    Error::native(format!("'{}': {}", signature, err))
}

fn read(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "file>>#read";

    expect_args!(SIGNATURE, args, [
        Value::Native(file) => file,
    ]);

    with_handle(SIGNATURE, &file, |handle| match handle {
        Handle::Reader(reader) => {
            let mut contents = String::new();
            reader
                .read_to_string(&mut contents)
                .map_err(|err| io_failure(SIGNATURE, err))?;
            Ok(Value::string(contents))
        }
        Handle::Writer(_) => Err(Error::native(format!(
            "'{}': file is not open for reading",
            SIGNATURE
        ))),
    })
}

fn read_line(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "file>>#readLine";

    expect_args!(SIGNATURE, args, [
        Value::Native(file) => file,
    ]);

    with_handle(SIGNATURE, &file, |handle| match handle {
        Handle::Reader(reader) => {
            let mut line = String::new();
            let read = reader
                .read_line(&mut line)
                .map_err(|err| io_failure(SIGNATURE, err))?;
            if read == 0 {
                return Ok(Value::Nil);
            }
            let trimmed = line.trim_end_matches(&['\n', '\r'][..]);
            Ok(Value::string(trimmed))
        }
        Handle::Writer(_) => Err(Error::native(format!(
            "'{}': file is not open for reading",
            SIGNATURE
        ))),
    })
}

fn write(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "file>>#write";

    expect_args!(SIGNATURE, args, [
        Value::Native(file) => file,
        value => value,
    ]);

    let string = coerce::as_string(universe, value)?;
    with_handle(SIGNATURE, &file, |handle| match handle {
        Handle::Writer(writer) => {
            writer
                .write_all(string.as_bytes())
                .map_err(|err| io_failure(SIGNATURE, err))?;
            Ok(Value::Nil)
        }
        Handle::Reader(_) => Err(Error::native(format!(
            "'{}': file is not open for writing",
            SIGNATURE
        ))),
    })
}

fn close(_: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
    const SIGNATURE: &str = "file>>#close";

    expect_args!(SIGNATURE, args, [
        Value::Native(file) => file,
    ]);

    match file.state() {
        NativeState::File(handle) => {
            if let Some(Handle::Writer(mut writer)) = handle.borrow_mut().take() {
                writer.flush().map_err(|err| io_failure(SIGNATURE, err))?;
            }
            Ok(Value::Nil)
        }
        _ => Err(Error::native(format!("'{}': invalid self type", SIGNATURE))),
    }
}
