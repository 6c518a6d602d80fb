/// Primitives for **boolean** values.
pub mod boolean;
/// Primitives for **nil**.
pub mod nil;
/// Primitives for **number** values.
pub mod number;
/// Primitives for **string** values.
pub mod string;

/// The **Array** native and its instances.
pub mod array;
/// The **Cell** native and its instances.
pub mod cell;
/// The **console** native.
pub mod console;
/// The **File** native and its handles.
pub mod file;
/// The **system** native.
pub mod system;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::Error;
use crate::universe::Universe;
use crate::value::Value;

/// A primitive (just a bare function pointer), receiving its receiver as the first argument.
pub type PrimitiveFn = fn(universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error>;

/// A fixed table of messages answered by a primitive kind or a native.
pub type MethodTable = &'static [(&'static str, PrimitiveFn)];

/// The introspection message, never dispatched to a native nor copied out of one.
pub const INTROSPECTION: &str = "type";

/// Macro for checking and destructuring arguments passed to primitives.
#[macro_export]
macro_rules! expect_args {
    ($signature:expr, $args:expr, [ $( $ptrn:pat $( => $name:ident )? ),* $(,)? ]) => {
        #[allow(unused_mut)]
        let ($($(mut $name,)?)*) = {
            #[allow(unused_variables, unused_mut)]
            let mut iter = $args.into_iter();
            $(#[allow(unreachable_patterns)]
            $(let $name =)? match iter.next() {
                Some($ptrn) => {$($name)?},
                Some(_) => return Err($crate::error::Error::native(format!("'{}': wrong type", $signature))),
                None => return Err($crate::error::Error::native(format!("'{}': missing argument", $signature))),
            };)*
            ($($($name,)?)*)
        };
    };
}

/// The host-side state carried by a native object.
pub enum NativeState {
    /// A native without state (eg. `console`).
    Stateless,
    /// A mutable cell.
    Cell(RefCell<Value>),
    /// A growable array.
    Array(RefCell<Vec<Value>>),
    /// A file handle, `None` once closed.
    File(RefCell<Option<file::Handle>>),
}

/// Represents a host-implemented object, with a fixed message table.
pub struct Native {
    name: &'static str,
    methods: MethodTable,
    state: NativeState,
}

impl Native {
    /// Construct a native from its name, message table and state.
    pub fn new(name: &'static str, methods: MethodTable, state: NativeState) -> Self {
        Self {
            name,
            methods,
            state,
        }
    }

    /// Get the name of this native.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the message table of this native.
    pub fn methods(&self) -> MethodTable {
        self.methods
    }

    /// Get the host-side state of this native.
    pub fn state(&self) -> &NativeState {
        &self.state
    }
}

impl fmt::Display for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            NativeState::Array(values) => {
                let strings: Vec<String> = values
                    .borrow()
                    .iter()
                    .map(|value| value.to_string())
                    .collect();
                write!(f, "[{}]", strings.join(", "))
            }
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Get the message table answering for a given value, if it has a fixed one.
pub fn method_table(value: &Value) -> Option<MethodTable> {
    match value {
        Value::Nil => Some(self::nil::INSTANCE_PRIMITIVES),
        Value::Boolean(_) => Some(self::boolean::INSTANCE_PRIMITIVES),
        Value::Number(_) => Some(self::number::INSTANCE_PRIMITIVES),
        Value::String(_) => Some(self::string::INSTANCE_PRIMITIVES),
        Value::Native(native) => Some(native.methods()),
        Value::Instance(_) => None,
    }
}

/// Search a fixed message table for a function.
pub fn lookup(table: MethodTable, signature: &str) -> Option<PrimitiveFn> {
    table
        .iter()
        .find(|(name, _)| *name == signature)
        .map(|&(_, func)| func)
}

/// The natives visible behind every top-level environment.
pub fn globals() -> Vec<(&'static str, Value)> {
    let stateless = |name, methods| {
        Value::Native(Rc::new(Native::new(name, methods, NativeState::Stateless)))
    };
    vec![
        ("console", stateless("console", self::console::PRIMITIVES)),
        ("Cell", stateless("Cell", self::cell::CLASS_PRIMITIVES)),
        ("Array", stateless("Array", self::array::CLASS_PRIMITIVES)),
        ("File", stateless("File", self::file::CLASS_PRIMITIVES)),
        ("system", stateless("system", self::system::PRIMITIVES)),
    ]
}

/// Parse a number argument into an index, failing on non-integers.
pub(crate) fn index(signature: &str, value: f64, len: usize) -> Result<usize, Error> {
    if value.fract() != 0.0 || value < 0.0 || value >= len as f64 {
        return Err(Error::native(format!(
            "'{}': index {} out of bounds (size {})",
            signature, value, len
        )));
    }
    Ok(value as usize)
}
