use std::rc::Rc;

use facet_core::ast::Term;

use crate::error::Error;
use crate::primitives::PrimitiveFn;
use crate::universe::Universe;
use crate::value::Value;

/// The trait for invoking methods, procedures and forwarding thunks.
///
/// Executors provide their own implementations, the dispatcher never looks inside.
pub trait Invoke {
    /// Invoke within the given universe and with the given arguments.
    fn invoke(&self, universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error>;
}

/// An entry of an instance's method table.
#[derive(Clone)]
pub enum Method {
    /// A method defined in Facet code, closing over its declaring environment.
    Defined(Rc<dyn Invoke>),
    /// A primitive or native function, bound to the value it was taken from.
    Primitive {
        /// The receiver the function gets called with.
        receiver: Value,
        /// The host function.
        func: PrimitiveFn,
    },
}

impl Invoke for Method {
    fn invoke(&self, universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
        match self {
            Self::Defined(method) => method.invoke(universe, args),
            Self::Primitive { receiver, func } => {
                let args = std::iter::once(receiver.clone()).chain(args).collect();
                func(universe, args)
            }
        }
    }
}

/// An execution strategy for whole programs.
///
/// The universe holds the active backend and uses it to run imported modules.
pub trait Backend {
    /// Runs a program in a fresh top-level environment and returns its value.
    fn execute(&self, universe: &mut Universe, program: &Term) -> Result<Value, Error>;
}
