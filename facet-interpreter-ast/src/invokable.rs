use std::rc::Rc;

use facet_core::ast;
use facet_runtime::invokable::Invoke;
use facet_runtime::{Error, Universe, Value};

use crate::evaluate::Evaluate;
use crate::frame::Frame;

/// The definition behind a method closure.
#[derive(Debug, Clone)]
pub enum Definition {
    /// A method element of an object literal.
    Method(Rc<ast::Method>),
    /// A procedure, answering `call`.
    Procedure(Rc<ast::Procedure>),
}

impl Definition {
    /// Get the parameter names.
    pub fn parameters(&self) -> &[String] {
        match self {
            Self::Method(method) => method.parameters.as_slice(),
            Self::Procedure(procedure) => procedure.parameters.as_slice(),
        }
    }

    /// Get the body.
    pub fn body(&self) -> &ast::Term {
        match self {
            Self::Method(method) => &method.body,
            Self::Procedure(procedure) => &procedure.body,
        }
    }
}

/// A method (or procedure) closing over the frame it was declared in.
pub struct MethodClosure {
    definition: Definition,
    frame: Rc<Frame>,
}

impl MethodClosure {
    /// Construct a closure over `frame`.
    pub fn new(definition: Definition, frame: &Rc<Frame>) -> Self {
        Self {
            definition,
            frame: frame.clone(),
        }
    }
}

impl Invoke for MethodClosure {
    /// Each invocation gets its own frame, extending the declaring one.
    ///
    /// Binding stops at the last supplied argument, so a missing parameter reads through to
    /// the enclosing scopes. Extra arguments are ignored.
    fn invoke(&self, universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
        let frame = Frame::extend(&self.frame);
        for (name, value) in self.definition.parameters().iter().zip(args) {
            frame.define(name.as_str(), value);
        }
        self.definition.body().evaluate(universe, &frame)
    }
}

/// Produces the current value of a forward target, re-evaluated on every lookup.
pub struct ForwardThunk {
    target: Rc<ast::Term>,
    frame: Rc<Frame>,
}

impl ForwardThunk {
    /// Construct a thunk evaluating `target` within `frame`.
    pub fn new(target: Rc<ast::Term>, frame: &Rc<Frame>) -> Self {
        Self {
            target,
            frame: frame.clone(),
        }
    }
}

impl Invoke for ForwardThunk {
    fn invoke(&self, universe: &mut Universe, _: Vec<Value>) -> Result<Value, Error> {
        self.target.evaluate(universe, &self.frame)
    }
}
