use std::rc::Rc;

use tracing::debug;

use facet_core::ast;
use facet_runtime::instance::{Instance, InstanceKind};
use facet_runtime::invokable::Method;
use facet_runtime::{Error, Universe, Value};

use crate::frame::Frame;
use crate::invokable::{Definition, ForwardThunk, MethodClosure};

/// The trait for evaluating AST nodes.
pub trait Evaluate {
    /// Evaluate the node within a given universe and environment frame.
    fn evaluate(&self, universe: &mut Universe, frame: &Rc<Frame>) -> Result<Value, Error>;
}

impl Evaluate for ast::Term {
    fn evaluate(&self, universe: &mut Universe, frame: &Rc<Frame>) -> Result<Value, Error> {
        match &self.kind {
            ast::TermKind::Variable(name) => frame
                .lookup(name)
                .or_else(|| universe.lookup_global(name))
                .ok_or_else(|| Error::UnboundVariable {
                    name: name.clone(),
                    line: Some(self.line),
                }),
            ast::TermKind::Literal(literal) => literal.evaluate(universe, frame),
            ast::TermKind::Send(send) => send
                .evaluate(universe, frame)
                .map_err(|err| err.at(self.line)),
            ast::TermKind::Sequence(statements) => {
                let mut last = Value::Nil;
                for statement in statements {
                    last = statement.evaluate(universe, frame)?;
                }
                Ok(last)
            }
            ast::TermKind::Define(define) => define.evaluate(universe, frame),
            ast::TermKind::Object(object) => object.evaluate(universe, frame),
            ast::TermKind::Procedure(procedure) => procedure.evaluate(universe, frame),
        }
    }
}

impl Evaluate for ast::Literal {
    fn evaluate(&self, _: &mut Universe, _: &Rc<Frame>) -> Result<Value, Error> {
        let value = match self {
            Self::Number(value) => Value::Number(*value),
            Self::String(value) => Value::string(value.as_str()),
            Self::Boolean(value) => Value::Boolean(*value),
            Self::Nil => Value::Nil,
        };
        Ok(value)
    }
}

impl Evaluate for ast::Send {
    fn evaluate(&self, universe: &mut Universe, frame: &Rc<Frame>) -> Result<Value, Error> {
        let receiver = self.receiver.evaluate(universe, frame)?;
        let args = self
            .arguments
            .iter()
            .map(|arg| arg.evaluate(universe, frame))
            .collect::<Result<Vec<_>, _>>()?;
        universe.send(receiver, &self.message, args)
    }
}

impl Evaluate for ast::Define {
    fn evaluate(&self, universe: &mut Universe, frame: &Rc<Frame>) -> Result<Value, Error> {
        let value = self.value.evaluate(universe, frame)?;
        frame.define(self.name.as_str(), value.clone());
        Ok(value)
    }
}

impl Evaluate for Rc<ast::Object> {
    fn evaluate(&self, universe: &mut Universe, frame: &Rc<Frame>) -> Result<Value, Error> {
        let instance = Rc::new(Instance::new(InstanceKind::Object));
        let frame = Frame::extend(frame);
        frame.define("self", Value::Instance(instance.clone()));

        // Methods first, so that nothing else can take their message names.
        for element in &self.elements {
            if let ast::Element::Method(method) = element {
                let closure = MethodClosure::new(Definition::Method(method.clone()), &frame);
                instance.define_method(
                    method.signature.as_str(),
                    Method::Defined(Rc::new(closure)),
                );
            }
        }

        let mut decorated = 0;
        let mut forwards = 0;
        for element in &self.elements {
            match element {
                ast::Element::Method(_) => {}
                ast::Element::Decorate(source) => {
                    let source = source.evaluate(universe, &frame)?;
                    decorated += instance.decorate(&source);
                }
                ast::Element::Define(define) => {
                    define.evaluate(universe, &frame)?;
                }
                ast::Element::Forward(target) => {
                    instance.add_forward(Rc::new(ForwardThunk::new(target.clone(), &frame)));
                    forwards += 1;
                }
            }
        }

        debug!(
            methods = instance.method_count(),
            decorated, forwards, "constructed object"
        );
        Ok(Value::Instance(instance))
    }
}

impl Evaluate for Rc<ast::Procedure> {
    fn evaluate(&self, _: &mut Universe, frame: &Rc<Frame>) -> Result<Value, Error> {
        let instance = Instance::new(InstanceKind::Procedure);
        let closure = MethodClosure::new(Definition::Procedure(self.clone()), frame);
        instance.define_method("call", Method::Defined(Rc::new(closure)));
        debug!(parameters = self.parameters.len(), "constructed procedure");
        Ok(Value::Instance(Rc::new(instance)))
    }
}
