use std::rc::Rc;

use facet_core::ast::Literal;
use facet_runtime::instance::{Instance, InstanceKind};
use facet_runtime::invokable::{Invoke, Method};
use facet_runtime::{Error, Universe, Value};

use crate::frame::Frame;
use crate::ir::{Callable, Element, Expr, Object, SELF_INDEX};

/// A compiled expression, run against a frame built for its scope.
pub type Code = Rc<dyn Fn(&mut Universe, &Rc<Frame>) -> Result<Value, Error>>;

/// A compiled method or procedure body.
pub struct CompiledCallable {
    size: usize,
    parameters: Vec<usize>,
    body: Code,
}

impl CompiledCallable {
    fn new(callable: &Callable) -> Rc<Self> {
        Rc::new(Self {
            size: callable.scope.size(),
            parameters: callable.parameters.clone(),
            body: generate(&callable.body),
        })
    }
}

/// A compiled callable, closing over the frame it was declared in.
pub struct CompiledMethod {
    callable: Rc<CompiledCallable>,
    frame: Rc<Frame>,
}

impl Invoke for CompiledMethod {
    fn invoke(&self, universe: &mut Universe, args: Vec<Value>) -> Result<Value, Error> {
        let frame = Frame::extend(&self.frame, self.callable.size);
        for (&index, value) in self.callable.parameters.iter().zip(args) {
            frame.set(index, value);
        }
        (self.callable.body)(universe, &frame)
    }
}

/// A compiled forward target, run again on every lookup.
pub struct CompiledThunk {
    code: Code,
    frame: Rc<Frame>,
}

impl Invoke for CompiledThunk {
    fn invoke(&self, universe: &mut Universe, _: Vec<Value>) -> Result<Value, Error> {
        (self.code)(universe, &self.frame)
    }
}

fn closure<F>(f: F) -> Code
where
    F: Fn(&mut Universe, &Rc<Frame>) -> Result<Value, Error> + 'static,
{
    Rc::new(f)
}

enum CompiledElement {
    Decorate(Code),
    Define(Code),
    Forward(Code),
}

/// Turn an expression into a closure.
pub fn generate(expr: &Expr) -> Code {
    match expr {
        Expr::Literal(literal) => {
            let value = literal_value(literal);
            closure(move |_, _| Ok(value.clone()))
        }
        Expr::Load {
            name,
            line,
            candidates,
        } => {
            let name = name.clone();
            let line = *line;
            let candidates = candidates.clone();
            closure(move |universe, frame| {
                candidates
                    .iter()
                    .find_map(|slot| frame.get(*slot))
                    .or_else(|| universe.lookup_global(&name))
                    .ok_or_else(|| Error::UnboundVariable {
                        name: name.clone(),
                        line: Some(line),
                    })
            })
        }
        Expr::Store { index, value } => {
            let index = *index;
            let value = generate(value);
            closure(move |universe, frame| {
                let value = value(universe, frame)?;
                frame.set(index, value.clone());
                Ok(value)
            })
        }
        Expr::Sequence(exprs) => {
            let codes: Vec<Code> = exprs.iter().map(generate).collect();
            closure(move |universe, frame| {
                let mut last = Value::Nil;
                for code in &codes {
                    last = code(universe, frame)?;
                }
                Ok(last)
            })
        }
        Expr::Send {
            line,
            receiver,
            message,
            arguments,
        } => {
            let line = *line;
            let message = message.clone();
            let receiver = generate(receiver);
            let arguments: Vec<Code> = arguments.iter().map(generate).collect();
            closure(move |universe, frame| {
                send(universe, frame, &receiver, &message, &arguments).map_err(|err| err.at(line))
            })
        }
        Expr::Object(object) => generate_object(object),
        Expr::Procedure(callable) => {
            let callable = CompiledCallable::new(callable);
            closure(move |_, frame| {
                let instance = Instance::new(InstanceKind::Procedure);
                let method = CompiledMethod {
                    callable: callable.clone(),
                    frame: frame.clone(),
                };
                instance.define_method("call", Method::Defined(Rc::new(method)));
                Ok(Value::Instance(Rc::new(instance)))
            })
        }
    }
}

fn send(
    universe: &mut Universe,
    frame: &Rc<Frame>,
    receiver: &Code,
    message: &str,
    arguments: &[Code],
) -> Result<Value, Error> {
    let receiver = receiver(universe, frame)?;
    let mut args = Vec::with_capacity(arguments.len());
    for argument in arguments {
        args.push(argument(universe, frame)?);
    }
    universe.send(receiver, message, args)
}

fn generate_object(object: &Object) -> Code {
    let size = object.scope.size();
    let methods: Vec<(String, Rc<CompiledCallable>)> = object
        .methods
        .iter()
        .map(|(signature, callable)| (signature.clone(), CompiledCallable::new(callable)))
        .collect();
    let elements: Vec<CompiledElement> = object
        .elements
        .iter()
        .map(|element| match element {
            Element::Decorate(expr) => CompiledElement::Decorate(generate(expr)),
            Element::Define(expr) => CompiledElement::Define(generate(expr)),
            Element::Forward(expr) => CompiledElement::Forward(generate(expr)),
        })
        .collect();

    closure(move |universe, frame| {
        let instance = Rc::new(Instance::new(InstanceKind::Object));
        let frame = Frame::extend(frame, size);
        frame.set(SELF_INDEX, Value::Instance(instance.clone()));

        for (signature, callable) in &methods {
            let method = CompiledMethod {
                callable: callable.clone(),
                frame: frame.clone(),
            };
            instance.define_method(signature.as_str(), Method::Defined(Rc::new(method)));
        }

        for element in &elements {
            match element {
                CompiledElement::Decorate(code) => {
                    let source = code(universe, &frame)?;
                    instance.decorate(&source);
                }
                CompiledElement::Define(code) => {
                    code(universe, &frame)?;
                }
                CompiledElement::Forward(code) => {
                    let thunk = CompiledThunk {
                        code: code.clone(),
                        frame: frame.clone(),
                    };
                    instance.add_forward(Rc::new(thunk));
                }
            }
        }

        Ok(Value::Instance(instance))
    })
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Number(value) => Value::Number(*value),
        Literal::String(value) => Value::string(value.as_str()),
        Literal::Boolean(value) => Value::Boolean(*value),
        Literal::Nil => Value::Nil,
    }
}
