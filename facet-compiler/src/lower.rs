use std::rc::Rc;

use facet_core::ast::{self, Term, TermKind};

use crate::ir::{Callable, Element, Expr, Object, Program, Scope, Slot, SELF_INDEX};

/// Resolves every variable of a term to the slots that may hold it.
///
/// A scope is opened per program, object literal and method or procedure body.
/// Sequences share the scope they appear in.
#[derive(Debug, Default)]
pub struct Lowerer {
    next_scope: usize,
    enclosing: Vec<Vec<String>>,
}

impl Lowerer {
    /// Construct a lowerer, with scope ids starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of scopes opened so far.
    pub fn scope_count(&self) -> usize {
        self.next_scope
    }

    /// Lower a whole program.
    pub fn lower_program(&mut self, term: &Term) -> Program {
        let mut names = Vec::new();
        collect_defines(term, &mut names);
        let mut scope = self.open_scope(names);
        let body = self.lower(term, &mut scope);
        Program { scope, body }
    }

    fn open_scope(&mut self, names: Vec<String>) -> Scope {
        let scope = Scope::new(self.next_scope, names);
        self.next_scope += 1;
        scope
    }

    fn lower(&mut self, term: &Term, scope: &mut Scope) -> Expr {
        match &term.kind {
            TermKind::Variable(name) => Expr::Load {
                name: name.clone(),
                line: term.line,
                candidates: self.candidates(name, scope),
            },
            TermKind::Literal(literal) => Expr::Literal(literal.clone()),
            TermKind::Send(send) => Expr::Send {
                line: term.line,
                receiver: Box::new(self.lower(&send.receiver, scope)),
                message: send.message.clone(),
                arguments: send
                    .arguments
                    .iter()
                    .map(|argument| self.lower(argument, scope))
                    .collect(),
            },
            TermKind::Sequence(statements) => Expr::Sequence(
                statements
                    .iter()
                    .map(|statement| self.lower(statement, scope))
                    .collect(),
            ),
            TermKind::Define(define) => self.lower_define(define, scope),
            TermKind::Object(object) => {
                self.enclosing.push(scope.bindings.clone());
                let object = self.lower_object(object);
                self.enclosing.pop();
                Expr::Object(Rc::new(object))
            }
            TermKind::Procedure(procedure) => {
                self.enclosing.push(scope.bindings.clone());
                let callable = self.lower_callable(&procedure.parameters, &procedure.body);
                self.enclosing.pop();
                Expr::Procedure(Rc::new(callable))
            }
        }
    }

    fn lower_define(&mut self, define: &ast::Define, scope: &mut Scope) -> Expr {
        let value = self.lower(&define.value, scope);
        Expr::Store {
            index: scope.bind(define.name.as_str()),
            value: Box::new(value),
        }
    }

    fn lower_object(&mut self, object: &ast::Object) -> Object {
        let mut names = vec![String::from("self")];
        for element in &object.elements {
            match element {
                ast::Element::Method(_) => {}
                ast::Element::Decorate(term) => collect_defines(term, &mut names),
                ast::Element::Define(define) => {
                    names.push(define.name.clone());
                    collect_defines(&define.value, &mut names);
                }
                ast::Element::Forward(term) => collect_defines(term, &mut names),
            }
        }
        let mut scope = self.open_scope(names);
        debug_assert_eq!(scope.index_of("self"), Some(SELF_INDEX));

        let mut methods = Vec::new();
        let mut elements = Vec::new();
        for element in &object.elements {
            match element {
                ast::Element::Method(method) => {
                    self.enclosing.push(scope.bindings.clone());
                    let callable = self.lower_callable(&method.parameters, &method.body);
                    self.enclosing.pop();
                    methods.push((method.signature.clone(), Rc::new(callable)));
                }
                ast::Element::Decorate(term) => {
                    elements.push(Element::Decorate(self.lower(term, &mut scope)));
                }
                ast::Element::Define(define) => {
                    elements.push(Element::Define(self.lower_define(define, &mut scope)));
                }
                ast::Element::Forward(term) => {
                    elements.push(Element::Forward(Rc::new(self.lower(term, &mut scope))));
                }
            }
        }

        Object {
            scope,
            methods,
            elements,
        }
    }

    fn lower_callable(&mut self, parameters: &[String], body: &Term) -> Callable {
        let mut names = parameters.to_vec();
        collect_defines(body, &mut names);
        let mut scope = self.open_scope(names);
        let parameters = parameters
            .iter()
            .map(|name| scope.bind(name.as_str()))
            .collect();
        let body = self.lower(body, &mut scope);
        Callable {
            scope,
            parameters,
            body,
        }
    }

    /// Every scope's names are collected before its body is lowered, so nested
    /// bodies see the bindings of definitions that come after them.
    fn candidates(&self, name: &str, scope: &Scope) -> Vec<Slot> {
        let current = scope.index_of(name).map(|index| Slot { depth: 0, index });
        let outer = self
            .enclosing
            .iter()
            .rev()
            .enumerate()
            .filter_map(|(depth, bindings)| {
                bindings
                    .iter()
                    .position(|binding| binding == name)
                    .map(|index| Slot {
                        depth: depth + 1,
                        index,
                    })
            });
        current.into_iter().chain(outer).collect()
    }
}

/// Collect the names a term defines in its own scope, without entering nested scopes.
fn collect_defines(term: &Term, names: &mut Vec<String>) {
    match &term.kind {
        TermKind::Variable(_) | TermKind::Literal(_) => {}
        TermKind::Send(send) => {
            collect_defines(&send.receiver, names);
            for argument in &send.arguments {
                collect_defines(argument, names);
            }
        }
        TermKind::Sequence(statements) => {
            for statement in statements {
                collect_defines(statement, names);
            }
        }
        TermKind::Define(define) => {
            names.push(define.name.clone());
            collect_defines(&define.value, names);
        }
        TermKind::Object(_) | TermKind::Procedure(_) => {}
    }
}
