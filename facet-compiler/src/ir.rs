use std::rc::Rc;

use facet_core::ast::Literal;

/// The index of the `self` binding within an object scope.
pub const SELF_INDEX: usize = 0;

/// A binding slot, `depth` frames outward from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// How many frames to walk outward.
    pub depth: usize,
    /// The position of the binding within its frame.
    pub index: usize,
}

/// The bindings of a frame, known ahead of running it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    /// A number unique to this scope within a compilation.
    pub id: usize,
    /// The binding names, in slot order.
    pub bindings: Vec<String>,
}

impl Scope {
    /// Construct a scope from its id and initial bindings, dropping duplicates.
    pub fn new(id: usize, names: impl IntoIterator<Item = String>) -> Self {
        let mut scope = Self {
            id,
            bindings: Vec::new(),
        };
        for name in names {
            scope.bind(name);
        }
        scope
    }

    /// Search for the slot index of a binding.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bindings.iter().position(|binding| binding == name)
    }

    /// Get the slot index of a binding, adding it if absent.
    pub fn bind(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        match self.index_of(&name) {
            Some(index) => index,
            None => {
                self.bindings.push(name);
                self.bindings.len() - 1
            }
        }
    }

    /// Get the number of slots of frames built for this scope.
    pub fn size(&self) -> usize {
        self.bindings.len()
    }

    /// Get the hygienic host name of a binding (eg. `v3_total`).
    ///
    /// Language names are identifiers, so they can never contain the `$` of compiler temporaries.
    pub fn host_name(&self, index: usize) -> String {
        format!("v{}_{}", self.id, self.bindings[index])
    }
}

/// An expression over statically resolved slots.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),
    /// A variable read.
    ///
    /// The candidates are the enclosing slots that may hold the name, innermost first.
    /// The first one already assigned wins, then the globals are consulted.
    Load {
        /// The variable's name.
        name: String,
        /// The line of the variable reference.
        line: usize,
        /// The slots that may hold the name.
        candidates: Vec<Slot>,
    },
    /// A definition, always in the current frame.
    Store {
        /// The slot index within the current frame.
        index: usize,
        /// The value to store.
        value: Box<Expr>,
    },
    /// Expressions run in order, yielding the last one.
    Sequence(Vec<Expr>),
    /// A message send.
    Send {
        /// The line of the send.
        line: usize,
        /// The receiver.
        receiver: Box<Expr>,
        /// The message name.
        message: String,
        /// The arguments, evaluated left to right.
        arguments: Vec<Expr>,
    },
    /// An object literal.
    Object(Rc<Object>),
    /// A procedure.
    Procedure(Rc<Callable>),
}

/// An object literal, run in a frame of its own scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// The object frame's scope, `self` being its first binding.
    pub scope: Scope,
    /// The methods, in declaration order (duplicates included).
    pub methods: Vec<(String, Rc<Callable>)>,
    /// The other elements, in declaration order.
    pub elements: Vec<Element>,
}

/// A non-method element of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Copies methods from the value of the expression.
    Decorate(Expr),
    /// A definition in the object frame.
    Define(Expr),
    /// A delegation target, evaluated on each lookup miss.
    Forward(Rc<Expr>),
}

/// A method or procedure body, run in a fresh frame per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Callable {
    /// The call frame's scope.
    pub scope: Scope,
    /// The slot index of each parameter, in order.
    pub parameters: Vec<usize>,
    /// The body.
    pub body: Expr,
}

/// A whole compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The top-level scope.
    pub scope: Scope,
    /// The program's body.
    pub body: Expr,
}
