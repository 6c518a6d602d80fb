use std::rc::Rc;

/// Represents a term, the single node type of a Facet program.
///
/// Every term remembers the source line of its first token, for diagnostics.
///
/// Example:
/// ```text
/// "sequence of a define and a send"
/// x = 1;
/// x + 2
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// The 1-based source line this term starts on.
    pub line: usize,
    /// What kind of term this is.
    pub kind: TermKind,
}

/// The different kinds of terms.
#[derive(Debug, Clone, PartialEq)]
pub enum TermKind {
    /// A reference to a binding (eg. `counter`).
    Variable(String),
    /// A literal (eg. `'foo'`, `10`, `true`, `nil`).
    Literal(Literal),
    /// A message send (eg. `counter.add(5)` or `counter + 5`).
    Send(Send),
    /// Statements evaluated in order, yielding the last one (eg. `(a = 1; a + 1)`).
    Sequence(Vec<Term>),
    /// A binding introduced in the enclosing scope (eg. `counter = 10`).
    Define(Define),
    /// An object literal (eg. `{ method get() { 42 } }`).
    Object(Rc<Object>),
    /// A procedure, a single-method object answering `call` (eg. `fn(x) { x * 2 }`).
    Procedure(Rc<Procedure>),
}

/// Represents a message send.
///
/// Exemple:
/// ```text
/// "unary message send"
/// 'hello, world'.size
///
/// "message send with arguments"
/// range.from(0, 10)
///
/// "binary operator message send"
/// value == 3
///
/// "procedure call (sends `call`)"
/// double(21)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Send {
    /// The object to which the message is sent to.
    pub receiver: Box<Term>,
    /// The name of the message (eg. "size", "+", "call").
    pub message: String,
    /// The argument terms, evaluated left to right before dispatch.
    pub arguments: Vec<Term>,
}

/// Represents a definition.
///
/// Exemple:
/// ```text
/// counter = 10
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Define {
    /// The name being bound.
    pub name: String,
    /// The value to bind.
    pub value: Box<Term>,
}

/// Represents an object literal.
///
/// Exemple:
/// ```text
/// {
///     total = Cell.new(0);
///     method add(n) { total.set(total.get + n) };
///     decorate 'a string';
///     forward fallback
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// The object's elements, in declaration order.
    pub elements: Vec<Element>,
}

/// Represents an element of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A message handler (eg. `method get() { 42 }`).
    Method(Rc<Method>),
    /// Copies methods from another value (eg. `decorate comparable`).
    Decorate(Term),
    /// A binding in the object's own scope (eg. `total = 0`).
    Define(Define),
    /// Delegates messages the object does not understand (eg. `forward parent`).
    Forward(Rc<Term>),
}

/// Represents a method definition.
///
/// Example:
/// ```text
/// "unary method"       method increment() { self.add(1) }
/// "method with args"   method add(value) { total.set(total.get + value) }
/// "operator method"    method +(other) { self.add(other) }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    /// The 1-based source line of the `method` keyword.
    pub line: usize,
    /// The message this method answers to (eg. `add` or `+`).
    pub signature: String,
    /// The binding names for the method's parameters.
    pub parameters: Vec<String>,
    /// The method's body.
    pub body: Term,
}

/// Represents a procedure.
///
/// Exemple:
/// ```text
/// fn(value) { value * 2 }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    /// The binding names for the procedure's parameters.
    pub parameters: Vec<String>,
    /// The procedure's body.
    pub body: Term,
}

/// Represents a literal.
///
/// Exemple:
/// ```text
/// 'hello'  "string literal"
/// 3.14     "number literal"
/// true     "boolean literal"
/// nil      "nil literal"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Represents a number literal (eg. `42` or `3.14`).
    Number(f64),
    /// Represents a string literal (eg. `'hello'`).
    String(String),
    /// Represents a boolean literal (eg. `true`).
    Boolean(bool),
    /// Represents the `nil` literal.
    Nil,
}

impl Term {
    /// Construct a term from its line and kind.
    pub fn new(line: usize, kind: TermKind) -> Self {
        Self { line, kind }
    }

    /// Construct a variable reference.
    pub fn variable(line: usize, name: impl Into<String>) -> Self {
        Self::new(line, TermKind::Variable(name.into()))
    }

    /// Construct a literal.
    pub fn literal(line: usize, literal: Literal) -> Self {
        Self::new(line, TermKind::Literal(literal))
    }

    /// Construct a number literal.
    pub fn number(line: usize, value: f64) -> Self {
        Self::literal(line, Literal::Number(value))
    }

    /// Construct a string literal.
    pub fn string(line: usize, value: impl Into<String>) -> Self {
        Self::literal(line, Literal::String(value.into()))
    }

    /// Construct a message send.
    pub fn send(
        line: usize,
        receiver: Term,
        message: impl Into<String>,
        arguments: Vec<Term>,
    ) -> Self {
        Self::new(
            line,
            TermKind::Send(Send {
                receiver: Box::new(receiver),
                message: message.into(),
                arguments,
            }),
        )
    }

    /// Construct a sequence.
    pub fn sequence(line: usize, statements: Vec<Term>) -> Self {
        Self::new(line, TermKind::Sequence(statements))
    }

    /// Construct a definition.
    pub fn define(line: usize, name: impl Into<String>, value: Term) -> Self {
        Self::new(
            line,
            TermKind::Define(Define {
                name: name.into(),
                value: Box::new(value),
            }),
        )
    }

    /// Construct an object literal.
    pub fn object(line: usize, elements: Vec<Element>) -> Self {
        Self::new(line, TermKind::Object(Rc::new(Object { elements })))
    }

    /// Construct a procedure.
    pub fn procedure(line: usize, parameters: Vec<String>, body: Term) -> Self {
        Self::new(
            line,
            TermKind::Procedure(Rc::new(Procedure { parameters, body })),
        )
    }
}

impl Element {
    /// Construct a method element.
    pub fn method(
        line: usize,
        signature: impl Into<String>,
        parameters: Vec<String>,
        body: Term,
    ) -> Self {
        Self::Method(Rc::new(Method {
            line,
            signature: signature.into(),
            parameters,
            body,
        }))
    }

    /// Construct a define element.
    pub fn define(name: impl Into<String>, value: Term) -> Self {
        Self::Define(Define {
            name: name.into(),
            value: Box::new(value),
        })
    }
}
