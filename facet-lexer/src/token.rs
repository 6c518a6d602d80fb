use std::fmt;

/// Represents the kind of a token from the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// An opening parenthesis (`(`).
    NewTerm,
    /// A closing parenthesis (`)`).
    EndTerm,
    /// An opening curly brace (`{`).
    NewObject,
    /// A closing curly brace (`}`).
    EndObject,
    /// A comma, the argument separator (`,`).
    Comma,
    /// A semicolon, the statement separator (`;`).
    Semicolon,
    /// A dot, introducing a message send (`.`).
    Dot,
    /// A lone equal sign, the definition operator (`=`).
    Equal,
    /// The method keyword (`method`).
    Method,
    /// The decorate keyword (`decorate`).
    Decorate,
    /// The forward keyword (`forward`).
    Forward,
    /// The procedure keyword (`fn`).
    Fn,
    /// A number literal (`10` or `10.6`).
    LitNumber(f64),
    /// A string literal (`'hello, world'`).
    LitString(String),
    /// An identifier (`foo`).
    Identifier(String),
    /// A sequence of operator characters (eg: `+`, `<=`, `==`).
    Operator(String),
    /// A comment (`"what a beautiful and majestic piece of code"`).
    Comment(String),
    /// Some whitespace (` `).
    Whitespace,
}

/// Represents a token from the lexer, along with the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub symbol: Symbol,
    /// The 1-based line this token starts on.
    pub line: usize,
}

impl Token {
    /// Construct a token from its symbol and line.
    pub fn new(symbol: Symbol, line: usize) -> Self {
        Self { symbol, line }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewTerm => write!(f, "'('"),
            Self::EndTerm => write!(f, "')'"),
            Self::NewObject => write!(f, "'{{'"),
            Self::EndObject => write!(f, "'}}'"),
            Self::Comma => write!(f, "','"),
            Self::Semicolon => write!(f, "';'"),
            Self::Dot => write!(f, "'.'"),
            Self::Equal => write!(f, "'='"),
            Self::Method => write!(f, "keyword 'method'"),
            Self::Decorate => write!(f, "keyword 'decorate'"),
            Self::Forward => write!(f, "keyword 'forward'"),
            Self::Fn => write!(f, "keyword 'fn'"),
            Self::LitNumber(value) => write!(f, "number {}", value),
            Self::LitString(value) => write!(f, "string '{}'", value),
            Self::Identifier(name) => write!(f, "identifier '{}'", name),
            Self::Operator(op) => write!(f, "operator '{}'", op),
            Self::Comment(_) => write!(f, "comment"),
            Self::Whitespace => write!(f, "whitespace"),
        }
    }
}
