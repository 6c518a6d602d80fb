//!
//! This crate serves as the syntactical analyser (parser) for the Facet language.
//!
//! It works with the tokens outputted by the lexical analyser, instead of directly reading text.
//!

/// Generic parser combinators.
pub mod combinators;
/// Facet-specific parser combinators.
pub mod lang;
/// Parser combinator primitives.
pub mod parser;

pub use crate::parser::Parser;

use facet_core::ast::Term;
use facet_lexer::{Lexer, Token};

/// A failure to turn source text into a program.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// The line where parsing stopped.
    pub line: usize,
    /// What went wrong.
    pub message: String,
}

/// Applies a parser on a whole token stream, failing if some of it is left unparsed.
pub fn apply<'a, T>(parser: impl Parser<'a, T>, input: &'a [Token]) -> Option<T> {
    match parser.parse(input) {
        Some((value, rest)) if rest.is_empty() => Some(value),
        _ => None,
    }
}

/// Parses the input of an entire source file into a program.
pub fn parse_program(source: &str) -> Result<Term, ParseError> {
    let mut lexer = Lexer::new(source)
        .skip_comments(true)
        .skip_whitespace(true);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    let rest = lexer.text();
    if let Some(ch) = rest.chars().next() {
        return Err(ParseError {
            line: lexer.line(),
            message: format!("unrecognised input starting at '{}'", ch),
        });
    }

    let (statements, rest) = lang::statements()
        .parse(tokens.as_slice())
        .unwrap_or((Vec::new(), tokens.as_slice()));
    match rest.first() {
        None => Ok(Term::sequence(1, statements)),
        Some(token) => Err(ParseError {
            line: token.line,
            message: format!("unexpected {}", token.symbol),
        }),
    }
}
