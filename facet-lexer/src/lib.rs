//!
//! The Facet Lexical Analyser
//! ==========================
//!
//! This crate serves as the lexical analyser for the Facet language.
//!

mod lexer;
mod token;

pub use crate::lexer::Lexer;
pub use crate::token::{Symbol, Token};
