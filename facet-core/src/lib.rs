//!
//! This crate contains common types that are useful to be shared across multiple tools when manipulating Facet programs.
//!

/// The Facet Abstract Syntax Term definitions.
pub mod ast;
