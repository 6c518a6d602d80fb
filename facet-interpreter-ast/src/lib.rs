//!
//! This is the tree-walking interpreter for the Facet language.
//!
#![warn(missing_docs)]

use std::path::PathBuf;
use std::rc::Rc;

use facet_core::ast::Term;
use facet_runtime::invokable::Backend;
use facet_runtime::{Error, Universe, Value};

/// Facilities for evaluating terms.
pub mod evaluate;
/// Facilities for manipulating environment frames.
pub mod frame;
/// Facilities for invoking methods, procedures and forwards built by the evaluator.
pub mod invokable;
/// The interactive shell.
pub mod shell;

use crate::evaluate::Evaluate;
use crate::frame::Frame;

/// The tree-walking execution strategy, running terms directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeWalker;

impl Backend for TreeWalker {
    fn execute(&self, universe: &mut Universe, program: &Term) -> Result<Value, Error> {
        let frame = Frame::root();
        program.evaluate(universe, &frame)
    }
}

/// Construct a universe running its modules with the tree-walking interpreter.
pub fn universe(search_paths: Vec<PathBuf>) -> Universe {
    Universe::with_search_paths(Rc::new(TreeWalker), search_paths)
}
