//!
//! This is the compiler for the Facet language.
//!
//! Programs are first lowered to an IR where every variable is resolved to the frame slots
//! that may hold it. The IR is then either turned into nested closures, run against the same
//! runtime as the tree-walking interpreter, or emitted as a standalone JavaScript program.
//!
#![warn(missing_docs)]

use std::path::PathBuf;
use std::rc::Rc;

use tracing::debug;

use facet_core::ast::Term;
use facet_runtime::invokable::Backend;
use facet_runtime::{Error, Universe, Value};

/// Closure generation from the IR.
pub mod codegen;
/// JavaScript emission from the IR.
pub mod emit;
/// Slot-based environment frames for compiled code.
pub mod frame;
/// The slot-resolved intermediate representation.
pub mod ir;
/// Scope analysis, from terms to the IR.
pub mod lower;

use crate::codegen::Code;
use crate::frame::Frame;
use crate::ir::Program;
use crate::lower::Lowerer;

/// A program compiled to closures.
pub struct Compiled {
    size: usize,
    code: Code,
}

impl Compiled {
    /// Runs the program in a fresh top-level frame.
    pub fn run(&self, universe: &mut Universe) -> Result<Value, Error> {
        let frame = Frame::root(self.size);
        (self.code)(universe, &frame)
    }
}

/// Lower a program to the IR.
pub fn lower(program: &Term) -> Program {
    let mut lowerer = Lowerer::new();
    let program = lowerer.lower_program(program);
    debug!(
        scopes = lowerer.scope_count(),
        top_level = program.scope.size(),
        "lowered program"
    );
    program
}

/// Compile a program to closures.
pub fn compile(program: &Term) -> Compiled {
    let program = lower(program);
    Compiled {
        size: program.scope.size(),
        code: codegen::generate(&program.body),
    }
}

/// The compiling execution strategy, running programs as generated closures.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosureBackend;

impl Backend for ClosureBackend {
    fn execute(&self, universe: &mut Universe, program: &Term) -> Result<Value, Error> {
        compile(program).run(universe)
    }
}

/// Construct a universe running its modules with compiled closures.
pub fn universe(search_paths: Vec<PathBuf>) -> Universe {
    Universe::with_search_paths(Rc::new(ClosureBackend), search_paths)
}
