//!
//! This is the compiler for the Facet language.
//!
#![warn(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
#[cfg(feature = "jemalloc")]
use jemallocator::Jemalloc;

use facet_compiler::emit::{self, Module};
use facet_runtime::Error;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Debug, Clone, PartialEq, Parser)]
#[clap(about, author)]
struct Options {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
enum Command {
    /// Compile a file to closures and run it.
    Run {
        /// File to run.
        #[clap(name = "FILE")]
        file: PathBuf,

        /// Add a directory to the module search path.
        #[clap(short = 'I', long = "include")]
        include: Vec<PathBuf>,

        /// Enable verbose output (with timing information).
        #[clap(short = 'v')]
        verbose: bool,
    },
    /// Compile a file to a standalone JavaScript program.
    Emit {
        /// File to compile.
        #[clap(name = "FILE")]
        file: PathBuf,

        /// Bundle a module, for `system.import` to find at run time.
        #[clap(long = "module")]
        modules: Vec<PathBuf>,

        /// Where to write the program, defaults to the standard output.
        #[clap(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

/// Installs the log subscriber, only when `RUST_LOG` asks for logs.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn read_file(file: &Path) -> anyhow::Result<String> {
    fs::read_to_string(file).with_context(|| format!("could not read '{}'", file.display()))
}

fn parse_file(file: &Path) -> anyhow::Result<facet_core::ast::Term> {
    facet_parser::parse_program(&read_file(file)?)
        .with_context(|| format!("could not parse '{}'", file.display()))
}

/// Reports a failed program the way the interpreter does, and exits.
fn fail(err: Error) -> ! {
    eprintln!("ERROR: {}", err);
    std::process::exit(1);
}

fn run(file: PathBuf, include: Vec<PathBuf>, verbose: bool) -> anyhow::Result<()> {
    let mut search_paths = include;
    if let Some(directory) = file.parent() {
        search_paths.push(directory.to_path_buf());
    }
    let program = match facet_parser::parse_program(&read_file(&file)?) {
        Ok(program) => program,
        Err(err) => fail(Error::from(err)),
    };

    let start = Instant::now();
    let compiled = facet_compiler::compile(&program);
    let mut universe = facet_compiler::universe(search_paths);
    let output = compiled.run(&mut universe);
    let elapsed = start.elapsed();
    if verbose {
        eprintln!(
            "Execution time: {} ms ({} µs)",
            elapsed.as_millis(),
            elapsed.as_micros(),
        );
    }

    universe.flush_output()?;
    match output {
        Ok(_) => Ok(()),
        Err(err) => fail(err),
    }
}

fn emit(file: PathBuf, modules: Vec<PathBuf>, output: Option<PathBuf>) -> anyhow::Result<()> {
    let main = facet_compiler::lower(&parse_file(&file)?);

    let mut bundled = Vec::with_capacity(modules.len());
    for module in modules {
        let program = facet_compiler::lower(&parse_file(&module)?);
        let path = module.canonicalize().unwrap_or(module);
        bundled.push(Module {
            path: path.display().to_string(),
            program,
        });
    }

    let script = emit::emit(&main, &bundled);
    match output {
        Some(output) => fs::write(&output, script)
            .with_context(|| format!("could not write '{}'", output.display()))?,
        None => print!("{}", script),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let opts = Options::parse();

    match opts.command {
        Command::Run {
            file,
            include,
            verbose,
        } => run(file, include, verbose),
        Command::Emit {
            file,
            modules,
            output,
        } => emit(file, modules, output),
    }
}
