//!
//! This is the tree-walking interpreter for the Facet language.
//!
#![warn(missing_docs)]

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
#[cfg(feature = "jemalloc")]
use jemallocator::Jemalloc;

use facet_interpreter_ast::shell;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Debug, Clone, PartialEq, Parser)]
#[clap(about, author)]
struct Options {
    /// File to evaluate, starts a shell when absent.
    #[clap(name = "FILE")]
    file: Option<PathBuf>,

    /// Add a directory to the module search path.
    #[clap(short = 'I', long = "include")]
    include: Vec<PathBuf>,

    /// Enable verbose output (with timing information).
    #[clap(short = 'v')]
    verbose: bool,
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

fn main() -> anyhow::Result<()> {
    init_tracing();
    let opts = Options::parse();

    match opts.file {
        None => {
            let mut universe = facet_interpreter_ast::universe(opts.include);
            shell::interactive(&mut universe, opts.verbose)?
        }
        Some(file) => {
            let mut search_paths = opts.include;
            if let Some(directory) = file.parent() {
                search_paths.push(directory.to_path_buf());
            }

            let source = fs::read_to_string(&file)
                .with_context(|| format!("could not read '{}'", file.display()))?;

            let start = Instant::now();
            let mut universe = facet_interpreter_ast::universe(search_paths);
            let output = universe.run_source(&source);
            let elapsed = start.elapsed();
            if opts.verbose {
                eprintln!(
                    "Execution time: {} ms ({} µs)",
                    elapsed.as_millis(),
                    elapsed.as_micros(),
                );
            }

            universe.flush_output()?;
            if let Err(err) = output {
                eprintln!("ERROR: {}", err);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
