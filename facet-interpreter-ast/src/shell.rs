use std::time::Instant;

use facet_runtime::{Error, Universe, Value};

use crate::evaluate::Evaluate;
use crate::frame::Frame;

/// Launches an interactive Read-Eval-Print-Loop within the given universe.
///
/// Lines are read from the universe's input source, the same one `console.readLine` reads
/// from, and everything is written to its output sink.
/// Every line runs in the same top-level frame, `it` holds the previous result.
pub fn interactive(universe: &mut Universe, verbose: bool) -> Result<(), Error> {
    let frame = Frame::root();
    let mut counter = 0;
    let mut last_value = Value::Nil;
    loop {
        universe.write_output(&format!("({}) Facet | ", counter))?;
        let line = match universe.read_input_line()? {
            Some(line) => line,
            None => {
                universe.write_output("exit\n")?;
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            break;
        }

        let start = Instant::now();
        let program = match facet_parser::parse_program(line) {
            Ok(program) => program,
            Err(err) => {
                universe.write_output(&format!("ERROR: {}\n", Error::from(err)))?;
                continue;
            }
        };
        let elapsed = start.elapsed();
        if verbose {
            universe.write_output(&format!(
                "Parsing time: {} ms ({} µs)\n",
                elapsed.as_millis(),
                elapsed.as_micros(),
            ))?;
        }

        let start = Instant::now();
        frame.define("it", last_value.clone());
        let output = program.evaluate(universe, &frame);
        let elapsed = start.elapsed();
        if verbose {
            universe.write_output(&format!(
                "Execution time: {} ms ({} µs)\n\n",
                elapsed.as_millis(),
                elapsed.as_micros(),
            ))?;
        }

        match output {
            Ok(value) => {
                universe.write_output(&format!("returned: {} ({})\n", value, value.kind()))?;
                last_value = value;
            }
            Err(err) => universe.write_output(&format!("ERROR: {}\n", err))?,
        }
        counter += 1;
    }

    universe.flush_output()
}
