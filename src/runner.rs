//! Toolpath runner
//!
//! Feeds a program through the parser and interpreter one line at a time and
//! hands back the final estimate. Lines are streamed, so programs of any size
//! can be processed without loading them into memory.

use std::io::BufRead;

use serde::Serialize;

use crate::error::RunError;
use crate::machine::{execute, MachineState, Position, RunOptions, UnitSystem};
use crate::parser::parse_line;

/// Final result of replaying a toolpath
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub lines_processed: usize,
    pub total_distance: f64,
    /// Seconds
    pub total_time: f64,
    pub total_material_used: f64,
    pub unit_system: UnitSystem,
    pub final_position: Position,
}

/// Drives one run over one program
///
/// Each runner owns its machine state; estimate several programs by using
/// one runner per program.
#[derive(Debug, Default)]
pub struct ToolpathRunner {
    state: MachineState,
}

impl ToolpathRunner {
    pub fn new(options: RunOptions) -> Self {
        Self {
            state: MachineState::new(options),
        }
    }

    /// Parse and interpret one line
    ///
    /// The line is counted even when it carries no command.
    pub fn process_line(&mut self, line: &str) -> Result<(), RunError> {
        self.state.count_line();
        let line_no = self.state.totals().lines_processed;
        log::trace!("{:>6}: {}", line_no, line);

        parse_line(line)
            .and_then(|parsed| execute(&mut self.state, &parsed))
            .map_err(|source| RunError::Line {
                line: line_no,
                source,
            })
    }

    /// Process every line of a reader
    ///
    /// Bytes that are not valid UTF-8 (Latin-1 comments from some slicers)
    /// are replaced rather than failing the run.
    pub fn run<R: BufRead>(&mut self, mut reader: R) -> Result<(), RunError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }

            let raw = buf.strip_suffix(b"\n").unwrap_or(&buf);
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            self.process_line(&String::from_utf8_lossy(raw))?;
        }
    }

    /// Process every line of an in-memory sequence
    pub fn run_lines<I, S>(&mut self, lines: I) -> Result<(), RunError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.process_line(line.as_ref())?;
        }
        Ok(())
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Consume the runner and report its totals
    pub fn finish(self) -> Estimate {
        let totals = self.state.totals();
        Estimate {
            lines_processed: totals.lines_processed,
            total_distance: totals.distance,
            total_time: totals.time,
            total_material_used: totals.material_used,
            unit_system: self.state.unit_system,
            final_position: self.state.position,
        }
    }
}

/// Estimate a whole program read from `reader`
pub fn estimate<R: BufRead>(reader: R, options: RunOptions) -> Result<Estimate, RunError> {
    let mut runner = ToolpathRunner::new(options);
    runner.run(reader)?;
    let estimate = runner.finish();
    log::debug!("Finished after {} lines", estimate.lines_processed);
    Ok(estimate)
}
