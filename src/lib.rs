//! G-code cost estimator
//!
//! Replays a G-code toolpath without hardware and reports how far the machine
//! travels, how long it takes and how much material it feeds.
//!
//! This library provides:
//! - Line parsing into commands, parameters and comments
//! - A machine model tracking position, feed rate and positioning modes
//! - Retraction-aware material accounting
//! - A streaming runner over any `BufRead` source
//! - Configuration and report formatting for the command-line tool

pub mod config;
pub mod error;
pub mod machine;
pub mod parser;
pub mod report;
pub mod runner;

// Re-exports for clean public API
pub use config::Config;
pub use error::{GcodeError, RunError};
pub use machine::{MachineState, RunOptions};
pub use parser::{parse_line, ParsedLine};
pub use runner::{estimate, Estimate, ToolpathRunner};
