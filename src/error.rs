//! Error types
//!
//! `GcodeError` describes what went wrong on a single line; `RunError`
//! attaches the line number (or wraps a read failure) for the caller.

use thiserror::Error;

use crate::machine::Axis;

/// Failure while parsing or interpreting one line of G-code
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GcodeError {
    /// A parameter token whose value is not a number (e.g. `X1.2.3`)
    #[error("malformed parameter '{token}'")]
    MalformedParameter { token: String },

    /// A move needs an axis that has never been homed or set
    #[error("axis {axis} is used by a move before its position is known")]
    UndefinedPosition { axis: Axis },

    /// An `F` word below zero
    #[error("negative feed rate {feed_rate}")]
    NegativeFeedRate { feed_rate: f64 },

    /// A move covers some distance but no feed rate has been set yet
    #[error("move of length {distance} issued with a feed rate of zero")]
    ZeroFeedRate { distance: f64 },
}

/// Failure of a whole toolpath run
#[derive(Debug, Error)]
pub enum RunError {
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: GcodeError,
    },

    #[error("failed to read toolpath")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Line number the error occurred on, if it came from interpreting a line
    pub fn line(&self) -> Option<usize> {
        match self {
            RunError::Line { line, .. } => Some(*line),
            RunError::Io(_) => None,
        }
    }

    /// The per-line error kind, if any
    pub fn gcode_error(&self) -> Option<&GcodeError> {
        match self {
            RunError::Line { source, .. } => Some(source),
            RunError::Io(_) => None,
        }
    }
}
