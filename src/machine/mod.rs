//! Machine model
//!
//! The state being tracked and the interpreter that updates it.

pub mod interpreter;
pub mod state;

pub use interpreter::execute;
pub use state::{
    linear_distance, Axis, FeedUnits, MachineState, Position, RunOptions, Totals, UnitSystem,
    UnknownAxisPolicy,
};
