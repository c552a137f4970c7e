//! Machine state
//!
//! Everything the interpreter knows about the machine while replaying a
//! program: where it is, how fast it moves, which modes are active, and the
//! running totals.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::GcodeError;

/// A linear axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Parameter letter for this axis
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Machine position; an axis is `None` until it is homed or set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl Position {
    /// All axes at zero
    pub fn origin() -> Self {
        Self {
            x: Some(0.0),
            y: Some(0.0),
            z: Some(0.0),
        }
    }

    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = Some(value),
            Axis::Y => self.y = Some(value),
            Axis::Z => self.z = Some(value),
        }
    }

    /// True once every axis has a known coordinate
    pub fn is_known(&self) -> bool {
        Axis::ALL.iter().all(|axis| self.get(*axis).is_some())
    }
}

/// Unit label set by G20/G21
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => f.write_str("metric"),
            UnitSystem::Imperial => f.write_str("imperial"),
        }
    }
}

/// How the `F` word is interpreted when computing move time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FeedUnits {
    /// Distance units per second: `time = distance / F`
    #[default]
    PerSecond,
    /// Distance units per minute, as most slicers emit
    PerMinute,
}

/// What to do when a move needs an axis whose position is unknown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownAxisPolicy {
    /// Fail the run with `UndefinedPosition`
    #[default]
    Error,
    /// Treat the axis as sitting at 0
    Origin,
}

/// Knobs that change how a program is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub feed_units: FeedUnits,
    pub unknown_axes: UnknownAxisPolicy,
}

/// Running totals of a replay; they only ever grow
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub distance: f64,
    pub time: f64,
    pub material_used: f64,
    pub lines_processed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MachineState {
    pub position: Position,
    pub feed_rate: f64,
    /// Absolute extruder coordinate, tracked in both extrusion modes
    pub extruder_position: f64,
    /// Filament pulled back and not yet pushed out again (zero or negative)
    pub retraction_buffer: f64,
    pub unit_system: UnitSystem,
    pub axes_relative: bool,
    pub extruder_relative: bool,
    pub options: RunOptions,
    totals: Totals,
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new(RunOptions::default())
    }
}

impl MachineState {
    pub fn new(options: RunOptions) -> Self {
        Self {
            position: Position::default(),
            feed_rate: 0.0,
            extruder_position: 0.0,
            retraction_buffer: 0.0,
            unit_system: UnitSystem::Metric,
            axes_relative: false,
            extruder_relative: false,
            options,
            totals: Totals::default(),
        }
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Current coordinate of an axis, resolved for use in arithmetic
    ///
    /// Under `UnknownAxisPolicy::Origin` an unknown axis reads as 0; otherwise
    /// it is an `UndefinedPosition` error.
    pub fn resolved(&self, axis: Axis) -> Result<f64, GcodeError> {
        match (self.position.get(axis), self.options.unknown_axes) {
            (Some(value), _) => Ok(value),
            (None, UnknownAxisPolicy::Origin) => Ok(0.0),
            (None, UnknownAxisPolicy::Error) => Err(GcodeError::UndefinedPosition { axis }),
        }
    }

    /// Time needed to travel `distance` at the current feed rate
    pub fn time_for(&self, distance: f64) -> Result<f64, GcodeError> {
        if distance == 0.0 {
            return Ok(0.0);
        }
        if self.feed_rate <= 0.0 {
            return Err(GcodeError::ZeroFeedRate { distance });
        }

        Ok(match self.options.feed_units {
            FeedUnits::PerSecond => distance / self.feed_rate,
            FeedUnits::PerMinute => distance * 60.0 / self.feed_rate,
        })
    }

    pub(crate) fn add_distance(&mut self, distance: f64) {
        if distance > 0.0 {
            self.totals.distance += distance;
        }
    }

    pub(crate) fn add_time(&mut self, seconds: f64) {
        if seconds > 0.0 {
            self.totals.time += seconds;
        }
    }

    pub(crate) fn add_material(&mut self, amount: f64) {
        if amount > 0.0 {
            self.totals.material_used += amount;
        }
    }

    pub(crate) fn count_line(&mut self) {
        self.totals.lines_processed += 1;
    }
}

/// Straight-line distance between two points
pub fn linear_distance(from: [f64; 3], to: [f64; 3]) -> f64 {
    from.iter()
        .zip(to.iter())
        .map(|(a, b)| (b - a).powi(2))
        .sum::<f64>()
        .sqrt()
}
