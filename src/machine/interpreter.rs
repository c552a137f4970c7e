//! Command interpreter
//!
//! Applies one parsed line to the machine state. Each recognized command has
//! a handler; unrecognized commands are skipped.

use crate::error::GcodeError;
use crate::machine::state::{linear_distance, Axis, MachineState, Position, UnitSystem};
use crate::parser::{Command, Parameters, ParsedLine};

/// Apply a parsed line to the machine state
///
/// Does not count the line; that is the runner's job.
pub fn execute(state: &mut MachineState, line: &ParsedLine) -> Result<(), GcodeError> {
    let params = &line.parameters;

    match &line.command {
        Command::Empty => {}
        Command::RapidMove | Command::LinearMove => linear_move(state, params)?,
        Command::Dwell | Command::Stop | Command::OptionalStop => dwell(state, params),
        Command::Home => home(state, params),
        Command::SetPosition => set_position(state, params),
        Command::Inches => state.unit_system = UnitSystem::Imperial,
        Command::Millimeters => state.unit_system = UnitSystem::Metric,
        Command::FinishMoves => {}
        Command::ExtruderAbsolute => state.extruder_relative = false,
        Command::ExtruderRelative => state.extruder_relative = true,
        Command::AbsolutePositioning => {
            state.axes_relative = false;
            state.extruder_relative = false;
        }
        Command::RelativePositioning => {
            state.axes_relative = true;
            state.extruder_relative = true;
        }
        Command::Unrecognized(word) => {
            log::debug!("Ignoring unsupported command '{}'", word);
        }
    }

    Ok(())
}

/// G0/G1: straight move, optionally extruding
///
/// Only axes named on the line take part in the distance; an unnamed axis
/// keeps its coordinate, known or not.
fn linear_move(state: &mut MachineState, params: &Parameters) -> Result<(), GcodeError> {
    if let Some(feed) = params.get('F') {
        if feed < 0.0 {
            return Err(GcodeError::NegativeFeedRate { feed_rate: feed });
        }
        state.feed_rate = feed;
    }

    let mut from = [0.0; 3];
    let mut to = [0.0; 3];
    let mut targets = Vec::with_capacity(3);

    for (idx, axis) in Axis::ALL.into_iter().enumerate() {
        let Some(value) = params.get(axis.letter()) else {
            continue;
        };

        let current = state.resolved(axis)?;
        let target = if state.axes_relative {
            current + value
        } else {
            value
        };

        from[idx] = current;
        to[idx] = target;
        targets.push((axis, target));
    }

    let distance = linear_distance(from, to);
    let time = state.time_for(distance)?;

    state.add_distance(distance);
    state.add_time(time);
    for (axis, target) in targets {
        state.position.set(axis, target);
    }

    log::debug!(
        "Move of {:.4} at feed {} took {:.4}s, now at {:?}",
        distance,
        state.feed_rate,
        time,
        state.position
    );

    if let Some(e) = params.get('E') {
        extrude(state, e);
    }

    Ok(())
}

/// Account for material fed by an `E` word
///
/// Retracted filament has to be pushed back out before any further feed
/// counts as material used.
fn extrude(state: &mut MachineState, value: f64) {
    let delta = if state.extruder_relative {
        value
    } else {
        value - state.extruder_position
    };

    state.extruder_position += delta;

    let candidate = delta + state.retraction_buffer;
    if candidate <= 0.0 {
        state.retraction_buffer = candidate;
    } else {
        state.retraction_buffer = 0.0;
        state.add_material(candidate);
    }

    log::trace!(
        "Extruder delta {} (buffer {}, E at {})",
        delta,
        state.retraction_buffer,
        state.extruder_position
    );
}

/// G4/M0/M1: pause for `S` seconds or `P` milliseconds
fn dwell(state: &mut MachineState, params: &Parameters) {
    let seconds = match (params.get('S'), params.get('P')) {
        (Some(s), _) => s,
        (None, Some(p)) => p / 1000.0,
        (None, None) => return,
    };

    if seconds < 0.0 {
        log::warn!("Ignoring negative dwell of {}s", seconds);
        return;
    }

    state.add_time(seconds);
}

/// G28: home some or all axes to zero
fn home(state: &mut MachineState, params: &Parameters) {
    if params.contains('O') {
        if state.position.is_known() {
            log::debug!("G28 O: position already known, skipping homing");
        } else {
            state.position = Position::origin();
        }
        return;
    }

    let named: Vec<Axis> = Axis::ALL
        .into_iter()
        .filter(|axis| params.contains(axis.letter()))
        .collect();

    if named.is_empty() {
        state.position = Position::origin();
    } else {
        for axis in named {
            state.position.set(axis, 0.0);
        }
    }
}

/// G92: redefine the current coordinates without moving
fn set_position(state: &mut MachineState, params: &Parameters) {
    for axis in Axis::ALL {
        if let Some(value) = params.get(axis.letter()) {
            state.position.set(axis, value);
        }
    }

    if let Some(e) = params.get('E') {
        state.extruder_position = e;
    }
}
