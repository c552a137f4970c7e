//! End-to-end behaviour of the estimator through its public API
use std::io::Cursor;

use gcode_estimate::machine::{FeedUnits, Position, UnitSystem, UnknownAxisPolicy};
use gcode_estimate::parser::Command;
use gcode_estimate::{estimate, parse_line, GcodeError, RunOptions, ToolpathRunner};

fn run(program: &str) -> gcode_estimate::Estimate {
    estimate(Cursor::new(program), RunOptions::default()).expect("program should run")
}

#[test]
fn test_line_without_comment() {
    for line in ["G1 X1 Y2", "  G28  ", "M104 S200"] {
        let parsed = parse_line(line).unwrap();
        assert_eq!(parsed.comment, "");
        assert_eq!(parsed.command.word(), line.split_whitespace().next().unwrap());
    }
}

#[test]
fn test_comment_only_lines() {
    for (line, comment) in [(";", ""), ("; layer 3 ", "layer 3"), (";G1 X10", "G1 X10")] {
        let parsed = parse_line(line).unwrap();
        assert_eq!(parsed.command, Command::Empty);
        assert!(parsed.parameters.is_empty());
        assert_eq!(parsed.comment, comment);
    }
}

#[test]
fn test_single_move_from_origin() {
    let mut runner = ToolpathRunner::default();
    runner.run_lines(["G28", "G1 F100 X10"]).unwrap();

    assert_eq!(
        runner.state().position,
        Position {
            x: Some(10.0),
            y: Some(0.0),
            z: Some(0.0),
        }
    );

    let estimate = runner.finish();
    assert_eq!(estimate.total_distance, 10.0);
    assert_eq!(estimate.total_time, 0.1);
}

#[test]
fn test_retraction_sequence() {
    let mut runner = ToolpathRunner::default();
    runner.run_lines(["M83", "G1 E-2", "G1 E1"]).unwrap();
    assert_eq!(runner.state().totals().material_used, 0.0);
    assert_eq!(runner.state().retraction_buffer, -1.0);

    // back to absolute extrusion: E3 from E1 is a delta of 2
    runner.run_lines(["M82", "G92 E1", "G1 E3"]).unwrap();
    assert_eq!(runner.state().totals().material_used, 1.0);
    assert_eq!(runner.state().retraction_buffer, 0.0);
}

#[test]
fn test_home_without_parameters() {
    let estimate = run("G28\n");
    assert_eq!(estimate.final_position, Position::origin());
    assert_eq!(estimate.total_distance, 0.0);
    assert_eq!(estimate.total_time, 0.0);
}

#[test]
fn test_optional_home() {
    let known = run("G92 X1 Y2 Z3\nG28 O\n");
    assert_eq!(
        known.final_position,
        Position {
            x: Some(1.0),
            y: Some(2.0),
            z: Some(3.0),
        }
    );

    let partial = run("G92 X1 Y2\nG28 O\n");
    assert_eq!(partial.final_position, Position::origin());
}

#[test]
fn test_independent_mode_toggles() {
    let mut runner = ToolpathRunner::default();
    runner.run_lines(["G90", "M83"]).unwrap();
    assert!(!runner.state().axes_relative);
    assert!(runner.state().extruder_relative);
}

#[test]
fn test_runs_are_deterministic() {
    let program = "\
G21
G90
M82
G28
G1 Z0.3 F50
G1 X20 Y20 E1.5 F30
G1 E0.5 ; retract
G0 X40 F120
G1 Y40 E2.5 F30
G4 P250
";
    let first = run(program);
    let second = run(program);
    assert_eq!(first, second);
}

#[test]
fn test_small_print() {
    let program = "\
; generated for testing
G21 ; millimetres
G90
M83
G28
G1 Z5 F10
G1 X30 Y40 F50 ; travel
G1 X60 Y80 E2 F25
G1 E-1 ; retract
G0 X60 Y0 F100
G1 E0.5 ; partial unretract
G1 E1.5
G4 S1.5
M400
M84 ; motors off
";
    let estimate = run(program);

    assert_eq!(estimate.lines_processed, 15);
    // 5 + 50 + 50 + 80
    assert_eq!(estimate.total_distance, 185.0);
    // 0.5 + 1 + 2 + 0.8 + 1.5
    assert!((estimate.total_time - 5.8).abs() < 1e-9);
    // 2 extruded, 1 retracted, 0.5 + 1.5 pushed back = 1 net new
    assert_eq!(estimate.total_material_used, 3.0);
    assert_eq!(estimate.unit_system, UnitSystem::Metric);
    assert_eq!(
        estimate.final_position,
        Position {
            x: Some(60.0),
            y: Some(0.0),
            z: Some(5.0),
        }
    );
}

#[test]
fn test_per_minute_feed_units() {
    let options = RunOptions {
        feed_units: FeedUnits::PerMinute,
        ..RunOptions::default()
    };
    let estimate = estimate(Cursor::new("G28\nG1 X100 F1200\n"), options).unwrap();
    assert_eq!(estimate.total_time, 5.0);
}

#[test]
fn test_undefined_position_fails_run() {
    let err = estimate(Cursor::new("; no homing\nG1 X10 F100\n"), RunOptions::default())
        .unwrap_err();

    assert_eq!(err.line(), Some(2));
    assert!(matches!(
        err.gcode_error(),
        Some(GcodeError::UndefinedPosition { .. })
    ));
}

#[test]
fn test_unknown_axes_as_origin() {
    let options = RunOptions {
        unknown_axes: UnknownAxisPolicy::Origin,
        ..RunOptions::default()
    };
    let estimate = estimate(Cursor::new("G1 X6 Y8 F10\n"), options).unwrap();
    assert_eq!(estimate.total_distance, 10.0);
    assert_eq!(estimate.total_time, 1.0);
}

#[test]
fn test_zero_feed_rate_fails_run() {
    let err = estimate(Cursor::new("G28\nG1 X10\n"), RunOptions::default()).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert_eq!(
        err.gcode_error(),
        Some(&GcodeError::ZeroFeedRate { distance: 10.0 })
    );
}

#[test]
fn test_negative_feed_rate_fails_run() {
    let err = estimate(Cursor::new("G28\nG1 F-100 X10\n"), RunOptions::default()).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.to_string(), "line 2: negative feed rate -100");
}

#[test]
fn test_malformed_parameter_fails_run() {
    let err = estimate(Cursor::new("G28\nG1 X1e F10\n"), RunOptions::default()).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.to_string(), "line 2: malformed parameter 'X1e'");
}

#[test]
fn test_totals_never_decrease_over_a_run() {
    let lines = [
        "G28", "G1 F60 X10", "G4 S-5", "G1 E-3", "G92 E0", "G1 X0 E1", "G91", "G1 X-5",
    ];
    let mut runner = ToolpathRunner::default();
    let mut previous = runner.state().totals();

    for line in lines {
        runner.process_line(line).unwrap();
        let current = runner.state().totals();
        assert!(current.distance >= previous.distance);
        assert!(current.time >= previous.time);
        assert!(current.material_used >= previous.material_used);
        assert!(current.lines_processed > previous.lines_processed);
        previous = current;
    }
}
