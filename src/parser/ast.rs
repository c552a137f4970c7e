//! Parsed representation of a GCode line
//!
//! Pure data: which command a line carries, its parameters and its comment.
//! Interpretation lives in `crate::machine`.

use std::fmt;

use crate::error::GcodeError;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::params::{parse_parameters, Parameters};

/// Commands the estimator understands
///
/// Matching is a literal, case-sensitive comparison of the command word:
/// `g1` is not `G1`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// No instruction on the line (blank or comment only)
    Empty,
    /// G0 rapid move
    RapidMove,
    /// G1 linear move
    LinearMove,
    /// G4 dwell
    Dwell,
    /// M0 unconditional stop
    Stop,
    /// M1 optional stop
    OptionalStop,
    /// G28 auto home
    Home,
    /// G92 set position
    SetPosition,
    /// G20 inch units
    Inches,
    /// G21 millimetre units
    Millimeters,
    /// M400 wait for moves to finish
    FinishMoves,
    /// M82 absolute extrusion
    ExtruderAbsolute,
    /// M83 relative extrusion
    ExtruderRelative,
    /// G90 absolute positioning
    AbsolutePositioning,
    /// G91 relative positioning
    RelativePositioning,
    /// Anything else; ignored by the interpreter
    Unrecognized(String),
}

impl Command {
    /// Look up a command word
    pub fn from_word(word: &str) -> Self {
        match word {
            "" => Command::Empty,
            "G0" => Command::RapidMove,
            "G1" => Command::LinearMove,
            "G4" => Command::Dwell,
            "M0" => Command::Stop,
            "M1" => Command::OptionalStop,
            "G28" => Command::Home,
            "G92" => Command::SetPosition,
            "G20" => Command::Inches,
            "G21" => Command::Millimeters,
            "M400" => Command::FinishMoves,
            "M82" => Command::ExtruderAbsolute,
            "M83" => Command::ExtruderRelative,
            "G90" => Command::AbsolutePositioning,
            "G91" => Command::RelativePositioning,
            other => Command::Unrecognized(other.to_string()),
        }
    }

    /// The command word as written in a program
    pub fn word(&self) -> &str {
        match self {
            Command::Empty => "",
            Command::RapidMove => "G0",
            Command::LinearMove => "G1",
            Command::Dwell => "G4",
            Command::Stop => "M0",
            Command::OptionalStop => "M1",
            Command::Home => "G28",
            Command::SetPosition => "G92",
            Command::Inches => "G20",
            Command::Millimeters => "G21",
            Command::FinishMoves => "M400",
            Command::ExtruderAbsolute => "M82",
            Command::ExtruderRelative => "M83",
            Command::AbsolutePositioning => "G90",
            Command::RelativePositioning => "G91",
            Command::Unrecognized(word) => word,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// A parsed line of GCode
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub command: Command,
    pub parameters: Parameters,
    /// Text after the first `;`, trimmed; empty when there is none
    pub comment: String,
}

impl ParsedLine {
    /// A line without any instruction
    pub fn is_empty(&self) -> bool {
        self.command == Command::Empty
    }
}

/// Convert tokens into a parsed line
///
/// Parameter words are parsed to numbers here, so a malformed value fails
/// the whole line.
pub fn tokens_to_parsed_line(tokens: &[Token<'_>]) -> Result<ParsedLine, GcodeError> {
    let command = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Command)
        .map(|t| Command::from_word(t.text))
        .unwrap_or(Command::Empty);

    let parameters = parse_parameters(
        tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Parameter)
            .map(|t| t.text),
    )?;

    let comment = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Comment)
        .map(|t| t.text.to_string())
        .unwrap_or_default();

    Ok(ParsedLine {
        command,
        parameters,
        comment,
    })
}
