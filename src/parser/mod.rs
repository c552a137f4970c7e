//! GCode Parser
//!
//! Line-oriented: every line is parsed on its own, without context from the
//! lines before it.

pub mod ast;
pub mod lexer;
pub mod params;

pub use ast::{Command, ParsedLine};
pub use lexer::{split_comment, tokenize_line, Token, TokenKind};
pub use params::{parse_parameters, Parameters};

use crate::error::GcodeError;

/// Parse a single line of GCode into structured data
///
/// This is the main entry point for parsing. It tokenizes the line
/// and builds a `ParsedLine`; parameter values that are not numbers are
/// reported as `GcodeError::MalformedParameter`.
pub fn parse_line(line: &str) -> Result<ParsedLine, GcodeError> {
    let tokens = lexer::tokenize_line(line);
    ast::tokens_to_parsed_line(&tokens)
}
