//! GCode Lexer
//!
//! Splits a raw line into its command word, parameter words and comment.
//! Tokens borrow from the input line; nothing is allocated besides the vector.

/// Token types in GCode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// First word of the instruction, e.g. "G1", "M104"
    Command,
    /// Any following word, e.g. "X10", "S255"
    Parameter,
    /// Text after the first `;`, trimmed
    Comment,
}

/// A token borrowing its text from the source line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Split a line at its first `;` into (instruction, comment), both trimmed
///
/// A line without `;` yields an empty comment.
pub fn split_comment(line: &str) -> (&str, &str) {
    match line.split_once(';') {
        Some((instruction, comment)) => (instruction.trim(), comment.trim()),
        None => (line.trim(), ""),
    }
}

/// Tokenize a line of GCode
///
/// The first whitespace-separated word of the instruction is the command,
/// the rest are parameters. A comment token is emitted last, and only when
/// the line actually has a `;`.
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let (instruction, comment) = split_comment(line);
    let mut tokens = Vec::new();

    for (idx, word) in instruction.split_whitespace().enumerate() {
        let kind = if idx == 0 {
            TokenKind::Command
        } else {
            TokenKind::Parameter
        };
        tokens.push(Token { kind, text: word });
    }

    if line.contains(';') {
        tokens.push(Token {
            kind: TokenKind::Comment,
            text: comment,
        });
    }

    tokens
}
