//! Parameter parsing
//!
//! Turns tokens like `X10.5` or `F1500` into a letter → value map.

use std::collections::BTreeMap;

use crate::error::GcodeError;

/// Parameters of one command, keyed by their (case-sensitive) letter
///
/// A letter given without a value (the `O` in `G28 O`) is recorded as a flag:
/// it is present, but has no numeric value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    words: BTreeMap<char, Option<f64>>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric value of a parameter, `None` when absent or given as a bare flag
    pub fn get(&self, letter: char) -> Option<f64> {
        self.words.get(&letter).copied().flatten()
    }

    /// Whether the letter appears at all, with or without a value
    pub fn contains(&self, letter: char) -> bool {
        self.words.contains_key(&letter)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Set a value; a repeated letter overwrites the earlier one
    pub fn insert(&mut self, letter: char, value: Option<f64>) {
        self.words.insert(letter, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Option<f64>)> + '_ {
        self.words.iter().map(|(letter, value)| (*letter, *value))
    }
}

impl FromIterator<(char, f64)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (char, f64)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (letter, value) in iter {
            params.insert(letter, Some(value));
        }
        params
    }
}

/// Parse a sequence of parameter tokens
///
/// Fails on the first token that is not a letter followed by a number.
pub fn parse_parameters<'a, I>(tokens: I) -> Result<Parameters, GcodeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut params = Parameters::new();
    for token in tokens {
        let (letter, value) = parse_parameter_token(token)?;
        params.insert(letter, value);
    }
    Ok(params)
}

/// Parse a single token like "X10.5" into its letter and value
fn parse_parameter_token(text: &str) -> Result<(char, Option<f64>), GcodeError> {
    let malformed = || GcodeError::MalformedParameter {
        token: text.to_string(),
    };

    let mut chars = text.chars();
    let letter = chars.next().ok_or_else(malformed)?;
    if !letter.is_ascii_alphabetic() {
        return Err(malformed());
    }

    let value_str = chars.as_str();
    if value_str.is_empty() {
        return Ok((letter, None));
    }

    let value = value_str.parse::<f64>().map_err(|_| malformed())?;
    if !value.is_finite() {
        return Err(malformed());
    }

    Ok((letter, Some(value)))
}
