//! Codepoint labels and support verdicts.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// A Unicode scalar value as it appears in the compatibility data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Codepoint(pub u32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCodepointError {
    #[error("empty codepoint")]
    Empty,
    #[error("invalid hex codepoint {0:?}")]
    InvalidHex(String),
    #[error("codepoint {0:X} is beyond U+10FFFF")]
    OutOfRange(u32),
    #[error("codepoint range {start:X}-{end:X} is reversed")]
    Reversed { start: u32, end: u32 },
    #[error("unknown verdict {0:?} (expected yes, no or maybe)")]
    UnknownVerdict(String),
}

impl Codepoint {
    /// Canonical `U+XXXX` / `U+XXXXX` label.
    pub fn label(self) -> String {
        format!("U+{:04X}", self.0)
    }

    /// The character itself, when the value is a valid scalar.
    pub fn as_char(self) -> Option<char> {
        char::from_u32(self.0)
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}

impl FromStr for Codepoint {
    type Err = ParseCodepointError;

    /// Accepts `U+1FB00`, `u+1fb00` and bare `1FB00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s
            .strip_prefix("U+")
            .or_else(|| s.strip_prefix("u+"))
            .unwrap_or(s);
        parse_hex(hex).map(Codepoint)
    }
}

/// Parse a bare hex number (no prefix) no larger than U+10FFFF.
pub fn parse_hex(token: &str) -> Result<u32, ParseCodepointError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ParseCodepointError::Empty);
    }
    let value = u32::from_str_radix(token, 16)
        .map_err(|_| ParseCodepointError::InvalidHex(token.to_string()))?;
    if value > 0x10FFFF {
        return Err(ParseCodepointError::OutOfRange(value));
    }
    Ok(value)
}

/// Parse `1FB00-1FB0F` or a single `1FB00` into an inclusive pair.
///
/// Both ends may carry a `U+` prefix.
pub fn parse_span(token: &str) -> Result<(u32, u32), ParseCodepointError> {
    let (start, end) = match token.split_once('-') {
        Some((start, end)) => (start, end),
        None => (token, token),
    };
    let start = start.parse::<Codepoint>()?.0;
    let end = end.parse::<Codepoint>()?.0;
    if start > end {
        return Err(ParseCodepointError::Reversed { start, end });
    }
    Ok((start, end))
}

/// An emulator's reported support for one codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Yes,
    No,
    Maybe,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Yes => "yes",
            Verdict::No => "no",
            Verdict::Maybe => "maybe",
        }
    }

    /// Contribution in half-units: yes counts 2, maybe 1, no 0.
    ///
    /// Summing halves keeps aggregation exact; divide by two to truncate.
    pub fn half_weight(self) -> u32 {
        match self {
            Verdict::Yes => 2,
            Verdict::Maybe => 1,
            Verdict::No => 0,
        }
    }
}

impl FromStr for Verdict {
    type Err = ParseCodepointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Verdict::Yes),
            "no" => Ok(Verdict::No),
            "maybe" => Ok(Verdict::Maybe),
            other => Err(ParseCodepointError::UnknownVerdict(other.to_string())),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a glyph grid cell. Unlike table aggregation, a codepoint with
/// no record shows as `Unknown` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Known(Verdict),
    Unknown,
}

impl CellStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            CellStatus::Known(v) => v.as_str(),
            CellStatus::Unknown => "unknown",
        }
    }
}
