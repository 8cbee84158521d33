//! A single `source target` replacement rule and its line parser

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One entry of a replacement dictionary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplacementRule {
    pub source: String,
    pub target: String,
}

impl ReplacementRule {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Why a dictionary line was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineProblem {
    TokenCount { tokens: usize },
    InvalidUtf8,
}

impl fmt::Display for LineProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenCount { tokens } => write!(f, "expected 2 tokens, found {}", tokens),
            Self::InvalidUtf8 => write!(f, "not valid UTF-8"),
        }
    }
}

/// A dictionary line that could not be turned into a rule
///
/// Warnings never abort loading; the offending line is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error(
    "Can't parse line {line_number} from replacement file {}: {line:?} ({problem})",
    .path.display()
)]
pub struct ParseWarning {
    pub path: PathBuf,
    pub line_number: usize,
    /// The line as read, with undecodable bytes replaced
    pub line: String,
    pub problem: LineProblem,
}

/// Outcome of parsing one dictionary line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Rule(ReplacementRule),
    Blank,
    Malformed { tokens: usize },
}

/// Parse one dictionary line into a rule
///
/// The line must hold exactly two whitespace-separated tokens. Lines made
/// only of whitespace are reported as [`ParsedLine::Blank`].
pub fn parse_line(line: &str) -> ParsedLine {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => ParsedLine::Blank,
        [source, target] => ParsedLine::Rule(ReplacementRule::new(*source, *target)),
        other => ParsedLine::Malformed {
            tokens: other.len(),
        },
    }
}
