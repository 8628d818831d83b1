//! Domain-specific errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("line numbers start at 1, got {0}")]
    InvalidLine(usize),
    #[error("range end {end} is before start {start}")]
    InvertedRange { start: usize, end: usize },
    #[error("line {line} is outside the document ({line_count} lines)")]
    PositionOutOfRange { line: usize, line_count: usize },
}

/// Error returned when a configuration value names an unknown variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {setting} '{value}'")]
pub struct SettingParseError {
    pub setting: &'static str,
    pub value: String,
}

impl SettingParseError {
    pub(crate) fn new(setting: &'static str, value: &str) -> Self {
        Self {
            setting,
            value: value.to_string(),
        }
    }
}

/// Reasons a GitHub permalink cannot be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermalinkError {
    #[error("Not a git repository")]
    NotARepository,
    #[error("No git remote 'origin' configured")]
    NoRemote,
    #[error("Remote URL is not a GitHub repository: {0}")]
    UnsupportedRemote(String),
    #[error("Could not determine the current commit")]
    NoCommit,
    #[error("Could not determine the default branch")]
    NoDefaultBranch,
    #[error("File is outside the repository: {0}")]
    OutsideRepository(String),
}
