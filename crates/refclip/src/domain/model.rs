//! Line spans, remote coordinates, and the user-selectable settings enums.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, SettingParseError};

/// Inclusive range of 1-based line numbers. A single line has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSpan {
    start: usize,
    end: usize,
}

impl LineSpan {
    /// Build a span from 1-based line numbers, rejecting line zero and inverted ranges.
    pub fn new(start: usize, end: Option<usize>) -> Result<Self, DomainError> {
        if start == 0 {
            return Err(DomainError::InvalidLine(start));
        }
        let end = end.unwrap_or(start);
        if end == 0 {
            return Err(DomainError::InvalidLine(end));
        }
        if end < start {
            return Err(DomainError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(line: usize) -> Result<Self, DomainError> {
        Self::new(line, None)
    }

    /// Build a span from 0-based editor line indices.
    pub fn from_zero_based(start: usize, end: usize) -> Self {
        let (start, end) = (start.min(end), start.max(end));
        Self {
            start: start + 1,
            end: end + 1,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Whether the span covers more than one line.
    pub fn is_range(&self) -> bool {
        self.end != self.start
    }
}

/// Owner and repository name parsed from a GitHub remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub owner: String,
    pub repo: String,
}

/// Notation used for local line references.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LineNumberFormat {
    /// `#L10`, `#L10-20`
    #[default]
    Github,
    /// `:10`, `:10-20`
    Editor,
    /// `(10)`, `(10-20)`
    Parentheses,
}

impl LineNumberFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineNumberFormat::Github => "github",
            LineNumberFormat::Editor => "editor",
            LineNumberFormat::Parentheses => "parentheses",
        }
    }

    /// Lenient lookup: unrecognized names behave like [`LineNumberFormat::Github`].
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for LineNumberFormat {
    type Err = SettingParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(LineNumberFormat::Github),
            "editor" => Ok(LineNumberFormat::Editor),
            "parentheses" => Ok(LineNumberFormat::Parentheses),
            _ => Err(SettingParseError::new("line number format", value)),
        }
    }
}

/// How the file path is rendered in local references.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// Relative to the workspace root.
    #[default]
    Relative,
    /// Absolute filesystem path.
    Absolute,
}

impl PathType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathType::Relative => "relative",
            PathType::Absolute => "absolute",
        }
    }
}

impl FromStr for PathType {
    type Err = SettingParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "relative" => Ok(PathType::Relative),
            "absolute" => Ok(PathType::Absolute),
            _ => Err(SettingParseError::new("path type", value)),
        }
    }
}

/// How copied code is embedded in the payload.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CodeFormat {
    /// Code appended verbatim.
    #[default]
    Plain,
    /// Code wrapped in a fenced block tagged with the document language.
    Markdown,
}

impl CodeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeFormat::Plain => "plain",
            CodeFormat::Markdown => "markdown",
        }
    }
}

impl FromStr for CodeFormat {
    type Err = SettingParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(CodeFormat::Plain),
            "markdown" | "md" => Ok(CodeFormat::Markdown),
            _ => Err(SettingParseError::new("code format", value)),
        }
    }
}

/// Which git ref a permalink points at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PermalinkType {
    /// The checked-out commit hash.
    #[default]
    Commit,
    /// The repository's default branch.
    Branch,
}

impl PermalinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermalinkType::Commit => "commit",
            PermalinkType::Branch => "branch",
        }
    }
}

impl FromStr for PermalinkType {
    type Err = SettingParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "commit" => Ok(PermalinkType::Commit),
            "branch" => Ok(PermalinkType::Branch),
            _ => Err(SettingParseError::new("permalink type", value)),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(LineNumberFormat, PathType, CodeFormat, PermalinkType);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_rejects_line_zero() {
        assert_eq!(LineSpan::single(0), Err(DomainError::InvalidLine(0)));
        assert_eq!(LineSpan::new(3, Some(0)), Err(DomainError::InvalidLine(0)));
    }

    #[test]
    fn span_rejects_inverted_range() {
        assert_eq!(
            LineSpan::new(5, Some(2)),
            Err(DomainError::InvertedRange { start: 5, end: 2 })
        );
    }

    #[test]
    fn equal_bounds_are_a_single_line() {
        let span = LineSpan::new(7, Some(7)).unwrap();
        assert!(!span.is_range());
        assert_eq!(span, LineSpan::single(7).unwrap());
    }

    #[test]
    fn zero_based_indices_shift_by_one() {
        let span = LineSpan::from_zero_based(1, 2);
        assert_eq!((span.start(), span.end()), (2, 3));
    }

    #[test]
    fn unknown_line_format_falls_back_to_github() {
        assert_eq!(LineNumberFormat::from_name("unknown"), LineNumberFormat::Github);
        assert_eq!(LineNumberFormat::from_name("Editor"), LineNumberFormat::Editor);
        assert!("vim".parse::<LineNumberFormat>().is_err());
    }

    #[test]
    fn settings_parse_case_insensitively() {
        assert_eq!("ABSOLUTE".parse::<PathType>(), Ok(PathType::Absolute));
        assert_eq!("md".parse::<CodeFormat>(), Ok(CodeFormat::Markdown));
        assert_eq!(" branch ".parse::<PermalinkType>(), Ok(PermalinkType::Branch));
    }
}
