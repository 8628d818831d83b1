//! In-memory view of the active document and the editor selection over it.

use std::path::PathBuf;

use crate::domain::errors::DomainError;

/// A 0-based line/character position, as reported by an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// Selection between an anchor and the active (cursor) position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// A collapsed selection at `position`.
    pub fn cursor(position: Position) -> Self {
        Self::new(position, position)
    }

    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }
}

/// The text of the active file together with its path and language id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
    pub language_id: String,
}

impl Document {
    pub fn new(
        path: impl Into<PathBuf>,
        text: impl Into<String>,
        language_id: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            language_id: language_id.into(),
        }
    }

    /// Number of lines. A trailing newline starts a final empty line.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Text of a 0-based line without its line terminator.
    pub fn line_at(&self, line: usize) -> Result<&str, DomainError> {
        self.text
            .split('\n')
            .nth(line)
            .map(|text| text.strip_suffix('\r').unwrap_or(text))
            .ok_or(DomainError::PositionOutOfRange {
                line: line + 1,
                line_count: self.line_count(),
            })
    }

    /// Literal text between two positions. Characters past the end of a line clamp to it.
    pub fn text_between(&self, start: Position, end: Position) -> Result<&str, DomainError> {
        let from = self.offset_of(start)?;
        let to = self.offset_of(end)?;
        Ok(&self.text[from.min(to)..from.max(to)])
    }

    fn offset_of(&self, position: Position) -> Result<usize, DomainError> {
        let mut line_start = 0;
        for _ in 0..position.line {
            match self.text[line_start..].find('\n') {
                Some(newline) => line_start += newline + 1,
                None => {
                    return Err(DomainError::PositionOutOfRange {
                        line: position.line + 1,
                        line_count: self.line_count(),
                    });
                }
            }
        }

        let line = self.line_at(position.line)?;
        let within = line
            .char_indices()
            .nth(position.character)
            .map(|(offset, _)| offset)
            .unwrap_or(line.len());
        Ok(line_start + within)
    }
}

/// Snapshot of what the editor host exposes for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub document: Document,
    pub selection: Selection,
}

impl EditorState {
    pub fn new(document: Document, selection: Selection) -> Self {
        Self {
            document,
            selection,
        }
    }
}
