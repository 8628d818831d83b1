//! Turning an editor selection into a line span and optional code.

use crate::domain::document::EditorState;
use crate::domain::errors::DomainError;
use crate::domain::model::LineSpan;

/// Lines referenced by the selection and, when requested, the text they cover.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    /// `None` when the cursor sits on a blank line.
    pub span: Option<LineSpan>,
    pub code: Option<String>,
}

/// Extract the reference for the current selection.
///
/// An empty selection references the cursor line unless that line is blank after trimming.
/// Its code is the whole untrimmed line. A non-empty selection references its first through
/// last line and its code is the literal selected text.
pub fn extract_selection(
    editor: &EditorState,
    include_code: bool,
) -> Result<Extraction, DomainError> {
    let document = &editor.document;
    let selection = editor.selection;

    if selection.is_empty() {
        let line = selection.active.line;
        let text = document.line_at(line)?;
        if text.trim().is_empty() {
            return Ok(Extraction::default());
        }
        return Ok(Extraction {
            span: Some(LineSpan::from_zero_based(line, line)),
            code: include_code.then(|| text.to_string()),
        });
    }

    let start = selection.start();
    let end = selection.end();
    let code = if include_code {
        Some(document.text_between(start, end)?.to_string())
    } else {
        document.line_at(end.line)?;
        None
    };

    Ok(Extraction {
        span: Some(LineSpan::from_zero_based(start.line, end.line)),
        code: code.filter(|text| !text.is_empty()),
    })
}
