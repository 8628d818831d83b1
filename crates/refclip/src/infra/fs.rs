//! Loading files from disk into [`Document`]s.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::document::Document;
use crate::infra::language;

/// Read `path` into a document with an absolute path and a language id.
///
/// `language` overrides detection from the file name.
pub fn open_document(path: &Path, language: Option<String>) -> Result<Document> {
    let absolute = fs::canonicalize(path)
        .with_context(|| format!("failed to resolve file path: {}", path.display()))?;
    let text = fs::read_to_string(&absolute)
        .with_context(|| format!("failed to read file: {}", absolute.display()))?;
    let language_id = language.unwrap_or_else(|| language::language_id_for(&absolute));
    Ok(Document::new(absolute, text, language_id))
}
