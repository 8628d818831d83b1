//! The four user-invokable copy actions.

use std::path::Path;

use thiserror::Error;

use crate::app::extract::extract_selection;
use crate::app::paths::resolve_display_path;
use crate::app::payload::assemble_payload;
use crate::app::permalink::PermalinkResolver;
use crate::app::settings::CopySettings;
use crate::domain::document::EditorState;
use crate::domain::errors::{DomainError, PermalinkError};
use crate::domain::reference::format_line_reference;
use crate::infra::clipboard::ClipboardSink;
use crate::infra::git::GitQuery;
use crate::infra::notify::Notifier;

const NO_WORKSPACE_WARNING: &str = "No workspace folder found. Using absolute path instead.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CopyPath,
    CopyPathWithCode,
    CopyPermalink,
    CopyPermalinkWithCode,
}

impl Action {
    pub fn includes_code(&self) -> bool {
        matches!(self, Action::CopyPathWithCode | Action::CopyPermalinkWithCode)
    }

    pub fn is_permalink(&self) -> bool {
        matches!(self, Action::CopyPermalink | Action::CopyPermalinkWithCode)
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Action::CopyPath => "Path copied to clipboard!",
            Action::CopyPathWithCode => "Path with code copied to clipboard!",
            Action::CopyPermalink => "Permalink copied to clipboard!",
            Action::CopyPermalinkWithCode => "Permalink with code copied to clipboard!",
        }
    }
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("No active editor found")]
    NoActiveEditor,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Permalink(#[from] PermalinkError),
    #[error("Failed to copy to clipboard: {0:#}")]
    Clipboard(anyhow::Error),
}

/// Read-only inputs for one invocation.
pub struct ActionContext<'a> {
    pub editor: Option<&'a EditorState>,
    pub settings: &'a CopySettings,
    pub workspace_root: Option<&'a Path>,
    pub git: &'a dyn GitQuery,
}

/// Run `action`, writing the payload to `clipboard` exactly once on success.
///
/// Every invocation ends in one info or error notification. Failures never touch the
/// clipboard.
pub fn run_action(
    action: Action,
    context: &ActionContext<'_>,
    clipboard: &mut dyn ClipboardSink,
    notifier: &dyn Notifier,
) -> Result<String, ActionError> {
    let result = build_payload(action, context, notifier).and_then(|payload| {
        clipboard
            .write(&payload)
            .map_err(ActionError::Clipboard)?;
        Ok(payload)
    });

    match &result {
        Ok(payload) => {
            tracing::info!(?action, bytes = payload.len(), "copied");
            notifier.info(action.success_message());
        }
        Err(err) => {
            tracing::debug!(?action, error = %err, "copy failed");
            notifier.error(&err.to_string());
        }
    }
    result
}

/// Build the clipboard text for `action` without writing it.
///
/// A missing workspace root for relative paths is reported through `notifier` as a warning.
pub fn build_payload(
    action: Action,
    context: &ActionContext<'_>,
    notifier: &dyn Notifier,
) -> Result<String, ActionError> {
    let editor = context.editor.ok_or(ActionError::NoActiveEditor)?;
    let document = &editor.document;
    let settings = context.settings;
    let extraction = extract_selection(editor, action.includes_code())?;

    let head = if action.is_permalink() {
        PermalinkResolver::new(context.git).resolve(
            &document.path,
            extraction.span,
            settings.permalink_type,
        )?
    } else {
        let display =
            resolve_display_path(&document.path, settings.path_type, context.workspace_root);
        if display.fell_back_to_absolute {
            notifier.warn(NO_WORKSPACE_WARNING);
        }
        let reference = extraction
            .span
            .map(|span| format_line_reference(span, settings.line_number_format))
            .unwrap_or_default();
        format!("{}{reference}", display.path)
    };

    Ok(assemble_payload(
        &head,
        extraction.code.as_deref(),
        &document.language_id,
        settings,
    ))
}
