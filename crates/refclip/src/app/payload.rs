//! Clipboard payload assembly.

use crate::app::settings::CopySettings;
use crate::domain::model::CodeFormat;

/// Append optional code to `head` (a path reference or permalink).
///
/// Code is separated by a blank line when `include_blank_line` is set, otherwise by a single
/// newline, and fenced with `language_id` in markdown mode. Missing or empty code leaves
/// `head` untouched.
pub fn assemble_payload(
    head: &str,
    code: Option<&str>,
    language_id: &str,
    settings: &CopySettings,
) -> String {
    let Some(code) = code.filter(|code| !code.is_empty()) else {
        return head.to_string();
    };

    let separator = if settings.include_blank_line {
        "\n\n"
    } else {
        "\n"
    };
    let body = match settings.code_format {
        CodeFormat::Markdown => fence(code, language_id),
        CodeFormat::Plain => code.to_string(),
    };
    format!("{head}{separator}{body}")
}

fn fence(code: &str, language_id: &str) -> String {
    format!("```{language_id}\n{code}\n```")
}
