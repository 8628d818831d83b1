//! Line reference fragments for local paths and GitHub permalinks.

use crate::domain::errors::DomainError;
use crate::domain::model::{LineNumberFormat, LineSpan};

/// Render the fragment appended to a local path, e.g. `#L10-20`, `:10-20` or `(10-20)`.
pub fn format_line_reference(span: LineSpan, format: LineNumberFormat) -> String {
    let start = span.start();
    let end = span.end();
    match (format, span.is_range()) {
        (LineNumberFormat::Github, false) => format!("#L{start}"),
        (LineNumberFormat::Github, true) => format!("#L{start}-{end}"),
        (LineNumberFormat::Editor, false) => format!(":{start}"),
        (LineNumberFormat::Editor, true) => format!(":{start}-{end}"),
        (LineNumberFormat::Parentheses, false) => format!("({start})"),
        (LineNumberFormat::Parentheses, true) => format!("({start}-{end})"),
    }
}

/// Format by notation name. Unknown names render like `github`.
pub fn format_line_number(
    start: usize,
    end: Option<usize>,
    format: &str,
) -> Result<String, DomainError> {
    let span = LineSpan::new(start, end)?;
    Ok(format_line_reference(span, LineNumberFormat::from_name(format)))
}

/// Fragment for a GitHub blob URL. Ranges repeat the `L` prefix: `#L10-L20`.
pub fn format_permalink_fragment(span: LineSpan) -> String {
    if span.is_range() {
        format!("#L{}-L{}", span.start(), span.end())
    } else {
        format!("#L{}", span.start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_notation() {
        assert_eq!(format_line_number(10, None, "github").unwrap(), "#L10");
        assert_eq!(format_line_number(10, Some(20), "github").unwrap(), "#L10-20");
    }

    #[test]
    fn editor_notation() {
        assert_eq!(format_line_number(10, None, "editor").unwrap(), ":10");
        assert_eq!(format_line_number(10, Some(20), "editor").unwrap(), ":10-20");
    }

    #[test]
    fn parentheses_notation() {
        assert_eq!(format_line_number(10, None, "parentheses").unwrap(), "(10)");
        assert_eq!(
            format_line_number(10, Some(20), "parentheses").unwrap(),
            "(10-20)"
        );
    }

    #[test]
    fn unknown_notation_matches_github() {
        for (start, end) in [(10, None), (10, Some(20)), (1, Some(1))] {
            assert_eq!(
                format_line_number(start, end, "unknown").unwrap(),
                format_line_number(start, end, "github").unwrap()
            );
        }
    }

    #[test]
    fn end_equal_to_start_renders_single_line() {
        assert_eq!(format_line_number(4, Some(4), "editor").unwrap(), ":4");
    }

    #[test]
    fn zero_line_is_rejected() {
        assert_eq!(
            format_line_number(0, None, "github"),
            Err(DomainError::InvalidLine(0))
        );
    }

    #[test]
    fn permalink_fragment_repeats_prefix() {
        let span = LineSpan::new(10, Some(20)).unwrap();
        assert_eq!(format_permalink_fragment(span), "#L10-L20");
        assert_eq!(format_line_reference(span, LineNumberFormat::Github), "#L10-20");
        assert_eq!(
            format_permalink_fragment(LineSpan::single(3).unwrap()),
            "#L3"
        );
    }
}
