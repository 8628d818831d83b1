//! Resolved per-invocation settings.

use serde::Serialize;

use crate::domain::model::{CodeFormat, LineNumberFormat, PathType, PermalinkType};
use crate::infra::config::Config;

/// Immutable settings for a single copy, resolved from [`Config`] at the start of the
/// invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopySettings {
    pub path_type: PathType,
    pub include_blank_line: bool,
    pub line_number_format: LineNumberFormat,
    pub code_format: CodeFormat,
    pub permalink_type: PermalinkType,
}

impl CopySettings {
    /// Build settings from configuration layers.
    pub fn from_config(config: &Config) -> Self {
        Self {
            path_type: config.reference.path_type(),
            include_blank_line: config.reference.include_blank_line(),
            line_number_format: config.reference.line_number_format(),
            code_format: config.reference.code_format(),
            permalink_type: config.permalink.link_type(),
        }
    }
}

impl Default for CopySettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
