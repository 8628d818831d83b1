//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::errors::SettingParseError;
use crate::domain::model::{CodeFormat, LineNumberFormat, PathType, PermalinkType};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".refclip/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default = "Reference::unset")]
    pub reference: Reference,
    #[serde(default = "Permalink::unset")]
    pub permalink: Permalink,
}

/// Settings for local path references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    path_type: Option<String>,
    #[serde(default)]
    include_blank_line: Option<bool>,
    #[serde(default)]
    line_number_format: Option<String>,
    #[serde(default)]
    code_format: Option<String>,
}

impl Reference {
    /// A layer that leaves every value to lower layers.
    fn unset() -> Self {
        Self {
            path_type: None,
            include_blank_line: None,
            line_number_format: None,
            code_format: None,
        }
    }

    fn default_include_blank_line() -> bool {
        true
    }

    pub fn path_type(&self) -> PathType {
        resolve_setting(self.path_type.as_deref())
    }

    pub fn include_blank_line(&self) -> bool {
        self.include_blank_line
            .unwrap_or_else(Self::default_include_blank_line)
    }

    pub fn line_number_format(&self) -> LineNumberFormat {
        resolve_setting(self.line_number_format.as_deref())
    }

    pub fn code_format(&self) -> CodeFormat {
        resolve_setting(self.code_format.as_deref())
    }
}

impl Default for Reference {
    fn default() -> Self {
        Self {
            path_type: Some(PathType::default().as_str().to_owned()),
            include_blank_line: Some(Self::default_include_blank_line()),
            line_number_format: Some(LineNumberFormat::default().as_str().to_owned()),
            code_format: Some(CodeFormat::default().as_str().to_owned()),
        }
    }
}

/// Settings for GitHub permalinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permalink {
    #[serde(default)]
    link_type: Option<String>,
}

impl Permalink {
    fn unset() -> Self {
        Self { link_type: None }
    }

    pub fn link_type(&self) -> PermalinkType {
        resolve_setting(self.link_type.as_deref())
    }
}

impl Default for Permalink {
    fn default() -> Self {
        Self {
            link_type: Some(PermalinkType::default().as_str().to_owned()),
        }
    }
}

/// Unknown values log a warning and fall back to the variant's default.
fn resolve_setting<T>(value: Option<&str>) -> T
where
    T: FromStr<Err = SettingParseError> + Default,
{
    match value.map(str::parse::<T>) {
        Some(Ok(parsed)) => parsed,
        Some(Err(err)) => {
            tracing::warn!(error = %err, "using default setting");
            T::default()
        }
        None => T::default(),
    }
}

/// Environment overrides for every setting.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    path_type: Option<String>,
    include_blank_line: Option<String>,
    line_number_format: Option<String>,
    code_format: Option<String>,
    link_type: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            path_type: env::var("REFCLIP_PATH_TYPE").ok(),
            include_blank_line: env::var("REFCLIP_INCLUDE_BLANK_LINE").ok(),
            line_number_format: env::var("REFCLIP_LINE_NUMBER_FORMAT").ok(),
            code_format: env::var("REFCLIP_CODE_FORMAT").ok(),
            link_type: env::var("REFCLIP_PERMALINK_TYPE").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(line_number_format: &str, include_blank_line: &str) -> Self {
        Self {
            line_number_format: Some(line_number_format.to_owned()),
            include_blank_line: Some(include_blank_line.to_owned()),
            ..Self::default()
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    ///
    /// Called once per invocation so edits to any layer apply to the next copy.
    pub fn load(workspace_root: Option<&Path>) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_root.map(workspace_config_path);
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            reference: merge_reference(self.reference, other.reference),
            permalink: merge_permalink(self.permalink, other.permalink),
        }
    }
}

fn merge_reference(mut base: Reference, overlay: Reference) -> Reference {
    if let Some(value) = overlay.path_type {
        base.path_type = Some(value);
    }
    if let Some(value) = overlay.include_blank_line {
        base.include_blank_line = Some(value);
    }
    if let Some(value) = overlay.line_number_format {
        base.line_number_format = Some(value);
    }
    if let Some(value) = overlay.code_format {
        base.code_format = Some(value);
    }
    base
}

fn merge_permalink(mut base: Permalink, overlay: Permalink) -> Permalink {
    if let Some(value) = overlay.link_type {
        base.link_type = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("refclip/config.toml"))
}

fn workspace_config_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_WORKSPACE_CONFIG_PATH)
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(path_type) = env.path_type {
        config.reference.path_type = Some(path_type);
    }
    if let Some(raw) = env.include_blank_line {
        match parse_bool(&raw) {
            Some(value) => config.reference.include_blank_line = Some(value),
            None => tracing::warn!(value = %raw, "ignoring invalid REFCLIP_INCLUDE_BLANK_LINE"),
        }
    }
    if let Some(line_number_format) = env.line_number_format {
        config.reference.line_number_format = Some(line_number_format);
    }
    if let Some(code_format) = env.code_format {
        config.reference.code_format = Some(code_format);
    }
    if let Some(link_type) = env.link_type {
        config.permalink.link_type = Some(link_type);
    }
    config
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
