//! Command-line trigger surface.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::actions::{Action, ActionContext, run_action};
use crate::app::settings::CopySettings;
use crate::domain::document::{EditorState, Position, Selection};
use crate::domain::model::{CodeFormat, LineNumberFormat, PathType, PermalinkType};
use crate::infra::clipboard::{ClipboardSink, StdoutClipboard, SystemClipboard};
use crate::infra::config::Config;
use crate::infra::fs::open_document;
use crate::infra::git::{ShellGit, workspace_root_for};
use crate::infra::notify::{ConsoleNotifier, Notifier};

#[derive(Parser, Debug)]
#[command(name = "refclip", author, version, about = "Copy file references, code, and GitHub permalinks to the clipboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy `path#L10` for the cursor line or selection
    CopyPath(CopyArgs),
    /// Copy the path reference followed by the referenced code
    CopyPathWithCode(CopyArgs),
    /// Copy a GitHub permalink to the cursor line or selection
    CopyPermalink(CopyArgs),
    /// Copy a GitHub permalink followed by the referenced code
    CopyPermalinkWithCode(CopyArgs),
    /// Print the effective settings as TOML
    Config {
        /// Workspace whose `.refclip/config.toml` is layered in
        #[arg(long)]
        workspace: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CopyArgs {
    /// File to reference
    pub file: PathBuf,

    /// Cursor position, 1-based
    #[arg(long, value_name = "LINE[:COL]", conflicts_with = "selection")]
    pub cursor: Option<PositionArg>,

    /// Selected range, 1-based and inclusive; an end without a column runs to end of line
    #[arg(long, value_name = "LINE[:COL]..LINE[:COL]")]
    pub selection: Option<SelectionArg>,

    /// Language id for markdown fences (detected from the file name by default)
    #[arg(long)]
    pub language: Option<String>,

    /// Workspace root for relative paths (discovered from git by default)
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    /// Print the payload to stdout instead of the system clipboard
    #[arg(long)]
    pub stdout: bool,

    #[command(flatten)]
    pub overrides: SettingsOverrides,
}

/// Per-invocation overrides layered on top of the loaded configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsOverrides {
    #[arg(long, value_enum)]
    pub path_type: Option<PathType>,

    #[arg(long = "line-format", value_enum)]
    pub line_number_format: Option<LineNumberFormat>,

    #[arg(long, value_enum)]
    pub code_format: Option<CodeFormat>,

    #[arg(long, value_enum)]
    pub permalink_type: Option<PermalinkType>,

    /// Separate path and code with a blank line
    #[arg(long, conflicts_with = "no_blank_line")]
    pub blank_line: bool,

    /// Separate path and code with a single newline
    #[arg(long)]
    pub no_blank_line: bool,
}

impl SettingsOverrides {
    pub fn apply(&self, mut settings: CopySettings) -> CopySettings {
        if let Some(path_type) = self.path_type {
            settings.path_type = path_type;
        }
        if let Some(format) = self.line_number_format {
            settings.line_number_format = format;
        }
        if let Some(format) = self.code_format {
            settings.code_format = format;
        }
        if let Some(link_type) = self.permalink_type {
            settings.permalink_type = link_type;
        }
        if self.blank_line {
            settings.include_blank_line = true;
        }
        if self.no_blank_line {
            settings.include_blank_line = false;
        }
        settings
    }
}

/// `LINE[:COL]` with 1-based numbers. A missing column means "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionArg {
    pub line: usize,
    pub column: Option<usize>,
}

impl FromStr for PositionArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (line, column) = match value.split_once(':') {
            Some((line, column)) => (line, Some(column)),
            None => (value, None),
        };
        let line = parse_one_based(line, "line")?;
        let column = column
            .map(|column| parse_one_based(column, "column"))
            .transpose()?;
        Ok(Self { line, column })
    }
}

impl PositionArg {
    fn to_start(self) -> Position {
        Position::new(self.line - 1, self.column.map_or(0, |column| column - 1))
    }

    /// End positions without a column extend to the end of the line. Characters past the
    /// end clamp to it, so line bounds are checked when the selection is extracted.
    fn to_end(self) -> Position {
        Position::new(
            self.line - 1,
            self.column.map_or(usize::MAX, |column| column - 1),
        )
    }
}

/// `START..END`, both ends `LINE[:COL]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionArg {
    pub start: PositionArg,
    pub end: PositionArg,
}

impl FromStr for SelectionArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (start, end) = value
            .split_once("..")
            .ok_or_else(|| format!("expected START..END, got '{value}'"))?;
        let start: PositionArg = start.parse()?;
        let end: PositionArg = end.parse()?;
        if end.line < start.line {
            return Err(format!(
                "selection ends on line {} before it starts on line {}",
                end.line, start.line
            ));
        }
        Ok(Self { start, end })
    }
}

fn parse_one_based(value: &str, what: &str) -> Result<usize, String> {
    let number: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid {what} '{value}'"))?;
    if number == 0 {
        return Err(format!("{what} numbers start at 1"));
    }
    Ok(number)
}

impl CopyArgs {
    /// Editor selection over `document` described by `--cursor` / `--selection`.
    pub fn selection(&self) -> Selection {
        if let Some(selection) = self.selection {
            return Selection::new(selection.start.to_start(), selection.end.to_end());
        }
        let cursor = self.cursor.unwrap_or(PositionArg {
            line: 1,
            column: None,
        });
        Selection::cursor(cursor.to_start())
    }

    fn open_editor(&self) -> Result<EditorState> {
        let document = open_document(&self.file, self.language.clone())?;
        Ok(EditorState::new(document, self.selection()))
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::CopyPath(args) => copy(Action::CopyPath, &args),
        Commands::CopyPathWithCode(args) => copy(Action::CopyPathWithCode, &args),
        Commands::CopyPermalink(args) => copy(Action::CopyPermalink, &args),
        Commands::CopyPermalinkWithCode(args) => copy(Action::CopyPermalinkWithCode, &args),
        Commands::Config { workspace } => {
            let cwd = std::env::current_dir().context("unable to determine working directory")?;
            let root = workspace.or_else(|| workspace_root_for(&cwd));
            let settings = CopySettings::from_config(&Config::load(root.as_deref())?);
            print!(
                "{}",
                toml::to_string(&settings).context("failed to render settings")?
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "refclip", &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn copy(action: Action, args: &CopyArgs) -> Result<ExitCode> {
    let notifier = ConsoleNotifier;

    let editor = match args.open_editor() {
        Ok(editor) => Some(editor),
        Err(err) => {
            let cause = format!("{err:#}");
            tracing::debug!(file = %args.file.display(), error = %cause, "no active document");
            None
        }
    };

    // Documents are opened by canonical path, so the root has to match.
    let explicit_root = args
        .workspace
        .as_ref()
        .map(|root| fs::canonicalize(root).unwrap_or_else(|_| root.clone()));
    let workspace_root = explicit_root.or_else(|| {
        editor
            .as_ref()
            .and_then(|editor| workspace_root_for(&editor.document.path))
    });

    let config = match Config::load(workspace_root.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            notifier.error(&format!("{err:#}"));
            return Ok(ExitCode::FAILURE);
        }
    };
    let settings = args.overrides.apply(CopySettings::from_config(&config));

    let git = ShellGit::default();
    let context = ActionContext {
        editor: editor.as_ref(),
        settings: &settings,
        workspace_root: workspace_root.as_deref(),
        git: &git,
    };

    let mut clipboard: Box<dyn ClipboardSink> = if args.stdout {
        Box::new(StdoutClipboard::default())
    } else {
        Box::new(SystemClipboard::new())
    };

    match run_action(action, &context, clipboard.as_mut(), &notifier) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Document;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_positions() {
        assert_eq!(
            "12:4".parse::<PositionArg>(),
            Ok(PositionArg {
                line: 12,
                column: Some(4)
            })
        );
        assert_eq!(
            "3".parse::<PositionArg>(),
            Ok(PositionArg {
                line: 3,
                column: None
            })
        );
        assert!("0".parse::<PositionArg>().is_err());
        assert!("x:1".parse::<PositionArg>().is_err());
    }

    #[test]
    fn selection_end_without_column_runs_to_line_end() {
        let document = Document::new("/a.txt", "Line 1\nLine 2\nLine 3\nLine 4", "plaintext");
        let args = Cli::parse_from(["refclip", "copy-path", "/a.txt", "--selection", "2..3"]);
        let Commands::CopyPath(args) = args.command else {
            panic!("expected copy-path");
        };
        let selection = args.selection();
        assert_eq!(selection.start(), Position::new(1, 0));
        assert_eq!(selection.end().line, 2);
        let text = document
            .text_between(selection.start(), selection.end())
            .unwrap();
        assert_eq!(text, "Line 2\nLine 3");
    }

    #[test]
    fn reversed_selection_is_rejected() {
        assert!("3..2".parse::<SelectionArg>().is_err());
        assert!("2:5..2:1".parse::<SelectionArg>().is_ok());
        assert!(
            Cli::try_parse_from(["refclip", "copy-path", "a.txt", "--selection", "3..2"]).is_err()
        );
    }

    #[test]
    fn cursor_defaults_to_first_line() {
        let args = Cli::parse_from(["refclip", "copy-path", "/a.txt"]);
        let Commands::CopyPath(args) = args.command else {
            panic!("expected copy-path");
        };
        assert_eq!(args.selection(), Selection::cursor(Position::new(0, 0)));
    }

    #[test]
    fn overrides_replace_configured_values() {
        let cli = Cli::parse_from([
            "refclip",
            "copy-path-with-code",
            "a.rs",
            "--line-format",
            "parentheses",
            "--code-format",
            "markdown",
            "--no-blank-line",
        ]);
        let Commands::CopyPathWithCode(args) = cli.command else {
            panic!("expected copy-path-with-code");
        };
        let settings = args.overrides.apply(CopySettings::default());
        assert_eq!(settings.line_number_format, LineNumberFormat::Parentheses);
        assert_eq!(settings.code_format, CodeFormat::Markdown);
        assert!(!settings.include_blank_line);
        assert_eq!(settings.path_type, PathType::Relative);
    }
}
