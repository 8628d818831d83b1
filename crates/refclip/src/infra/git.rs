//! Git integration: shell-out query runner and workspace discovery.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Runs a git subcommand in a directory and returns its trimmed standard output.
pub trait GitQuery {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<String, GitQueryError>;
}

#[derive(Debug, Error)]
pub enum GitQueryError {
    #[error("failed to spawn git: {0}")]
    Spawn(#[from] io::Error),
    #[error("`git {command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("`git {0}` produced non UTF-8 output")]
    InvalidOutput(String),
}

/// [`GitQuery`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct ShellGit {
    program: PathBuf,
}

impl ShellGit {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ShellGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitQuery for ShellGit {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<String, GitQueryError> {
        let command = args.join(" ");
        tracing::debug!(%command, cwd = %cwd.display(), "running git query");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .output()?;

        if !output.status.success() {
            return Err(GitQueryError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|_| GitQueryError::InvalidOutput(command))?;
        Ok(stdout.trim().to_string())
    }
}

/// [`GitQuery`] answering from a fixed table of commands, for tests and dry runs.
///
/// Commands without a scripted answer fail as git would for an unknown ref.
#[derive(Debug, Default, Clone)]
pub struct ScriptedGit {
    responses: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `git <args>` with `output`.
    pub fn respond(mut self, args: &[&str], output: &str) -> Self {
        self.responses.insert(args.join(" "), output.to_string());
        self
    }

    /// Commands run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl GitQuery for ScriptedGit {
    fn run(&self, args: &[&str], _cwd: &Path) -> Result<String, GitQueryError> {
        let command = args.join(" ");
        self.calls.borrow_mut().push(command.clone());
        match self.responses.get(&command) {
            Some(output) => Ok(output.trim().to_string()),
            None => Err(GitQueryError::Failed {
                command,
                status: "exit status: 128".into(),
                stderr: "fatal: not scripted".into(),
            }),
        }
    }
}

/// Lightweight wrapper around [`gix::Repository`] discovery for locating the workspace root.
#[derive(Default)]
pub struct GitClient {
    repo: Option<gix::Repository>,
}

impl GitClient {
    /// Attempt to locate a git repository starting from `path`.
    pub fn discover(path: impl AsRef<Path>) -> Self {
        let repo = gix::discover(path).ok();
        Self { repo }
    }

    /// Root of the work tree, if discovery succeeded and the repository is not bare.
    pub fn work_dir(&self) -> Option<PathBuf> {
        self.repo
            .as_ref()?
            .work_dir()
            .map(Path::to_path_buf)
    }
}

/// Workspace root enclosing `file`, discovered from the file's directory.
pub fn workspace_root_for(file: &Path) -> Option<PathBuf> {
    let start = if file.is_dir() { file } else { file.parent()? };
    let root = GitClient::discover(start).work_dir();
    tracing::debug!(file = %file.display(), root = ?root, "workspace discovery");
    root
}
