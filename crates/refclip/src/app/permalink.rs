//! GitHub permalink resolution from git metadata.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app::paths::to_forward_slashes;
use crate::domain::errors::PermalinkError;
use crate::domain::model::{LineSpan, PermalinkType, RemoteInfo};
use crate::domain::reference::format_permalink_fragment;
use crate::infra::git::GitQuery;

static SSH_REMOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^git@github\.com:([^/\s]+)/([^/\s]+?)(?:\.git)?/?$")
        .expect("ssh remote pattern compiles")
});

static HTTPS_REMOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://(?:[^@/\s]+@)?github\.com/([^/\s]+)/([^/\s]+?)(?:\.git)?/?$")
        .expect("https remote pattern compiles")
});

static REMOTE_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"refs/remotes/origin/(\S+)$").expect("remote head pattern compiles")
});

/// Extract `{owner, repo}` from an SSH or HTTPS GitHub remote URL.
///
/// A trailing `.git` is dropped. Other hosts and shapes yield `None`.
pub fn parse_github_url(url: &str) -> Option<RemoteInfo> {
    let url = url.trim();
    [&*SSH_REMOTE, &*HTTPS_REMOTE]
        .into_iter()
        .find_map(|pattern| {
            let captures = pattern.captures(url)?;
            Some(RemoteInfo {
                owner: captures[1].to_string(),
                repo: captures[2].to_string(),
            })
        })
}

/// `https://github.com/{owner}/{repo}/blob/{ref}/{path}{#Lstart[-Lend]}`
pub fn assemble_permalink(
    remote: &RemoteInfo,
    git_ref: &str,
    repo_path: &str,
    span: Option<LineSpan>,
) -> String {
    let fragment = span.map(format_permalink_fragment).unwrap_or_default();
    format!(
        "https://github.com/{}/{}/blob/{git_ref}/{repo_path}{fragment}",
        remote.owner, remote.repo
    )
}

/// Outcome of default branch discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchLookup {
    Found(String),
    NotFound,
}

/// One step of default branch discovery: a git query and how to read a branch from its
/// output. A failed query or `None` from `extract` moves on to the next strategy.
struct BranchStrategy {
    name: &'static str,
    args: &'static [&'static str],
    extract: fn(&str) -> Option<String>,
}

const DEFAULT_BRANCH_STRATEGIES: &[BranchStrategy] = &[
    BranchStrategy {
        name: "remote HEAD",
        args: &["symbolic-ref", "refs/remotes/origin/HEAD"],
        extract: remote_head_branch,
    },
    BranchStrategy {
        name: "local main",
        args: &["rev-parse", "--verify", "--quiet", "refs/heads/main"],
        extract: main_branch,
    },
    BranchStrategy {
        name: "local master",
        args: &["rev-parse", "--verify", "--quiet", "refs/heads/master"],
        extract: master_branch,
    },
    BranchStrategy {
        name: "current branch",
        args: &["branch", "--show-current"],
        extract: current_branch,
    },
];

fn remote_head_branch(output: &str) -> Option<String> {
    REMOTE_HEAD
        .captures(output.trim())
        .map(|captures| captures[1].to_string())
}

fn main_branch(_: &str) -> Option<String> {
    Some("main".to_string())
}

fn master_branch(_: &str) -> Option<String> {
    Some("master".to_string())
}

fn current_branch(output: &str) -> Option<String> {
    let name = output.trim();
    (!name.is_empty() && name != "HEAD").then(|| name.to_string())
}

/// Find the default branch, trying each strategy in order and stopping at the first hit.
pub fn discover_default_branch(git: &dyn GitQuery, cwd: &Path) -> BranchLookup {
    for strategy in DEFAULT_BRANCH_STRATEGIES {
        match git.run(strategy.args, cwd) {
            Ok(output) => {
                if let Some(branch) = (strategy.extract)(&output) {
                    tracing::debug!(strategy = strategy.name, %branch, "default branch found");
                    return BranchLookup::Found(branch);
                }
                tracing::debug!(strategy = strategy.name, "strategy output had no branch");
            }
            Err(err) => {
                tracing::debug!(strategy = strategy.name, error = %err, "branch strategy failed")
            }
        }
    }
    BranchLookup::NotFound
}

/// Builds permalinks by querying git through a [`GitQuery`].
pub struct PermalinkResolver<'a> {
    git: &'a dyn GitQuery,
}

impl<'a> PermalinkResolver<'a> {
    pub fn new(git: &'a dyn GitQuery) -> Self {
        Self { git }
    }

    /// Run a query, turning failures and empty output into `None`.
    fn query(&self, args: &[&str], cwd: &Path) -> Option<String> {
        match self.git.run(args, cwd) {
            Ok(output) if !output.is_empty() => Some(output),
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(error = %err, "git query failed");
                None
            }
        }
    }

    pub fn repository_root(&self, cwd: &Path) -> Option<PathBuf> {
        self.query(&["rev-parse", "--show-toplevel"], cwd)
            .map(PathBuf::from)
    }

    pub fn remote(&self, cwd: &Path) -> Result<RemoteInfo, PermalinkError> {
        let url = self
            .query(&["remote", "get-url", "origin"], cwd)
            .ok_or(PermalinkError::NoRemote)?;
        parse_github_url(&url).ok_or(PermalinkError::UnsupportedRemote(url))
    }

    pub fn commit(&self, cwd: &Path) -> Option<String> {
        self.query(&["rev-parse", "HEAD"], cwd)
    }

    /// Commit hash or default branch name, per `link_type`.
    pub fn resolve_ref(
        &self,
        cwd: &Path,
        link_type: PermalinkType,
    ) -> Result<String, PermalinkError> {
        match link_type {
            PermalinkType::Commit => self.commit(cwd).ok_or(PermalinkError::NoCommit),
            PermalinkType::Branch => match discover_default_branch(self.git, cwd) {
                BranchLookup::Found(branch) => Ok(branch),
                BranchLookup::NotFound => Err(PermalinkError::NoDefaultBranch),
            },
        }
    }

    /// Permalink to `file` (absolute path) at `span`.
    pub fn resolve(
        &self,
        file: &Path,
        span: Option<LineSpan>,
        link_type: PermalinkType,
    ) -> Result<String, PermalinkError> {
        let cwd = file.parent().unwrap_or_else(|| Path::new("."));
        let root = self
            .repository_root(cwd)
            .ok_or(PermalinkError::NotARepository)?;
        let remote = self.remote(cwd)?;
        let git_ref = self.resolve_ref(cwd, link_type)?;
        let repo_path = repository_path(file, &root)?;
        Ok(assemble_permalink(&remote, &git_ref, &repo_path, span))
    }
}

/// `file` relative to `root`, with forward slashes.
fn repository_path(file: &Path, root: &Path) -> Result<String, PermalinkError> {
    if let Ok(relative) = file.strip_prefix(root) {
        return Ok(to_forward_slashes(relative));
    }

    // git prints the canonical top level; `file` may still go through a symlink.
    if let (Ok(file), Ok(root)) = (fs::canonicalize(file), fs::canonicalize(root))
        && let Ok(relative) = file.strip_prefix(&root)
    {
        return Ok(to_forward_slashes(relative));
    }

    Err(PermalinkError::OutsideRepository(
        file.display().to_string(),
    ))
}
