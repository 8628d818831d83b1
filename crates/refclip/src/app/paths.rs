//! Display paths for copied references.

use std::path::{Component, Path, PathBuf};

use crate::domain::model::PathType;

/// Path text to put in front of a line reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPath {
    pub path: String,
    /// Set when a relative path was requested but no workspace root was known.
    pub fell_back_to_absolute: bool,
}

/// Render `file` according to `path_type`.
///
/// Relative paths need a workspace root; without one the absolute path is used and
/// [`DisplayPath::fell_back_to_absolute`] is set.
pub fn resolve_display_path(
    file: &Path,
    path_type: PathType,
    workspace_root: Option<&Path>,
) -> DisplayPath {
    match (path_type, workspace_root) {
        (PathType::Absolute, _) => DisplayPath {
            path: file.display().to_string(),
            fell_back_to_absolute: false,
        },
        (PathType::Relative, Some(root)) => DisplayPath {
            path: relative_path(file, root).display().to_string(),
            fell_back_to_absolute: false,
        },
        (PathType::Relative, None) => DisplayPath {
            path: file.display().to_string(),
            fell_back_to_absolute: true,
        },
    }
}

/// Path of `path` relative to `base`, walking up with `..` when `path` is outside `base`.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix(base) {
        return stripped.to_path_buf();
    }

    let path_components: Vec<Component<'_>> = path.components().collect();
    let base_components: Vec<Component<'_>> = base.components().collect();
    let shared = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[shared..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// Join path components with `/` regardless of the host separator.
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_mode_keeps_path() {
        let display =
            resolve_display_path(Path::new("/repo/src/lib.rs"), PathType::Absolute, None);
        assert_eq!(display.path, "/repo/src/lib.rs");
        assert!(!display.fell_back_to_absolute);
    }

    #[test]
    fn relative_mode_strips_workspace_root() {
        let display = resolve_display_path(
            Path::new("/repo/src/lib.rs"),
            PathType::Relative,
            Some(Path::new("/repo")),
        );
        assert_eq!(display.path, Path::new("src/lib.rs").display().to_string());
    }

    #[test]
    fn relative_mode_without_root_falls_back() {
        let display =
            resolve_display_path(Path::new("/tmp/scratch.rs"), PathType::Relative, None);
        assert_eq!(display.path, "/tmp/scratch.rs");
        assert!(display.fell_back_to_absolute);
    }

    #[test]
    fn files_outside_root_walk_up() {
        let relative = relative_path(Path::new("/work/other/a.rs"), Path::new("/work/repo/sub"));
        assert_eq!(relative, Path::new("../../other/a.rs"));
    }

    #[test]
    fn forward_slashes_for_nested_paths() {
        let path: PathBuf = ["src", "app", "mod.rs"].iter().collect();
        assert_eq!(to_forward_slashes(&path), "src/app/mod.rs");
    }
}
