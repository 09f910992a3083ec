//! Shared helpers for paths and serialization.

use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Generic JSON serialization with consistent error handling
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| Error::other(format!("Failed to serialize {} as JSON: {}", context, e)))
}

/// Lexically normalize a path without touching the file system.
///
/// `.` components are dropped and `..` pops the previous component. A `..`
/// at the root is discarded, so an absolute path never climbs above it.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                if normalized.file_name().is_some() {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::Normal(name) => {
                normalized.push(name);
            }
            Component::RootDir => {
                normalized.push(component);
            }
            Component::CurDir => {}
            Component::Prefix(p) => {
                normalized.push(p.as_os_str());
            }
        }
    }
    normalized
}

/// Absolute, lexically normalized form of `path`.
///
/// Relative paths are resolved against the current directory. Symlinks are
/// not followed, so the result matches what a directory walk from the same
/// root produces.
pub fn canonical_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(Error::io)?;
    Ok(normalize_path(&absolute))
}

/// Whether the bare file name starts with the hidden-file marker
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// File name with and without extension, e.g. `("note.md", "note")`
pub fn file_name_aliases(path: &Path) -> Option<(String, String)> {
    let name = path.file_name()?.to_str()?.to_string();
    let stem = path.file_stem()?.to_str()?.to_string();
    Some((name, stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_cur_dir() {
        assert_eq!(
            normalize_path(Path::new("/ws/./notes/./a.md")),
            PathBuf::from("/ws/notes/a.md")
        );
    }

    #[test]
    fn test_normalize_resolves_parent_dir() {
        assert_eq!(
            normalize_path(Path::new("/ws/sub/../other/b.md")),
            PathBuf::from("/ws/other/b.md")
        );
    }

    #[test]
    fn test_normalize_never_climbs_above_root() {
        assert_eq!(
            normalize_path(Path::new("/ws/../../../etc/passwd")),
            PathBuf::from("/etc/passwd")
        );
    }

    #[test]
    fn test_normalize_keeps_leading_parent_on_relative_paths() {
        assert_eq!(
            normalize_path(Path::new("../a/./b.md")),
            PathBuf::from("../a/b.md")
        );
    }

    #[test]
    fn test_canonical_path_is_absolute_and_clean() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            canonical_path(Path::new("./notes/../a.md")).unwrap(),
            cwd.join("a.md")
        );
        assert_eq!(
            canonical_path(Path::new("/ws/./sub/../a.md")).unwrap(),
            PathBuf::from("/ws/a.md")
        );
        assert!(canonical_path(Path::new("")).is_err());
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new("/ws/.draft.md")));
        assert!(!is_hidden(Path::new("/ws/.config/visible.md")));
        assert!(!is_hidden(Path::new("/ws/note.md")));
    }

    #[test]
    fn test_file_name_aliases() {
        assert_eq!(
            file_name_aliases(Path::new("/ws/docs/note-one.md")),
            Some(("note-one.md".to_string(), "note-one".to_string()))
        );
        assert_eq!(
            file_name_aliases(Path::new("/ws/README")),
            Some(("README".to_string(), "README".to_string()))
        );
    }
}
