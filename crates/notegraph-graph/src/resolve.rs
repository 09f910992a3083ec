//! Link target resolution.
//!
//! A link is resolved in two steps, both starting from the decoded link
//! text: alias lookup in the [`IdentityTable`], then path joining.
//!
//! Path joining, evaluated in order:
//! 1. `/x` is root-relative: joined onto the workspace root
//! 2. a relative path is joined onto the referring document's directory
//! 3. an absolute path is taken as-is
//!
//! Every result is lexically normalized.

use crate::identity::IdentityTable;
use notegraph_core::normalize_path;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Reverse the URI escaping markdown link destinations require
pub fn decode_link(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}

/// Resolve by path joining only
pub fn resolve_target(raw_link: &str, referring_document: &Path, workspace_root: &Path) -> PathBuf {
    join_target(&decode_link(raw_link), referring_document, workspace_root)
}

/// Resolve by alias first, falling back to path joining
pub fn resolve_link(
    identities: &IdentityTable,
    raw_link: &str,
    referring_document: &Path,
    workspace_root: &Path,
) -> PathBuf {
    let decoded = decode_link(raw_link);
    match identities.lookup(&decoded) {
        Some(path) => normalize_path(&path),
        None => join_target(&decoded, referring_document, workspace_root),
    }
}

fn join_target(link: &str, referring_document: &Path, workspace_root: &Path) -> PathBuf {
    if let Some(rooted) = link.strip_prefix('/') {
        let resolved = normalize_path(&workspace_root.join(rooted));
        return force_leading_separator(resolved);
    }

    let link_path = Path::new(link);
    if !link_path.is_absolute() {
        let dir = referring_document.parent().unwrap_or_else(|| Path::new(""));
        return normalize_path(&dir.join(link_path));
    }

    normalize_path(link_path)
}

/// On backslash platforms normalization can drop the leading separator
fn force_leading_separator(path: PathBuf) -> PathBuf {
    if MAIN_SEPARATOR == '\\' && !path.has_root() {
        let mut forced = MAIN_SEPARATOR.to_string();
        forced.push_str(&path.to_string_lossy());
        return PathBuf::from(forced);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_relative_link() {
        let resolved = resolve_target(
            "/images/x.png",
            Path::new("/ws/sub/doc.md"),
            Path::new("/ws"),
        );
        assert_eq!(resolved, PathBuf::from("/ws/images/x.png"));
    }

    #[test]
    fn test_relative_link_joins_document_directory() {
        let resolved = resolve_target("./note1.md", Path::new("/ws/docs/a.md"), Path::new("/ws"));
        assert_eq!(resolved, PathBuf::from("/ws/docs/note1.md"));
    }

    #[test]
    fn test_relative_link_with_parent_dir() {
        let resolved = resolve_target(
            "../other/b.md",
            Path::new("/ws/docs/a.md"),
            Path::new("/ws"),
        );
        assert_eq!(resolved, PathBuf::from("/ws/other/b.md"));
    }

    #[test]
    fn test_percent_encoded_link_is_decoded() {
        let resolved = resolve_target("My%20Note.md", Path::new("/ws/a.md"), Path::new("/ws"));
        assert_eq!(resolved, PathBuf::from("/ws/My Note.md"));
    }

    #[test]
    fn test_root_relative_cannot_escape_filesystem_root() {
        let resolved = resolve_target("/../../x.md", Path::new("/ws/a.md"), Path::new("/ws"));
        assert_eq!(resolved, PathBuf::from("/x.md"));
    }

    #[test]
    fn test_alias_takes_precedence_over_path_joining() {
        let identities = IdentityTable::new();
        identities.learn_identity(Path::new("/docs/note-one.md"), "id: note1");

        let by_alias = resolve_link(
            &identities,
            "note1",
            Path::new("/ws/a.md"),
            Path::new("/ws"),
        );
        assert_eq!(by_alias, PathBuf::from("/docs/note-one.md"));

        let by_path = resolve_link(
            &identities,
            "./note1.md",
            Path::new("/ws/a.md"),
            Path::new("/ws"),
        );
        assert_eq!(by_path, PathBuf::from("/ws/note1.md"));
    }

    #[test]
    fn test_unknown_alias_falls_back_to_literal_path() {
        let identities = IdentityTable::new();
        let resolved = resolve_link(
            &identities,
            "b",
            Path::new("/ws/sub/a.md"),
            Path::new("/ws"),
        );
        assert_eq!(resolved, PathBuf::from("/ws/sub/b"));
    }

    #[test]
    fn test_encoded_alias_is_looked_up_decoded() {
        let identities = IdentityTable::new();
        identities.learn_identity(Path::new("/ws/My Note.md"), "");
        let resolved = resolve_link(
            &identities,
            "My%20Note",
            Path::new("/ws/sub/a.md"),
            Path::new("/ws"),
        );
        assert_eq!(resolved, PathBuf::from("/ws/My Note.md"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_link_on_unix_is_root_relative() {
        let resolved = resolve_target("/etc/notes.md", Path::new("/ws/a.md"), Path::new("/ws"));
        assert_eq!(resolved, PathBuf::from("/ws/etc/notes.md"));
    }
}
