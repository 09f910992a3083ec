//! Shared utilities for link classification and cleanup.
//!
//! Both link flavours go through here so that wikilinks and markdown links
//! agree on what counts as an internal document reference.

/// Whether a markdown link destination points outside the workspace
pub fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("mailto:")
}

/// Document part of a wikilink body.
///
/// Strips `|display text` and any `#heading` / `#^block` fragment. Returns
/// `None` for same-document references such as `[[#Heading]]`.
///
/// ```
/// use notegraph_parser::link_utils::wikilink_target;
///
/// assert_eq!(wikilink_target("Note"), Some("Note"));
/// assert_eq!(wikilink_target("Note|Shown"), Some("Note"));
/// assert_eq!(wikilink_target("Note#Heading"), Some("Note"));
/// assert_eq!(wikilink_target("#^block"), None);
/// ```
pub fn wikilink_target(body: &str) -> Option<&str> {
    let target = body.split('|').next().unwrap_or(body);
    document_part(target)
}

/// Document part of a markdown link destination.
///
/// Returns `None` for external URLs and pure anchors.
///
/// ```
/// use notegraph_parser::link_utils::markdown_target;
///
/// assert_eq!(markdown_target("./docs/api.md"), Some("./docs/api.md"));
/// assert_eq!(markdown_target("file.md#section"), Some("file.md"));
/// assert_eq!(markdown_target("#section"), None);
/// assert_eq!(markdown_target("https://example.com"), None);
/// ```
pub fn markdown_target(url: &str) -> Option<&str> {
    if is_external(url) {
        return None;
    }
    document_part(url)
}

fn document_part(target: &str) -> Option<&str> {
    let doc = target.split('#').next().unwrap_or(target).trim();
    if doc.is_empty() { None } else { Some(doc) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_links() {
        assert!(is_external("https://example.com"));
        assert!(is_external("http://example.com/path"));
        assert!(is_external("mailto:user@example.com"));
        assert!(!is_external("./docs/api.md"));
        assert!(!is_external("/images/x.png"));
    }

    #[test]
    fn test_wikilink_folder_with_display_text() {
        assert_eq!(
            wikilink_target("capabilities/File Management|File Management"),
            Some("capabilities/File Management")
        );
    }

    #[test]
    fn test_wikilink_same_doc_anchor() {
        assert_eq!(wikilink_target("#Heading"), None);
        assert_eq!(wikilink_target("#Section Title|alias"), None);
    }

    #[test]
    fn test_markdown_relative_links() {
        assert_eq!(markdown_target("relative/path.md"), Some("relative/path.md"));
        assert_eq!(
            markdown_target("../parent/file.txt"),
            Some("../parent/file.txt")
        );
        assert_eq!(markdown_target("note.md#^abc123"), Some("note.md"));
    }
}
