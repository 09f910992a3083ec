//! Title and link extraction over a [`DocumentTree`].
//!
//! Both extractors are pure functions of the tree.

use crate::DocumentParser;
use crate::tree::{DocumentTree, TreeNode};
use serde::{Deserialize, Serialize};

/// What the graph needs to know about one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// First heading, or `None` when the document has no title
    pub title: Option<String>,
    /// Outgoing links as written, in document order
    pub links: Vec<String>,
}

/// First non-empty heading in tree order, truncated to `max_len` characters
pub fn extract_title(tree: &DocumentTree, max_len: usize) -> Option<String> {
    tree.headings()
        .map(|(_, text)| text.trim())
        .find(|text| !text.is_empty())
        .map(|text| truncate_chars(text, max_len))
}

/// Every internal link, as written, in tree order.
///
/// Alias lookup and path joining both start from this raw text; the
/// alias-resolved form stays on the [`TreeNode`].
pub fn extract_links(tree: &DocumentTree) -> Vec<String> {
    tree.links()
        .filter_map(|node| match node {
            TreeNode::Link { raw, .. } => Some(raw.clone()),
            _ => None,
        })
        .collect()
}

/// Parse `content` and extract title and links.
///
/// A document without a title contributes no links either.
pub fn parse_document<P: DocumentParser + ?Sized>(
    parser: &P,
    content: &str,
    title_max_length: usize,
) -> ParsedDocument {
    let tree = parser.parse(content);
    match extract_title(&tree, title_max_length) {
        Some(title) => ParsedDocument {
            title: Some(title),
            links: extract_links(&tree),
        },
        None => ParsedDocument::default(),
    }
}

fn truncate_chars(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}
