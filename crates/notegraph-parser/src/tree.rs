//! Flattened document tree produced by a [`DocumentParser`](crate::DocumentParser).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parsed leading metadata block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    pub data: HashMap<String, serde_json::Value>,
}

impl Frontmatter {
    /// Look up a top-level key
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }
}

/// How a link was written in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// `[[Note]]`
    WikiLink,
    /// `![[Note]]`
    Embed,
    /// `[text](path.md)`
    Markdown,
}

/// A node of interest in the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeNode {
    Heading {
        level: u8,
        text: String,
        offset: usize,
    },
    Link {
        kind: LinkKind,
        /// Target as written, with display text and fragment removed
        raw: String,
        /// Target after the alias extension ran (equal to `raw` for markdown links).
        ///
        /// Informational only: it reflects the aliases known when this tree
        /// was parsed. Graph indexing resolves links from `raw`.
        target: String,
        offset: usize,
    },
}

impl TreeNode {
    /// Byte offset of the node in the source text
    pub fn offset(&self) -> usize {
        match self {
            TreeNode::Heading { offset, .. } | TreeNode::Link { offset, .. } => *offset,
        }
    }
}

/// Document tree in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTree {
    pub frontmatter: Option<Frontmatter>,
    pub nodes: Vec<TreeNode>,
}

impl DocumentTree {
    /// Iterate over headings as `(level, text)`
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.nodes.iter().filter_map(|node| match node {
            TreeNode::Heading { level, text, .. } => Some((*level, text.as_str())),
            _ => None,
        })
    }

    /// Iterate over link nodes
    pub fn links(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes
            .iter()
            .filter(|node| matches!(node, TreeNode::Link { .. }))
    }
}
