//! # notegraph parser
//!
//! Document parser adapter built on `pulldown-cmark`.
//!
//! This crate turns raw document text into a flat [`DocumentTree`] and
//! extracts the two things the link graph needs: a title and the outgoing
//! link targets.
//!
//! ## Architecture
//!
//! [`MarkdownParser`] runs two passes:
//!
//! - **pulldown-cmark pass**: headings, markdown links, the leading YAML
//!   metadata block, and the byte ranges of code and HTML
//! - **regex pass**: `[[wikilinks]]` and `![[embeds]]`, skipping those ranges
//!
//! Two extension points are injected rather than hard-wired:
//!
//! - [`AliasResolver`] maps a wikilink alias to a path (the graph crate's
//!   identity table implements it)
//! - [`FrontmatterHandler`] interprets the metadata block (YAML by default)
//!
//! ## Quick Start
//!
//! ```
//! use notegraph_parser::{MarkdownParser, parse_document};
//!
//! let parser = MarkdownParser::new();
//! let parsed = parse_document(&parser, "# Alpha\n\nSee [[b]].", 60);
//!
//! assert_eq!(parsed.title.as_deref(), Some("Alpha"));
//! assert_eq!(parsed.links, vec!["b"]);
//! ```
//!
//! ## Identifier marker
//!
//! [`extract_identifier`] finds the first `id: <token>` line in raw text.
//! It is deliberately independent of the tree so the identity pass can run
//! without a full parse.

mod engine;
mod extract;
pub mod link_utils;
mod marker;
mod strategy;
mod tree;

pub use engine::MarkdownParser;
pub use extract::{ParsedDocument, extract_links, extract_title, parse_document};
pub use marker::extract_identifier;
pub use strategy::{AliasResolver, FrontmatterHandler, LiteralAliases, YamlFrontmatter};
pub use tree::{DocumentTree, Frontmatter, LinkKind, TreeNode};

/// Turns document text into a tree
pub trait DocumentParser: Send + Sync {
    fn parse(&self, content: &str) -> DocumentTree;
}

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::{
        AliasResolver, DocumentParser, DocumentTree, FrontmatterHandler, MarkdownParser,
        ParsedDocument, TreeNode, extract_identifier, extract_links, extract_title,
        parse_document,
    };
}
