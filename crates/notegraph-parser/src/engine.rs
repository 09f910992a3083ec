//! Markdown parsing engine.
//!
//! Two passes over the same text:
//! 1. pulldown-cmark: metadata block, headings, markdown links, and the byte
//!    ranges (code blocks, inline code, HTML) where wiki syntax is inert
//! 2. regex: `[[wikilinks]]` and `![[embeds]]` outside those ranges
//!
//! The results are merged by byte offset into a [`DocumentTree`].

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::ops::Range;
use std::sync::{Arc, LazyLock};

use crate::DocumentParser;
use crate::link_utils::{markdown_target, wikilink_target};
use crate::strategy::{AliasResolver, FrontmatterHandler, LiteralAliases, YamlFrontmatter};
use crate::tree::{DocumentTree, LinkKind, TreeNode};

/// Wikilink or embed: `[[target]]`, `![[target|display]]`
static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[\[([^\]]+)\]\]").unwrap());

#[inline]
fn has_wikilink(content: &str) -> bool {
    content.contains("[[")
}

/// Byte ranges where wiki syntax must not be interpreted.
#[derive(Debug, Default, Clone)]
struct ExcludedRanges {
    ranges: Vec<Range<usize>>,
}

impl ExcludedRanges {
    /// Check if a byte offset falls within any excluded range.
    #[inline]
    fn contains(&self, offset: usize) -> bool {
        if self.ranges.is_empty() {
            return false;
        }

        // ranges[idx - 1] is the last range starting at or before `offset`
        let idx = self.ranges.partition_point(|r| r.start <= offset);
        if idx == 0 {
            return false;
        }
        offset < self.ranges[idx - 1].end
    }

    fn add(&mut self, range: Range<usize>) {
        self.ranges.push(range);
    }

    /// Sort and merge overlapping ranges for binary search.
    fn optimize(&mut self) {
        if self.ranges.is_empty() {
            return;
        }
        self.ranges.sort_by_key(|r| r.start);

        let mut merged = Vec::with_capacity(self.ranges.len());
        let mut current = self.ranges[0].clone();

        for range in self.ranges.iter().skip(1) {
            if range.start <= current.end {
                current.end = current.end.max(range.end);
            } else {
                merged.push(current);
                current = range.clone();
            }
        }
        merged.push(current);
        self.ranges = merged;
    }
}

/// CommonMark + wikilink parser with pluggable alias and metadata handling.
///
/// ```
/// use notegraph_parser::{DocumentParser, MarkdownParser};
///
/// let parser = MarkdownParser::new();
/// let tree = parser.parse("# Title\n\nSee [[Note]] and [doc](./doc.md)");
/// assert_eq!(tree.headings().next(), Some((1, "Title")));
/// assert_eq!(tree.links().count(), 2);
/// ```
#[derive(Clone)]
pub struct MarkdownParser {
    aliases: Arc<dyn AliasResolver>,
    frontmatter: Arc<dyn FrontmatterHandler>,
}

impl MarkdownParser {
    /// Parser that treats every wikilink target literally
    pub fn new() -> Self {
        Self {
            aliases: Arc::new(LiteralAliases),
            frontmatter: Arc::new(YamlFrontmatter),
        }
    }

    /// Use `resolver` to map wikilink aliases to paths
    pub fn with_alias_resolver(mut self, resolver: Arc<dyn AliasResolver>) -> Self {
        self.aliases = resolver;
        self
    }

    /// Use `handler` to interpret the leading metadata block
    pub fn with_frontmatter_handler(mut self, handler: Arc<dyn FrontmatterHandler>) -> Self {
        self.frontmatter = handler;
        self
    }

    fn options() -> Options {
        let mut opts = Options::empty();
        opts.insert(Options::ENABLE_TASKLISTS);
        opts.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
        opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        opts.insert(Options::ENABLE_STRIKETHROUGH);
        opts.insert(Options::ENABLE_TABLES);
        opts
    }

    /// Pass 1: headings, markdown links, metadata and excluded ranges.
    fn pulldown_pass(&self, content: &str, tree: &mut DocumentTree) -> ExcludedRanges {
        let mut excluded = ExcludedRanges::default();

        let mut code_block_start: usize = 0;
        let mut metadata_start: usize = 0;
        let mut in_metadata = false;
        let mut metadata_content = String::new();
        let mut current_heading: Option<(HeadingLevel, usize)> = None;
        let mut heading_text = String::new();

        for (event, range) in Parser::new_ext(content, Self::options()).into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    code_block_start = range.start;
                }
                Event::End(TagEnd::CodeBlock) => {
                    excluded.add(code_block_start..range.end);
                }
                Event::Code(code) => {
                    if current_heading.is_some() {
                        heading_text.push_str(&code);
                    }
                    excluded.add(range.clone());
                }
                Event::Html(_) | Event::InlineHtml(_) => {
                    excluded.add(range.clone());
                }

                Event::Start(Tag::MetadataBlock(_)) => {
                    in_metadata = true;
                    metadata_start = range.start;
                    metadata_content.clear();
                }
                Event::End(TagEnd::MetadataBlock(_)) => {
                    in_metadata = false;
                    excluded.add(metadata_start..range.end);
                    if !metadata_content.is_empty() {
                        tree.frontmatter = self.frontmatter.handle(&metadata_content);
                    }
                }
                Event::Text(text) if in_metadata => {
                    metadata_content.push_str(&text);
                }

                Event::Start(Tag::Heading { level, .. }) => {
                    current_heading = Some((level, range.start));
                    heading_text.clear();
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, offset)) = current_heading.take() {
                        tree.nodes.push(TreeNode::Heading {
                            level: heading_level(level),
                            text: heading_text.trim().to_string(),
                            offset,
                        });
                    }
                }
                Event::Text(text) if current_heading.is_some() => {
                    heading_text.push_str(&text);
                }

                Event::Start(Tag::Link { dest_url, .. }) => {
                    if let Some(target) = markdown_target(&dest_url) {
                        tree.nodes.push(TreeNode::Link {
                            kind: LinkKind::Markdown,
                            raw: target.to_string(),
                            target: target.to_string(),
                            offset: range.start,
                        });
                    }
                }

                _ => {}
            }
        }

        excluded.optimize();
        excluded
    }

    /// Pass 2: wikilinks and embeds, skipping excluded ranges.
    fn wikilink_pass(&self, content: &str, excluded: &ExcludedRanges, tree: &mut DocumentTree) {
        if !has_wikilink(content) {
            return;
        }

        for caps in WIKILINK.captures_iter(content) {
            let full_match = caps.get(0).unwrap();
            if excluded.contains(full_match.start()) {
                continue;
            }

            let Some(raw) = wikilink_target(caps.get(2).unwrap().as_str()) else {
                continue;
            };

            let kind = if caps.get(1).is_some_and(|m| !m.as_str().is_empty()) {
                LinkKind::Embed
            } else {
                LinkKind::WikiLink
            };

            let target = self
                .aliases
                .resolve_alias(raw)
                .into_iter()
                .next()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|| raw.to_string());

            tree.nodes.push(TreeNode::Link {
                kind,
                raw: raw.to_string(),
                target,
                offset: full_match.start(),
            });
        }
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MarkdownParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownParser").finish_non_exhaustive()
    }
}

impl DocumentParser for MarkdownParser {
    fn parse(&self, content: &str) -> DocumentTree {
        let mut tree = DocumentTree::default();
        let excluded = self.pulldown_pass(content, &mut tree);
        self.wikilink_pass(content, &excluded, &mut tree);

        // Stable: a heading and a link never share an offset
        tree.nodes.sort_by_key(TreeNode::offset);
        tree
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
