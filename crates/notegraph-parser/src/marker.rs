//! Explicit document identifier: a single `id: <token>` line.
//!
//! The marker is matched against raw text, so it works both inside a YAML
//! frontmatter block and as a bare line in the body.

use regex::Regex;
use std::sync::LazyLock;

static ID_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*id:[ \t]*(\S+)[ \t]*\r?$").unwrap());

/// First explicit identifier declared in `content`, if any
pub fn extract_identifier(content: &str) -> Option<&str> {
    ID_MARKER
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
