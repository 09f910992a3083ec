//! Extension points injected into the markdown parser.
//!
//! The parser does not know where aliases come from or how metadata is
//! interpreted; both are supplied by the caller.

use crate::tree::Frontmatter;
use std::path::PathBuf;

/// Maps an alias written in a wikilink to candidate paths.
///
/// Implementations return exactly one candidate: the known canonical path,
/// or the alias itself when it is not known.
pub trait AliasResolver: Send + Sync {
    fn resolve_alias(&self, alias: &str) -> Vec<PathBuf>;
}

/// Resolver with no knowledge: every alias is its own literal path
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralAliases;

impl AliasResolver for LiteralAliases {
    fn resolve_alias(&self, alias: &str) -> Vec<PathBuf> {
        vec![PathBuf::from(alias)]
    }
}

impl<T: AliasResolver + ?Sized> AliasResolver for std::sync::Arc<T> {
    fn resolve_alias(&self, alias: &str) -> Vec<PathBuf> {
        (**self).resolve_alias(alias)
    }
}

/// Interprets the raw text of a leading metadata block
pub trait FrontmatterHandler: Send + Sync {
    fn handle(&self, raw: &str) -> Option<Frontmatter>;
}

/// YAML metadata; anything that is not a mapping is dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFrontmatter;

impl FrontmatterHandler for YamlFrontmatter {
    fn handle(&self, raw: &str) -> Option<Frontmatter> {
        match serde_yaml::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(map)) => Some(Frontmatter {
                data: map.into_iter().collect(),
            }),
            Ok(_) => None,
            Err(e) => {
                log::debug!("Ignoring unparseable frontmatter: {}", e);
                None
            }
        }
    }
}
