//! Alias table mapping document identifiers and file names to paths.

use notegraph_core::file_name_aliases;
use notegraph_parser::{AliasResolver, extract_identifier};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Alias → canonical path table.
///
/// Learned additively: the last document to claim an alias wins, and
/// entries are only removed through [`IdentityTable::forget_path`].
#[derive(Debug, Default)]
pub struct IdentityTable {
    aliases: RwLock<HashMap<String, PathBuf>>,
}

impl IdentityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the aliases of the document at `path`.
    ///
    /// Registers the explicit `id:` marker when present, the file name and
    /// the file stem. Returns how many aliases were written.
    pub fn learn_identity(&self, path: &Path, content: &str) -> usize {
        let mut learned = Vec::with_capacity(3);
        if let Some(id) = extract_identifier(content) {
            learned.push(id.to_string());
        }
        if let Some((name, stem)) = file_name_aliases(path) {
            learned.push(name);
            learned.push(stem);
        }

        let mut aliases = self.aliases.write();
        for alias in &learned {
            if let Some(previous) = aliases.insert(alias.clone(), path.to_path_buf())
                && previous != path
            {
                log::debug!(
                    "Alias '{}' moved from {} to {}",
                    alias,
                    previous.display(),
                    path.display()
                );
            }
        }
        learned.len()
    }

    /// Known canonical path for `alias`
    pub fn lookup(&self, alias: &str) -> Option<PathBuf> {
        self.aliases.read().get(alias).cloned()
    }

    /// Exactly one candidate: the known path, else `alias` as a literal path
    pub fn resolve_alias(&self, alias: &str) -> Vec<PathBuf> {
        vec![self.lookup(alias).unwrap_or_else(|| PathBuf::from(alias))]
    }

    /// Drop every alias that points at `path`; returns how many were removed
    pub fn forget_path(&self, path: &Path) -> usize {
        let mut aliases = self.aliases.write();
        let before = aliases.len();
        aliases.retain(|_, target| target != path);
        before - aliases.len()
    }

    pub fn len(&self) -> usize {
        self.aliases.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.read().is_empty()
    }
}

impl AliasResolver for IdentityTable {
    fn resolve_alias(&self, alias: &str) -> Vec<PathBuf> {
        IdentityTable::resolve_alias(self, alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learns_three_aliases() {
        let table = IdentityTable::new();
        let path = Path::new("/docs/note-one.md");
        let learned = table.learn_identity(path, "---\nid: note1\n---\n# Note One");

        assert_eq!(learned, 3);
        assert_eq!(table.lookup("note1"), Some(path.to_path_buf()));
        assert_eq!(table.lookup("note-one.md"), Some(path.to_path_buf()));
        assert_eq!(table.lookup("note-one"), Some(path.to_path_buf()));
    }

    #[test]
    fn test_no_marker_learns_file_names_only() {
        let table = IdentityTable::new();
        let learned = table.learn_identity(Path::new("/ws/b.md"), "# Bee");
        assert_eq!(learned, 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unknown_alias_is_literal() {
        let table = IdentityTable::new();
        assert_eq!(
            table.resolve_alias("some/path.md"),
            vec![PathBuf::from("some/path.md")]
        );
    }

    #[test]
    fn test_last_writer_wins() {
        let table = IdentityTable::new();
        table.learn_identity(Path::new("/ws/a/index.md"), "# A");
        table.learn_identity(Path::new("/ws/b/index.md"), "# B");
        assert_eq!(table.lookup("index"), Some(PathBuf::from("/ws/b/index.md")));
    }

    #[test]
    fn test_relearning_is_stable() {
        let table = IdentityTable::new();
        let path = Path::new("/ws/a.md");
        table.learn_identity(path, "id: alpha");
        table.learn_identity(path, "id: alpha");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_forget_path() {
        let table = IdentityTable::new();
        table.learn_identity(Path::new("/ws/a.md"), "id: alpha");
        table.learn_identity(Path::new("/ws/b.md"), "");

        assert_eq!(table.forget_path(Path::new("/ws/a.md")), 3);
        assert_eq!(table.lookup("alpha"), None);
        assert_eq!(table.lookup("b"), Some(PathBuf::from("/ws/b.md")));
    }

    #[test]
    fn test_usable_as_parser_alias_resolver() {
        let table = IdentityTable::new();
        table.learn_identity(Path::new("/ws/b.md"), "");
        let resolver: &dyn AliasResolver = &table;
        assert_eq!(resolver.resolve_alias("b"), vec![PathBuf::from("/ws/b.md")]);
    }
}
