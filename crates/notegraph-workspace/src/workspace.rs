//! Workspace orchestration: learn pass, parse pass and incremental updates

use crate::walker::{DirectoryWalker, WalkSummary};
use crate::watcher::WorkspaceEvent;
use notegraph_core::prelude::*;
use notegraph_graph::{DocumentUpdate, IdentityTable, LinkGraph, resolve_link};
use notegraph_parser::{DocumentParser, MarkdownParser, parse_document};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

/// Link graph shared between concurrently indexed documents
pub type SharedGraph = Arc<RwLock<LinkGraph>>;

/// Owns the identity table, the shared graph and the parser for one root
pub struct Workspace {
    config: WorkspaceConfig,
    walker: DirectoryWalker,
    identities: Arc<IdentityTable>,
    parser: Arc<dyn DocumentParser>,
    graph: SharedGraph,
}

impl Workspace {
    /// Create a workspace. The root is canonicalized and the configuration
    /// validated first.
    pub fn new(mut config: WorkspaceConfig) -> Result<Self> {
        config.canonicalize_root()?;
        config.validate()?;

        let identities = Arc::new(IdentityTable::new());
        let parser = MarkdownParser::new().with_alias_resolver(identities.clone());

        Ok(Self {
            walker: DirectoryWalker::new(config.clone()),
            config,
            identities,
            parser: Arc::new(parser),
            graph: Arc::new(RwLock::new(LinkGraph::new())),
        })
    }

    /// Replace the document parser
    pub fn with_parser(mut self, parser: Arc<dyn DocumentParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn walker(&self) -> &DirectoryWalker {
        &self.walker
    }

    /// Handle to the shared graph
    pub fn graph(&self) -> SharedGraph {
        self.graph.clone()
    }

    pub fn identities(&self) -> Arc<IdentityTable> {
        self.identities.clone()
    }

    /// Copy of the current graph state
    pub async fn snapshot(&self) -> GraphSnapshot {
        self.graph.read().await.snapshot()
    }

    /// Register the aliases of one document
    #[instrument(skip(self), fields(file = ?path), name = "workspace_learn_file")]
    pub async fn learn_file(&self, path: &Path) -> Result<()> {
        let path = canonical_path(path)?;
        let content = read_document(&path).await?;
        let learned = self.identities.learn_identity(&path, &content);
        log::trace!("Learned {} aliases for {}", learned, path.display());
        Ok(())
    }

    /// Parse one document and apply it to `graph`.
    ///
    /// `path` may be relative or unnormalized; the node is keyed by its
    /// canonical form. The write guard is taken once the read has completed
    /// and released before returning, so no await happens while it is held.
    #[instrument(skip(self, graph), fields(file = ?path), name = "workspace_index_file")]
    pub async fn index_file(&self, graph: SharedGraph, path: &Path) -> Result<DocumentUpdate> {
        let path = canonical_path(path)?;
        let content = read_document(&path).await?;
        let parsed = parse_document(self.parser.as_ref(), &content, self.config.title_max_length);
        let targets: Vec<PathBuf> = parsed
            .links
            .iter()
            .map(|link| resolve_link(&self.identities, link, &path, &self.config.root))
            .collect();

        let update = graph
            .write()
            .await
            .apply_document(&path, parsed.title.as_deref(), &targets);

        log::debug!(
            "Indexed {}: {} links extracted",
            path.display(),
            targets.len()
        );
        Ok(update)
    }

    /// Build the graph from scratch: learn every document, then index every
    /// document.
    ///
    /// The first unreadable document fails initialization once both passes
    /// have run as far as they can.
    #[instrument(skip(self), name = "workspace_initialize")]
    pub async fn initialize(&self) -> Result<WalkSummary> {
        log::info!("Starting workspace initialization for: {:?}", self.config.root);

        let learned = self.learn_all().await?;
        let indexed = self.index_all().await?;

        let graph = self.graph.read().await;
        log::info!(
            "Workspace initialization complete. Graph now has {} documents, {} links",
            graph.node_count(),
            graph.edge_count()
        );
        drop(graph);

        learned.into_result()?;
        indexed.into_result()
    }

    /// Like [`Workspace::initialize`], but unreadable documents are skipped
    /// and reported in the summary
    #[instrument(skip(self), name = "workspace_initialize_isolated")]
    pub async fn initialize_isolated(&self) -> Result<WalkSummary> {
        let learned = self.learn_all().await?;
        for (path, error) in &learned.failures {
            log::warn!("Failed to learn {}: {}", path.display(), error);
        }

        let indexed = self.index_all().await?;
        for (path, error) in &indexed.failures {
            log::warn!("Failed to index {}: {}", path.display(), error);
        }
        Ok(indexed)
    }

    /// Learn pass. Reads run concurrently; aliases are then registered in
    /// discovery order so duplicate file names resolve the same way on
    /// every run.
    async fn learn_all(&self) -> Result<WalkSummary> {
        let reads = self
            .walker
            .run_all(&(), |_, path| async move { read_document(&path).await })
            .await?;

        let mut results = Vec::with_capacity(reads.len());
        for (path, read) in reads {
            let learned = read.map(|content| self.identities.learn_identity(&path, &content));
            results.push((path, learned));
        }
        log::info!("Learned {} aliases", self.identities.len());
        Ok(WalkSummary::from_results(results))
    }

    /// Parse pass over every document, sharing the graph handle
    async fn index_all(&self) -> Result<WalkSummary> {
        self.walker
            .walk_isolated(&self.graph, |graph, path| async move {
                self.index_file(graph, &path).await.map(|_| ())
            })
            .await
    }

    /// Re-learn and re-index a single document after it changed
    #[instrument(skip(self), fields(file = ?path), name = "workspace_refresh_file")]
    pub async fn refresh_file(&self, path: &Path) -> Result<DocumentUpdate> {
        self.learn_file(path).await?;
        self.index_file(self.graph(), path).await
    }

    /// Drop a document's node and outgoing edges.
    ///
    /// Edges from other documents that point at it stay, now dangling.
    #[instrument(skip(self), fields(file = ?path), name = "workspace_remove_file")]
    pub async fn remove_file(&self, path: &Path) -> Result<DocumentUpdate> {
        let path = canonical_path(path)?;
        let forgotten = self.identities.forget_path(&path);
        let update = self.graph.write().await.apply_document(&path, None, &[]);
        log::debug!(
            "Removed {}: {} aliases forgotten, {} links dropped",
            path.display(),
            forgotten,
            update.edges_removed
        );
        Ok(update)
    }

    /// Apply a file system change to the graph
    pub async fn handle_event(&self, event: &WorkspaceEvent) -> Result<()> {
        match event {
            WorkspaceEvent::FileCreated(path) | WorkspaceEvent::FileModified(path) => {
                self.refresh_file(path).await?;
            }
            WorkspaceEvent::FileDeleted(path) => {
                self.remove_file(path).await?;
            }
            WorkspaceEvent::FileRenamed(from, to) => {
                self.remove_file(from).await?;
                if self.config.is_document(to) {
                    self.refresh_file(to).await?;
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("root", &self.config.root)
            .field("aliases", &self.identities.len())
            .finish_non_exhaustive()
    }
}

async fn read_document(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::read(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegraph_graph::NodeChange;
    use std::fs;
    use tempfile::TempDir;

    fn create_workspace(files: &[(&str, &str)]) -> (Workspace, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = temp_dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        let config = WorkspaceConfig::builder(temp_dir.path()).build().unwrap();
        (Workspace::new(config).unwrap(), temp_dir)
    }

    #[test]
    fn test_invalid_root_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = WorkspaceConfig::builder(temp_dir.path()).build().unwrap();
        config.root = temp_dir.path().join("nope");
        assert!(Workspace::new(config).is_err());
    }

    #[tokio::test]
    async fn test_learn_file() {
        let (workspace, temp_dir) = create_workspace(&[("note-one.md", "id: note1\n# One")]);
        let path = temp_dir.path().join("note-one.md");

        workspace.learn_file(&path).await.unwrap();
        assert_eq!(workspace.identities().lookup("note1"), Some(path.clone()));
        assert_eq!(workspace.identities().lookup("note-one"), Some(path));
    }

    #[tokio::test]
    async fn test_index_file_resolves_learned_alias() {
        let (workspace, temp_dir) =
            create_workspace(&[("a.md", "# Alpha\n[[b]]"), ("sub/b.md", "# Bee")]);
        let a = temp_dir.path().join("a.md");
        let b = temp_dir.path().join("sub/b.md");

        workspace.learn_file(&b).await.unwrap();
        let update = workspace.index_file(workspace.graph(), &a).await.unwrap();
        assert_eq!(update.node, NodeChange::Inserted);

        let graph = workspace.graph();
        let graph = graph.read().await;
        assert_eq!(graph.outgoing(&a), &[Edge::between(&a, &b)]);
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let (workspace, temp_dir) = create_workspace(&[]);
        let missing = temp_dir.path().join("missing.md");

        let err = workspace.learn_file(&missing).await.unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[tokio::test]
    async fn test_remove_file_drops_node_and_aliases() {
        let (workspace, temp_dir) = create_workspace(&[("a.md", "# Alpha\n[[b]]")]);
        let a = temp_dir.path().join("a.md");

        workspace.refresh_file(&a).await.unwrap();
        assert_eq!(workspace.snapshot().await.nodes.len(), 1);

        let update = workspace.remove_file(&a).await.unwrap();
        assert_eq!(update.node, NodeChange::Removed);
        assert!(workspace.snapshot().await.is_empty());
        assert!(workspace.identities().lookup("a").is_none());
    }

    #[tokio::test]
    async fn test_handle_rename_event() {
        let (workspace, temp_dir) = create_workspace(&[("old.md", "# Note")]);
        let old = temp_dir.path().join("old.md");
        let new = temp_dir.path().join("new.md");

        workspace.refresh_file(&old).await.unwrap();
        fs::rename(&old, &new).unwrap();
        workspace
            .handle_event(&WorkspaceEvent::FileRenamed(old.clone(), new.clone()))
            .await
            .unwrap();

        let graph = workspace.graph();
        let graph = graph.read().await;
        assert!(graph.node(&old).is_none());
        assert_eq!(graph.node(&new).unwrap().label, "Note");
    }
}
