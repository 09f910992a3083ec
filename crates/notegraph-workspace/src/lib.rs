//! # Workspace
//!
//! Builds and maintains the link graph for a directory of documents.
//!
//! - [`walker::DirectoryWalker`] discovers documents and runs per-file work concurrently
//! - [`workspace::Workspace`] runs the learn pass and the parse pass, and applies
//!   single-document refreshes and removals
//! - [`watcher::WorkspaceWatcher`] reports file system changes as [`WorkspaceEvent`]s
//!
//! ## Quick Start
//!
//! ```no_run
//! use notegraph_workspace::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = WorkspaceConfig::builder("/path/to/notes").build()?;
//!     let workspace = Workspace::new(config)?;
//!
//!     let summary = workspace.initialize().await?;
//!     println!("Indexed {} documents", summary.succeeded);
//!
//!     let snapshot = workspace.snapshot().await;
//!     println!("{} nodes, {} edges", snapshot.nodes.len(), snapshot.edges.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Every document of a walk is processed concurrently on the calling task.
//! The graph lives behind a tokio `RwLock` ([`SharedGraph`]); each document
//! takes the write guard only after its read completed, so the final graph
//! does not depend on completion order.

pub mod walker;
pub mod watcher;
pub mod workspace;

pub use walker::{DirectoryWalker, WalkSummary};
pub use watcher::{WatcherConfig, WorkspaceEvent, WorkspaceWatcher};
pub use workspace::{SharedGraph, Workspace};

pub mod prelude {
    pub use crate::walker::{DirectoryWalker, WalkSummary};
    pub use crate::watcher::{WatcherConfig, WorkspaceEvent, WorkspaceWatcher};
    pub use crate::workspace::{SharedGraph, Workspace};
    pub use notegraph_core::prelude::*;
    pub use notegraph_graph::{GraphStats, IdentityTable, LinkGraph};
}
