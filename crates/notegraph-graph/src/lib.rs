//! # Document Link Graph
//!
//! Identity resolution, link target resolution and the incrementally
//! maintained link graph.
//!
//! Provides:
//! - [`IdentityTable`]: alias → canonical path, learned from file names and `id:` markers
//! - [`resolve_link`] / [`resolve_target`]: link text → canonical path
//! - [`LinkGraph`]: nodes for titled documents, edges for their links
//! - Backlinks, dangling edges, orphans, cycles and related documents
//!
//! ## Quick Start
//!
//! ```
//! use notegraph_graph::{IdentityTable, LinkGraph, resolve_link};
//! use std::path::Path;
//!
//! let identities = IdentityTable::new();
//! identities.learn_identity(Path::new("/ws/b.md"), "# Bee");
//!
//! let target = resolve_link(&identities, "b", Path::new("/ws/a.md"), Path::new("/ws"));
//! assert_eq!(target, Path::new("/ws/b.md"));
//!
//! let mut graph = LinkGraph::new();
//! graph.apply_document(Path::new("/ws/a.md"), Some("Alpha"), &[target]);
//! assert_eq!(graph.node_count(), 1);
//! assert_eq!(graph.edge_count(), 1);
//! assert_eq!(graph.dangling_edges().len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`identity`] - Alias table
//! - [`resolve`] - Link target resolution
//! - [`graph`] - Graph state and the per-document mutation
//! - [`analysis`] - petgraph projection, cycles, related documents

pub mod analysis;
pub mod graph;
pub mod identity;
pub mod resolve;

pub use analysis::LinkDigraph;
pub use graph::{DocumentUpdate, GraphStats, LinkGraph, NodeChange};
pub use identity::IdentityTable;
pub use resolve::{decode_link, resolve_link, resolve_target};

pub mod prelude {
    pub use crate::graph::{DocumentUpdate, GraphStats, LinkGraph, NodeChange};
    pub use crate::identity::IdentityTable;
    pub use crate::resolve::{resolve_link, resolve_target};
    pub use notegraph_core::prelude::*;
}
