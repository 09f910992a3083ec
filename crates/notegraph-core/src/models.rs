//! Core data models for the link graph.
//!
//! These types are designed to be:
//! - **Serializable**: handed to rendering collaborators as plain data
//! - **Cloneable**: cheap to snapshot out of a shared graph
//! - **Type-Safe**: node ids are a newtype, not bare strings

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};

/// Stable identifier of a node, derived from its canonical path.
///
/// The id is the hex SHA-256 digest of the path string, so two calls with
/// the same path always agree and no registry is needed to allocate ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Derive the id of the document at `path`
    pub fn from_path(path: &Path) -> Self {
        let digest = Sha256::digest(path.to_string_lossy().as_bytes());
        Self(format!("{:x}", digest))
    }

    /// Borrow the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Path> for NodeId {
    fn from(path: &Path) -> Self {
        Self::from_path(path)
    }
}

/// A titled document in the graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub path: PathBuf,
    pub label: String,
}

impl Node {
    /// Create a node for `path`; the id is derived from the path
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: NodeId::from_path(&path),
            path,
            label: label.into(),
        }
    }
}

/// A directed link between two documents.
///
/// The target need not exist as a node: links to documents that are not
/// parsed yet (or have no title) are kept as dangling edges.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    /// Create an edge between the documents at two paths
    pub fn between(source: &Path, target: &Path) -> Self {
        Self {
            source: NodeId::from_path(source),
            target: NodeId::from_path(target),
        }
    }
}

/// Point-in-time copy of the graph, in stable iteration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// Whether the snapshot has neither nodes nor edges
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_is_deterministic() {
        let a = NodeId::from_path(Path::new("/ws/a.md"));
        let b = NodeId::from_path(Path::new("/ws/a.md"));
        let c = NodeId::from_path(Path::new("/ws/c.md"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_node_new_derives_id() {
        let node = Node::new("/ws/a.md", "Alpha");
        assert_eq!(node.id, NodeId::from_path(Path::new("/ws/a.md")));
        assert_eq!(node.label, "Alpha");
    }

    #[test]
    fn test_snapshot_serializes_ids_as_strings() {
        let snapshot = GraphSnapshot {
            nodes: vec![Node::new("/ws/a.md", "Alpha")],
            edges: vec![Edge::between(Path::new("/ws/a.md"), Path::new("/ws/b.md"))],
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["nodes"][0]["id"].is_string());
        assert_eq!(json["nodes"][0]["label"], "Alpha");
        assert!(json["edges"][0]["target"].is_string());
    }
}
