//! Link graph and the per-document mutation that keeps it current

use notegraph_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

/// What happened to a document's node during [`LinkGraph::apply_document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeChange {
    Inserted,
    Relabeled,
    Unchanged,
    Removed,
    /// No title and no previous node
    Absent,
}

/// Summary of one document application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpdate {
    pub node: NodeChange,
    pub edges_removed: usize,
    pub edges_added: usize,
}

/// Directed graph of titled documents and the links between them.
///
/// Nodes are keyed by path and outgoing edges are grouped by source id, so
/// both views iterate in key order regardless of the order documents were
/// applied in.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    nodes: BTreeMap<PathBuf, Node>,
    /// Map from node id to path (for id lookups)
    ids: HashMap<NodeId, PathBuf>,
    /// Outgoing edges per source, in link order
    edges: BTreeMap<NodeId, Vec<Edge>>,
}

impl LinkGraph {
    /// Create a new link graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the graph reflect exactly the current content of one document.
    ///
    /// With a title the node is inserted or relabeled; without one it is
    /// removed. Either way every previously recorded outgoing edge of the
    /// document is replaced by one edge per entry of `targets`, in order.
    pub fn apply_document(
        &mut self,
        path: &Path,
        title: Option<&str>,
        targets: &[PathBuf],
    ) -> DocumentUpdate {
        let id = NodeId::from_path(path);

        let node = match title {
            None => match self.nodes.remove(path) {
                Some(_) => {
                    self.ids.remove(&id);
                    NodeChange::Removed
                }
                None => NodeChange::Absent,
            },
            Some(label) => match self.nodes.get_mut(path) {
                Some(existing) if existing.label == label => NodeChange::Unchanged,
                Some(existing) => {
                    existing.label = label.to_string();
                    NodeChange::Relabeled
                }
                None => {
                    self.nodes
                        .insert(path.to_path_buf(), Node::new(path, label));
                    self.ids.insert(id.clone(), path.to_path_buf());
                    NodeChange::Inserted
                }
            },
        };

        let edges_removed = self.edges.remove(&id).map_or(0, |old| old.len());
        let fresh: Vec<Edge> = targets
            .iter()
            .map(|target| Edge {
                source: id.clone(),
                target: NodeId::from_path(target),
            })
            .collect();
        let edges_added = fresh.len();
        if !fresh.is_empty() {
            self.edges.insert(id, fresh);
        }

        log::trace!(
            "Applied {}: node {:?}, -{} +{} edges",
            path.display(),
            node,
            edges_removed,
            edges_added
        );

        DocumentUpdate {
            node,
            edges_removed,
            edges_added,
        }
    }

    /// Node for the document at `path`
    pub fn node(&self, path: &Path) -> Option<&Node> {
        self.nodes.get(path)
    }

    /// Node with the given id
    pub fn node_by_id(&self, id: &NodeId) -> Option<&Node> {
        self.ids.get(id).and_then(|path| self.nodes.get(path))
    }

    /// Whether a node exists with this id
    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains_key(id)
    }

    /// All nodes, ordered by path
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges, grouped by source id and in link order within a source
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values().flatten()
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Outgoing edges recorded for the document at `path`
    pub fn outgoing(&self, path: &Path) -> &[Edge] {
        self.edges
            .get(&NodeId::from_path(path))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Edges pointing at the document at `path` (backlinks)
    pub fn incoming(&self, path: &Path) -> Vec<&Edge> {
        let id = NodeId::from_path(path);
        self.edges().filter(|edge| edge.target == id).collect()
    }

    /// Edges whose target currently has no node
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        self.edges()
            .filter(|edge| !self.ids.contains_key(&edge.target))
            .collect()
    }

    /// Nodes with neither incoming nor outgoing edges
    pub fn orphans(&self) -> Vec<&Node> {
        let mut linked: HashSet<&NodeId> = HashSet::new();
        for edge in self.edges() {
            linked.insert(&edge.source);
            linked.insert(&edge.target);
        }
        self.nodes()
            .filter(|node| !linked.contains(&node.id))
            .collect()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let total_nodes = self.node_count();
        let total_edges = self.edge_count();

        GraphStats {
            total_nodes,
            total_edges,
            dangling_edges: self.dangling_edges().len(),
            orphaned_nodes: self.orphans().len(),
            average_links_per_node: if total_nodes > 0 {
                total_edges as f64 / total_nodes as f64
            } else {
                0.0
            },
        }
    }

    /// Copy of the current state for rendering collaborators
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges().cloned().collect(),
        }
    }

    /// Drop every node and edge
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.ids.clear();
        self.edges.clear();
    }
}

/// Statistics about the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub dangling_edges: usize,
    pub orphaned_nodes: usize,
    pub average_links_per_node: f64,
}
