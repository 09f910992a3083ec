//! Structural queries over a [`LinkGraph`] using petgraph

use crate::graph::LinkGraph;
use notegraph_core::prelude::*;
use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// petgraph projection of a [`LinkGraph`].
///
/// Dangling edge targets become vertices too, so the projection carries
/// every edge.
#[derive(Debug, Clone, Default)]
pub struct LinkDigraph {
    pub graph: DiGraph<NodeId, ()>,
    index: HashMap<NodeId, NodeIndex>,
}

impl LinkDigraph {
    fn vertex(&mut self, id: &NodeId) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.index.insert(id.clone(), idx);
        idx
    }

    /// Vertex index for a node id
    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }
}

impl LinkGraph {
    /// Project nodes and edges into a petgraph `DiGraph`
    pub fn to_digraph(&self) -> LinkDigraph {
        let mut digraph = LinkDigraph::default();
        for node in self.nodes() {
            digraph.vertex(&node.id);
        }
        for edge in self.edges() {
            let source = digraph.vertex(&edge.source);
            let target = digraph.vertex(&edge.target);
            digraph.graph.add_edge(source, target, ());
        }
        digraph
    }

    /// Find strongly connected components of more than one document.
    ///
    /// Members are paths of titled documents, sorted; the components are
    /// sorted by their first member.
    pub fn cycles(&self) -> Vec<Vec<PathBuf>> {
        let digraph = self.to_digraph();
        let mut cycles: Vec<Vec<PathBuf>> = kosaraju_scc(&digraph.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut members: Vec<PathBuf> = scc
                    .iter()
                    .filter_map(|&idx| self.node_by_id(&digraph.graph[idx]))
                    .map(|node| node.path.clone())
                    .collect();
                members.sort();
                members
            })
            .filter(|members| !members.is_empty())
            .collect();
        cycles.sort();
        cycles
    }

    /// Titled documents within `max_hops` links of `path`, in either direction
    pub fn related(&self, path: &Path, max_hops: usize) -> Vec<PathBuf> {
        let digraph = self.to_digraph();
        let Some(start) = digraph.index_of(&NodeId::from_path(path)) else {
            return Vec::new();
        };

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);
        let mut related = Vec::new();

        while let Some((idx, hops)) = queue.pop_front() {
            if hops > 0
                && let Some(node) = self.node_by_id(&digraph.graph[idx])
            {
                related.push(node.path.clone());
            }
            if hops == max_hops {
                continue;
            }
            for neighbor in digraph.graph.neighbors_undirected(idx) {
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, hops + 1));
                }
            }
        }

        related.sort();
        related
    }
}
