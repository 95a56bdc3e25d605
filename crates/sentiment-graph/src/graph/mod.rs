//! In-memory topic graph and the builder that fills it.

use std::collections::HashMap;

pub mod builder;
pub mod export;
pub mod model;
pub mod topology;

pub use builder::{BuildStats, GraphBuilder};
pub use export::{ExportEdge, ExportNode, GraphExport};
pub use model::{Node, NodeKind, Shape};

use topology::GraphTopology;

/// Nodes keyed by their string identifier, connected by undirected,
/// unlabeled edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeGraph {
    nodes: Vec<Node>,
    index: HashMap<String, u32>,
    topology: GraphTopology,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, or overwrites the attributes of the node already
    /// holding the same identifier. The node keeps its position and edges.
    pub fn add_node(&mut self, node: Node) -> u32 {
        let id = node.id();
        if let Some(&idx) = self.index.get(&id) {
            self.nodes[idx as usize] = node;
            return idx;
        }
        let idx = self.topology.add_node();
        self.nodes.push(node);
        self.index.insert(id, idx);
        idx
    }

    /// Connects two existing nodes. Returns false if either id is unknown or
    /// the edge is already present.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&a), Some(&b)) => self.topology.add_edge(a, b),
            _ => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&idx| &self.nodes[idx as usize])
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&a), Some(&b)) => self.topology.has_edge(a, b),
            _ => false,
        }
    }

    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Node> + 'a {
        let idx = self.index.get(id).copied();
        idx.into_iter()
            .flat_map(move |idx| self.topology.neighbors(idx))
            .map(move |n| &self.nodes[n as usize])
    }

    pub fn degree(&self, id: &str) -> usize {
        self.index.get(id).map_or(0, |&idx| self.topology.degree(idx))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.num_edges()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind() == kind)
    }

    /// Edges in insertion order, as pairs of nodes.
    pub fn edges(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.topology
            .edges()
            .iter()
            .map(|&(a, b)| (&self.nodes[a as usize], &self.nodes[b as usize]))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
