use super::model::NodeKind;
use super::KnowledgeGraph;
use serde::{Deserialize, Serialize};

/// A node flattened for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
    pub label: String,
    pub title: String,
    pub shape: String,
    pub color: String,
    pub size: u32,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEdge {
    pub from: String,
    pub to: String,
}

/// Owned snapshot of a graph, detached from the builder that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

impl From<&KnowledgeGraph> for GraphExport {
    fn from(graph: &KnowledgeGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|n| ExportNode {
                id: n.id(),
                label: n.label(),
                title: n.title(),
                shape: n.shape().as_str().to_string(),
                color: n.color().to_string(),
                size: n.size(),
                kind: n.kind(),
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(a, b)| ExportEdge { from: a.id(), to: b.id() })
            .collect();

        Self { nodes, edges }
    }
}

impl GraphExport {
    pub fn node(&self, id: &str) -> Option<&ExportNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
