use std::collections::HashSet;

/// Undirected simple graph over dense node indices, stored as an adjacency
/// list plus the edges in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphTopology {
    adj: Vec<Vec<u32>>,
    edges: Vec<(u32, u32)>,
    seen: HashSet<(u32, u32)>,
}

impl GraphTopology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_nodes(&self) -> usize {
        self.adj.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn add_node(&mut self) -> u32 {
        let id = self.adj.len() as u32;
        self.adj.push(Vec::new());
        id
    }

    /// Returns false when the edge already exists, is a self loop, or
    /// references a node that was never added.
    pub fn add_edge(&mut self, a: u32, b: u32) -> bool {
        let n = self.adj.len() as u32;
        if a == b || a >= n || b >= n {
            return false;
        }
        let key = (a.min(b), a.max(b));
        if !self.seen.insert(key) {
            return false;
        }
        self.adj[a as usize].push(b);
        self.adj[b as usize].push(a);
        self.edges.push((a, b));
        true
    }

    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        self.seen.contains(&(a.min(b), a.max(b)))
    }

    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = u32> + '_ {
        self.adj.get(node as usize).into_iter().flatten().copied()
    }

    pub fn degree(&self, node: u32) -> usize {
        self.adj.get(node as usize).map_or(0, Vec::len)
    }

    /// Edges as they were added, each in the orientation it was added with.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_undirected_and_unique() {
        let mut t = GraphTopology::new();
        let a = t.add_node();
        let b = t.add_node();

        assert!(t.add_edge(a, b));
        assert!(!t.add_edge(b, a));
        assert!(t.has_edge(b, a));
        assert_eq!(t.num_edges(), 1);
        assert_eq!(t.neighbors(b).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn test_rejects_self_loops_and_unknown_nodes() {
        let mut t = GraphTopology::new();
        let a = t.add_node();
        assert!(!t.add_edge(a, a));
        assert!(!t.add_edge(a, 9));
        assert_eq!(t.num_edges(), 0);
        assert_eq!(t.degree(9), 0);
    }
}
