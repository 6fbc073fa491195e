//! Graph construction module

use crate::graph::CompressedGraph;

/// Builder for incrementally constructing a symmetric CompressedGraph
pub struct GraphBuilder {
    /// Adjacency lists for each node
    adjacency_lists: Vec<Vec<u32>>,
}

impl GraphBuilder {
    /// Create a builder over `node_count` families, all initially isolated
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency_lists: vec![Vec::new(); node_count],
        }
    }

    /// Add an undirected link; self-loops are ignored
    pub fn add_link(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }

        self.adjacency_lists[a as usize].push(b);
        self.adjacency_lists[b as usize].push(a);
    }

    /// Build the compressed graph
    pub fn build(mut self) -> CompressedGraph {
        // Sort for binary search, dedup so list length equals degree
        for list in &mut self.adjacency_lists {
            list.sort_unstable();
            list.dedup();
        }

        let node_count = self.adjacency_lists.len();
        let edge_count: usize = self.adjacency_lists.iter().map(Vec::len).sum();

        let mut graph = CompressedGraph::with_capacity(node_count, edge_count);
        graph.offsets.push(0);

        let mut offset = 0;
        for list in &self.adjacency_lists {
            offset += list.len() as u32;
            graph.offsets.push(offset);
            graph.edges.extend_from_slice(list);
        }

        log::debug!(
            "Built graph with {} nodes and {} links ({} bytes)",
            graph.node_count,
            graph.link_count(),
            graph.memory_usage()
        );

        graph
    }
}

/// Build the undirected graph of filtered links over all families
pub fn build_graph(node_count: usize, links: &[(u32, u32)]) -> CompressedGraph {
    let mut builder = GraphBuilder::new(node_count);
    for &(a, b) in links {
        builder.add_link(a, b);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetrizes_and_dedups_links() {
        let graph = build_graph(4, &[(0, 1), (1, 0), (2, 0), (3, 3)]);

        assert_eq!(graph.node_count, 4);
        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.neighbors(1), &[0]);
        assert_eq!(graph.neighbors(2), &[0]);
        assert!(graph.neighbors(3).is_empty());
        assert_eq!(graph.link_count(), 2);
        assert!(graph.has_edge(2, 0));
        assert!(!graph.has_edge(1, 2));
        assert_eq!(graph.degree(0), 2);
    }

    #[test]
    fn no_links_gives_isolated_nodes() {
        let graph = build_graph(3, &[]);
        assert_eq!(graph, CompressedGraph::empty(3));
    }
}
