//! Graph transformations used between filtering stages

use crate::graph::CompressedGraph;

/// Strip every link incident to a removed node.
///
/// Node numbering is unchanged; removed nodes stay in the graph with no
/// neighbors so indices keep pointing at the same families.
pub fn without_nodes(graph: &CompressedGraph, removed: &[bool]) -> CompressedGraph {
    debug_assert_eq!(removed.len(), graph.node_count);

    // Count links in the pruned graph
    let mut edge_count = 0;
    for node in 0..graph.node_count {
        if removed[node] {
            continue;
        }
        edge_count += graph
            .neighbors(node)
            .iter()
            .filter(|&&target| !removed[target as usize])
            .count();
    }

    let mut pruned = CompressedGraph::with_capacity(graph.node_count, edge_count);

    // Fill offsets and edges
    pruned.offsets.push(0);
    let mut offset = 0;

    for node in 0..graph.node_count {
        if !removed[node] {
            for &target in graph.neighbors(node) {
                // Only keep links where both endpoints survive
                if !removed[target as usize] {
                    pruned.edges.push(target);
                    offset += 1;
                }
            }
        }
        pruned.offsets.push(offset);
    }

    pruned
}
