//! Cluster detection over the hub-pruned family graph

use std::collections::VecDeque;

use crate::cluster::metrics::calculate_density;
use crate::cluster::Cluster;
use crate::config::ClusterOrder;
use crate::graph::CompressedGraph;

/// Find connected components by breadth-first traversal.
///
/// Start nodes are taken in index order and neighbors are visited in their
/// sorted order, so membership and numbering depend only on the graph.
/// Every node not marked `excluded` lands in exactly one component; an
/// isolated node is a singleton.
pub fn find_connected_components(graph: &CompressedGraph, excluded: &[bool]) -> Vec<Vec<u32>> {
    let node_count = graph.node_count;
    let mut visited = excluded.to_vec();
    visited.resize(node_count, false);

    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..node_count {
        if visited[start] {
            continue;
        }

        visited[start] = true;
        queue.push_back(start as u32);
        let mut members = Vec::new();

        while let Some(node) = queue.pop_front() {
            members.push(node);
            for &next in graph.neighbors(node as usize) {
                if !visited[next as usize] {
                    visited[next as usize] = true;
                    queue.push_back(next);
                }
            }
        }

        components.push(members);
    }

    components
}

/// Build numbered clusters from the pruned graph
pub fn build_clusters(
    graph: &CompressedGraph,
    excluded: &[bool],
    order: ClusterOrder,
) -> Vec<Cluster> {
    log::info!("Finding connected components over {} families", graph.node_count);

    let mut components = find_connected_components(graph, excluded);

    // Stable: equal sizes keep discovery order
    if order == ClusterOrder::Size {
        components.sort_by(|a, b| b.len().cmp(&a.len()));
    }

    let clusters: Vec<Cluster> = components
        .into_iter()
        .enumerate()
        .map(|(id, members)| Cluster {
            id: id as u32,
            size: members.len(),
            density: calculate_density(graph, &members),
            members,
        })
        .collect();

    log::info!("Created {} clusters", clusters.len());

    clusters
}
