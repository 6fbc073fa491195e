//! Hub family detection and removal

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::cluster::HubFamily;
use crate::config::HubPruning;
use crate::family::FamilyIndex;
use crate::graph::algorithms::without_nodes;
use crate::graph::CompressedGraph;

/// The link graph with hub families and their links taken out
#[derive(Debug, Clone)]
pub struct PrunedGraph {
    /// Same node numbering as the input; hubs have no neighbors
    pub graph: CompressedGraph,

    /// `removed[i]` is true when family `i` is a hub
    pub removed: Vec<bool>,

    /// Hubs in the order they were removed
    pub hubs: Vec<HubFamily>,
}

/// Remove hub families from a filtered link graph.
///
/// `Iterative` removes one family at a time, always the one with the most
/// remaining partners (lowest index on ties), and lowers its neighbors'
/// degrees before choosing again, stopping once no family exceeds
/// `max_degree`. A family whose degree drops to the limit because a hub
/// neighbor went first is kept. `SinglePass` judges every family on its
/// initial degree and removes all offenders at once.
pub fn prune_hubs(graph: &CompressedGraph, max_degree: usize, mode: HubPruning) -> PrunedGraph {
    let mut removed = vec![false; graph.node_count];

    let hubs = match mode {
        HubPruning::SinglePass => single_pass(graph, max_degree, &mut removed),
        HubPruning::Iterative => iterative(graph, max_degree, &mut removed),
    };

    log::info!(
        "Removed {} hub families with more than {} partners ({} remaining)",
        hubs.len(),
        max_degree,
        graph.node_count - hubs.len()
    );

    PrunedGraph {
        graph: without_nodes(graph, &removed),
        removed,
        hubs,
    }
}

fn single_pass(graph: &CompressedGraph, max_degree: usize, removed: &mut [bool]) -> Vec<HubFamily> {
    let mut hubs = Vec::new();
    for node in 0..graph.node_count {
        let degree = graph.degree(node);
        if degree > max_degree {
            removed[node] = true;
            hubs.push(HubFamily {
                family: node as u32,
                degree,
            });
        }
    }
    hubs
}

fn iterative(graph: &CompressedGraph, max_degree: usize, removed: &mut [bool]) -> Vec<HubFamily> {
    let mut degree: Vec<usize> = (0..graph.node_count).map(|n| graph.degree(n)).collect();

    // Entries go stale when a neighbor is removed; a fresh one is pushed if
    // the node is still over the limit
    let mut queue: BinaryHeap<(usize, Reverse<u32>)> = degree
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d > max_degree)
        .map(|(node, &d)| (d, Reverse(node as u32)))
        .collect();

    let mut hubs = Vec::new();
    while let Some((d, Reverse(node))) = queue.pop() {
        let idx = node as usize;
        if removed[idx] || degree[idx] != d {
            continue;
        }

        removed[idx] = true;
        hubs.push(HubFamily {
            family: node,
            degree: d,
        });
        log::debug!("Hub {} removed with {} partners", node, d);

        for &neighbor in graph.neighbors(idx) {
            let n = neighbor as usize;
            if removed[n] {
                continue;
            }
            degree[n] -= 1;
            if degree[n] > max_degree {
                queue.push((degree[n], Reverse(neighbor)));
            }
        }
    }
    hubs
}

/// Hubs ordered for review: highest degree first, then by family name
pub fn hub_report(hubs: &[HubFamily], families: &FamilyIndex) -> Vec<HubFamily> {
    let mut report = hubs.to_vec();
    report.sort_by(|a, b| match b.degree.cmp(&a.degree) {
        Ordering::Equal => families.name(a.family).cmp(families.name(b.family)),
        other => other,
    });
    report
}
