//! Cluster statistics and metrics

use std::collections::HashSet;

use serde::Serialize;

use crate::cluster::Cluster;
use crate::graph::CompressedGraph;

/// Calculate density (internal links / possible undirected links)
pub fn calculate_density(graph: &CompressedGraph, members: &[u32]) -> f32 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    let member_set: HashSet<u32> = members.iter().copied().collect();

    // Each internal link is seen from both endpoints
    let mut endpoint_hits = 0usize;
    for &node in members {
        endpoint_hits += graph
            .neighbors(node as usize)
            .iter()
            .filter(|&&dst| member_set.contains(&dst))
            .count();
    }

    endpoint_hits as f32 / (n * (n - 1)) as f32
}

/// Aggregate statistics over all clusters of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterStats {
    pub cluster_count: usize,
    pub clustered_families: usize,
    pub largest_cluster_size: usize,
    pub singleton_clusters: usize,
    pub avg_cluster_size: f64,
    pub avg_density: f64,
}

impl ClusterStats {
    pub fn from_clusters(clusters: &[Cluster]) -> Self {
        if clusters.is_empty() {
            return Self::default();
        }

        let count = clusters.len() as f64;
        let clustered_families: usize = clusters.iter().map(|c| c.size).sum();

        Self {
            cluster_count: clusters.len(),
            clustered_families,
            largest_cluster_size: clusters.iter().map(|c| c.size).max().unwrap_or(0),
            singleton_clusters: clusters.iter().filter(|c| c.size == 1).count(),
            avg_cluster_size: clustered_families as f64 / count,
            avg_density: clusters.iter().map(|c| f64::from(c.density)).sum::<f64>() / count,
        }
    }
}
