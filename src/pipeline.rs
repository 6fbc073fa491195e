//! End-to-end grouping run: read, link, weigh, filter, prune, cluster

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::cluster::detection::build_clusters;
use crate::cluster::hubs::{hub_report, prune_hubs, PrunedGraph};
use crate::cluster::{Cluster, HubFamily};
use crate::config::Config;
use crate::data::{
    read_allow_list, read_correlation_matrix, read_crossref, AllowList, CorrelationMatrix,
    CrossRefTable, Entity,
};
use crate::family::FamilyIndex;
use crate::graph::builder::build_graph;
use crate::graph::filter::filter_links;
use crate::graph::links::extract_all;
use crate::graph::weights::{weigh_links, CorrelationScores};
use crate::graph::{EdgeWeights, EntityLinks, FilteredLinks};

/// Input file locations for one run
#[derive(Debug, Clone)]
pub struct Inputs {
    /// Family cross-reference table
    pub crossref: PathBuf,

    /// Optional allow-list restricting the families considered
    pub allow_list: Option<PathBuf>,

    /// Optional pairwise correlation matrix
    pub correlations: Option<PathBuf>,
}

/// Counts describing a finished run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub entities: usize,
    pub skipped_rows: usize,
    pub families: usize,
    pub observed_links: usize,
    pub kept_links: usize,
    pub dropped_links: usize,
    pub hub_families: usize,
}

/// Everything a run produced, held in memory until it is written
#[derive(Debug)]
pub struct Outcome {
    pub families: FamilyIndex,
    pub entities: Vec<Entity>,
    pub entity_links: Vec<EntityLinks>,
    pub weights: EdgeWeights,
    pub filtered: FilteredLinks,
    pub pruned: PrunedGraph,
    pub clusters: Vec<Cluster>,

    /// Hubs ordered for the report: degree descending, then name
    pub hubs: Vec<HubFamily>,
    pub stats: RunStats,
}

impl Outcome {
    /// Cluster id of every family, `None` for hubs
    pub fn cluster_of(&self) -> Vec<Option<u32>> {
        let mut assignment = vec![None; self.families.len()];
        for cluster in &self.clusters {
            for &member in &cluster.members {
                assignment[member as usize] = Some(cluster.id);
            }
        }
        assignment
    }
}

/// Read every input, then cluster. Nothing is written here.
pub fn run(config: &Config, inputs: &Inputs) -> Result<Outcome> {
    config.validate()?;

    let table = read_crossref(&inputs.crossref)?;
    let allow = inputs
        .allow_list
        .as_deref()
        .map(read_allow_list)
        .transpose()?;
    let correlations = inputs
        .correlations
        .as_deref()
        .map(read_correlation_matrix)
        .transpose()?;

    group_entities(table, allow.as_ref(), correlations.as_ref(), config)
}

/// Cluster an already-parsed cross-reference table
pub fn group_entities(
    table: CrossRefTable,
    allow: Option<&AllowList>,
    correlations: Option<&CorrelationMatrix>,
    config: &Config,
) -> Result<Outcome> {
    config.validate()?;

    let CrossRefTable {
        entities,
        skipped_rows,
    } = table;

    // 1. Extract links; interning here fixes the family order
    let mut families = FamilyIndex::new();
    let entity_links = extract_all(&entities, allow, &mut families);

    // 2. Weigh links
    let mut weights = weigh_links(&entity_links, families.len(), config.shard_size);
    match correlations {
        Some(matrix) if config.uses_correlation() => {
            weights = weights.with_correlation(CorrelationScores::resolve(matrix, &families));
        }
        Some(_) => log::warn!("Correlation matrix given but no correlation threshold set; ignoring it"),
        None if config.uses_correlation() => {
            log::warn!("Correlation threshold set without a correlation matrix; every pair is missing a score")
        }
        None => {}
    }

    // 3. Filter links and build the undirected graph
    let filtered = filter_links(&weights, &config.edge_filter);
    let graph = build_graph(families.len(), &filtered.kept);

    // 4. Remove hubs
    let pruned = prune_hubs(&graph, config.max_degree, config.hub_pruning);

    // 5. Cluster the rest
    let clusters = build_clusters(&pruned.graph, &pruned.removed, config.cluster_order);
    let hubs = hub_report(&pruned.hubs, &families);

    let stats = RunStats {
        entities: entities.len(),
        skipped_rows,
        families: families.len(),
        observed_links: weights.pair_count(),
        kept_links: filtered.kept.len(),
        dropped_links: filtered.dropped,
        hub_families: hubs.len(),
    };

    Ok(Outcome {
        families,
        entities,
        entity_links,
        weights,
        filtered,
        pruned,
        clusters,
        hubs,
        stats,
    })
}
