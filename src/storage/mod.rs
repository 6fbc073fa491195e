//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, to_string_pretty};

use crate::cluster::metrics::ClusterStats;
use crate::cluster::{Cluster, HubFamily};
use crate::config::Config;
use crate::family::{FamilyIndex, NamespaceLists};
use crate::pipeline::Outcome;

/// Output file names inside the results directory
pub const CLUSTERS_FILE: &str = "clusters.tsv";
pub const HUBS_FILE: &str = "hubs.tsv";
pub const MEMBERSHIP_FILE: &str = "membership.tsv";
pub const LINKS_FILE: &str = "links.tsv";
pub const ENTITIES_FILE: &str = "entities.tsv";
pub const SUMMARY_FILE: &str = "summary.json";

/// Header of the cluster table
const CLUSTER_HEADER: [&str; 5] = ["TransportGroup", "PFAM", "TIGRFAM", "COG", "Other"];

/// One cluster table row: id and the pipe-joined member lists per database
pub fn cluster_row(cluster: &Cluster, families: &FamilyIndex) -> [String; 5] {
    let lists = NamespaceLists::partition(cluster.members.iter().map(|&m| families.name(m)));
    [
        cluster.label(),
        lists.pfam.join("|"),
        lists.tigrfam.join("|"),
        lists.cog.join("|"),
        lists.other.join("|"),
    ]
}

fn tsv_writer(path: &Path) -> Result<csv::Writer<File>> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    Ok(csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .flexible(true)
        .from_writer(file))
}

/// Save all outputs of a run into `output_dir`
pub fn save_results(outcome: &Outcome, config: &Config, output_dir: &Path) -> Result<()> {
    log::info!(
        "Saving {} clusters and {} hub families to {}",
        outcome.clusters.len(),
        outcome.hubs.len(),
        output_dir.display()
    );

    // Ensure output directory exists
    fs::create_dir_all(output_dir)
        .with_context(|| format!("cannot create output directory {}", output_dir.display()))?;

    save_clusters(&outcome.clusters, &outcome.families, &output_dir.join(CLUSTERS_FILE))?;
    save_hubs(&outcome.hubs, &outcome.families, &output_dir.join(HUBS_FILE))?;
    save_membership(&outcome.clusters, &outcome.families, &output_dir.join(MEMBERSHIP_FILE))?;
    save_links(outcome, &output_dir.join(LINKS_FILE))?;
    save_entities(outcome, &output_dir.join(ENTITIES_FILE))?;
    save_summary(outcome, config, &output_dir.join(SUMMARY_FILE))?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Cluster table: `[clusterId, PFAMs, TIGRFAMs, COGs, others]`
pub fn save_clusters(clusters: &[Cluster], families: &FamilyIndex, path: &Path) -> Result<()> {
    let mut wtr = tsv_writer(path)?;
    wtr.write_record(CLUSTER_HEADER)?;
    for cluster in clusters {
        wtr.write_record(cluster_row(cluster, families))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Hub report: `[family, degree]`, already in report order
pub fn save_hubs(hubs: &[HubFamily], families: &FamilyIndex, path: &Path) -> Result<()> {
    let mut wtr = tsv_writer(path)?;
    for hub in hubs {
        wtr.write_record([families.name(hub.family), hub.degree.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Long-format membership: `[clusterId, family]`
fn save_membership(clusters: &[Cluster], families: &FamilyIndex, path: &Path) -> Result<()> {
    let mut wtr = tsv_writer(path)?;
    for cluster in clusters {
        let label = cluster.label();
        for &member in &cluster.members {
            wtr.write_record([label.as_str(), families.name(member)])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Aggregated links `[family, partner, count]`, then solo observations with an empty partner
fn save_links(outcome: &Outcome, path: &Path) -> Result<()> {
    let families = &outcome.families;
    let weights = &outcome.weights;

    let mut wtr = tsv_writer(path)?;
    for (a, b, count) in weights.sorted_pairs() {
        wtr.write_record([families.name(a), families.name(b), count.to_string().as_str()])?;
    }
    for family in 0..families.len() as u32 {
        let solo = weights.solo(family);
        if solo > 0 {
            wtr.write_record([families.name(family), "", solo.to_string().as_str()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Entity cross-reference: `[entityId, clusterIds]` for entities touching a cluster
fn save_entities(outcome: &Outcome, path: &Path) -> Result<()> {
    let assignment = outcome.cluster_of();

    let mut wtr = tsv_writer(path)?;
    for (entity, links) in outcome.entities.iter().zip(&outcome.entity_links) {
        let mut ids: Vec<u32> = links
            .families
            .iter()
            .filter_map(|&f| assignment[f as usize])
            .collect();
        if ids.is_empty() {
            continue;
        }
        ids.sort_unstable();
        ids.dedup();

        let labels: Vec<String> = ids.iter().map(|id| format!("T{}", id)).collect();
        wtr.write_record([entity.id.as_str(), labels.join(";").as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save summary information
fn save_summary(outcome: &Outcome, config: &Config, path: &Path) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;

    let summary = json!({
        "config": config,
        "input": outcome.stats,
        "graph_stats": {
            "family_count": outcome.families.len(),
            "link_count": outcome.pruned.graph.link_count(),
            "hub_count": outcome.hubs.len(),
        },
        "cluster_stats": ClusterStats::from_clusters(&outcome.clusters),
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}
