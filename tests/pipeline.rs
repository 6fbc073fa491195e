use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rstest::rstest;
use tempfile::TempDir;

use transporter_groups::config::{Config, EdgeFilter, HubPruning, MissingCorrelation};
use transporter_groups::pipeline::{self, Inputs, Outcome};
use transporter_groups::storage;

const HEADER: &str = "gene_id\tPFAMs\tTIGRFAMs\tCOGs\n";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn inputs(crossref: &Path) -> Inputs {
    Inputs {
        crossref: crossref.to_path_buf(),
        allow_list: None,
        correlations: None,
    }
}

fn absolute(min_occurrence: u32, max_degree: usize) -> Config {
    Config::new(EdgeFilter::Absolute { min_occurrence }, max_degree)
}

/// Each cluster's members as sorted names, in cluster order
fn cluster_names(outcome: &Outcome) -> Vec<Vec<String>> {
    outcome
        .clusters
        .iter()
        .map(|c| {
            let mut names: Vec<String> = c
                .members
                .iter()
                .map(|&m| outcome.families.name(m).to_string())
                .collect();
            names.sort();
            names
        })
        .collect()
}

fn hub_names(outcome: &Outcome) -> Vec<(String, usize)> {
    outcome
        .hubs
        .iter()
        .map(|h| (outcome.families.name(h.family).to_string(), h.degree))
        .collect()
}

/// PFX co-occurs with PF0..PF9 on `times` entities each
fn hub_table(times: usize) -> String {
    let mut table = HEADER.to_string();
    for partner in 0..10 {
        for copy in 0..times {
            table.push_str(&format!("g{}_{}\tPFX;PF{}\t\t\n", partner, copy, partner));
        }
    }
    table
}

#[test]
fn three_entities_give_two_groups() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "xref.tsv", &format!("{}E1\tPF1;PF2\t\t\nE2\tPF1;PF3\t\t\nE3\tPF4\t\t\n", HEADER));

    let outcome = pipeline::run(&absolute(1, 6), &inputs(&path)).unwrap();

    assert_eq!(
        cluster_names(&outcome),
        vec![vec!["PF1", "PF2", "PF3"], vec!["PF4"]]
    );
    assert_eq!(outcome.clusters[0].label(), "T0");
    assert_eq!(outcome.clusters[1].label(), "T1");
    assert!(outcome.hubs.is_empty());
}

#[rstest]
#[case(HubPruning::Iterative)]
#[case(HubPruning::SinglePass)]
fn hub_is_reported_and_does_not_bridge(#[case] hub_pruning: HubPruning) {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "xref.tsv", &hub_table(2));
    let config = Config {
        hub_pruning,
        ..absolute(2, 6)
    };

    let outcome = pipeline::run(&config, &inputs(&path)).unwrap();

    assert_eq!(hub_names(&outcome), vec![("PFX".to_string(), 10)]);
    assert_eq!(outcome.clusters.len(), 10);
    assert!(outcome.clusters.iter().all(|c| c.size == 1));

    let px = outcome.families.get("PFX").unwrap();
    assert!(outcome
        .clusters
        .iter()
        .all(|c| !c.members.contains(&px)));
}

#[test]
fn threshold_boundary_keeps_equal_and_drops_one_below() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "xref.tsv", &hub_table(3));

    // min 3: every PFX link kept, PFX becomes a hub
    let outcome = pipeline::run(&absolute(3, 6), &inputs(&path)).unwrap();
    assert_eq!(outcome.stats.kept_links, 10);
    assert_eq!(outcome.hubs.len(), 1);

    // min 4: every link dropped, all eleven families are singletons
    let outcome = pipeline::run(&absolute(4, 6), &inputs(&path)).unwrap();
    assert_eq!(outcome.stats.kept_links, 0);
    assert_eq!(outcome.stats.dropped_links, 10);
    assert!(outcome.hubs.is_empty());
    assert_eq!(outcome.clusters.len(), 11);
}

#[test]
fn clusters_and_hubs_partition_the_families() {
    let dir = TempDir::new().unwrap();
    let mut table = hub_table(1);
    table.push_str("a\tPF0;PF1\tTIGR7\t\n");
    table.push_str("b\tPF20\t\tCOG5;K99\n");
    table.push_str("c\t\t\tCOG6\n");
    let path = write(&dir, "xref.tsv", &table);

    let outcome = pipeline::run(&absolute(1, 3), &inputs(&path)).unwrap();

    let mut seen = HashSet::new();
    for cluster in &outcome.clusters {
        for &member in &cluster.members {
            assert!(seen.insert(member), "family {} in two clusters", member);
        }
    }
    for hub in &outcome.hubs {
        assert!(seen.insert(hub.family), "hub {} also clustered", hub.family);
    }
    assert_eq!(seen.len(), outcome.families.len());
}

#[test]
fn cluster_ids_are_stable_across_runs_and_shard_sizes() {
    let dir = TempDir::new().unwrap();
    let mut table = HEADER.to_string();
    for i in 0..200 {
        table.push_str(&format!("g{}\tPF{}\tTIGR{}\tCOG{}\n", i, i % 37, i % 23, i % 11));
    }
    let path = write(&dir, "xref.tsv", &table);

    let baseline = pipeline::run(&absolute(1, 50), &inputs(&path)).unwrap();
    for shard_size in [1, 7, 1000] {
        let config = Config {
            shard_size,
            ..absolute(1, 50)
        };
        let again = pipeline::run(&config, &inputs(&path)).unwrap();
        assert_eq!(again.clusters, baseline.clusters);
    }
}

#[test]
fn allow_list_restricts_families() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "xref.tsv", &format!("{}E1\tPF1;PF2\tTIGR1\t\nE2\tPF3\t\tCOG1\n", HEADER));
    let allow = write(&dir, "allow.txt", "PF1\nTIGR1\nPF3\nPF404\n");

    let outcome = pipeline::run(
        &absolute(1, 6),
        &Inputs {
            allow_list: Some(allow),
            ..inputs(&path)
        },
    )
    .unwrap();

    assert_eq!(
        cluster_names(&outcome),
        vec![vec!["PF1", "TIGR1"], vec!["PF3"]]
    );
    assert_eq!(outcome.families.get("PF404"), None);
}

#[test]
fn fractional_mode_with_strict_correlation() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "xref.tsv",
        &format!("{}E1\tPF1;PF2\t\t\nE2\tPF1;PF3\t\t\nE3\tPF4;PF5\t\t\n", HEADER),
    );
    let corr = write(
        &dir,
        "corr.tsv",
        "family\tPF1\tPF2\tPF3\n\
         PF1\t1\t0.9\t0.1\n\
         PF2\t0.9\t1\tNA\n\
         PF3\t0.1\tNA\t1\n",
    );
    let config = Config::new(
        EdgeFilter::Fractional {
            min_fraction: 1.0,
            min_correlation: Some(0.5),
            missing_correlation: MissingCorrelation::Fail,
        },
        6,
    );

    let outcome = pipeline::run(
        &config,
        &Inputs {
            correlations: Some(corr),
            ..inputs(&path)
        },
    )
    .unwrap();

    // PF1-PF2 correlated, PF1-PF3 not, PF4-PF5 has no score
    assert_eq!(
        cluster_names(&outcome),
        vec![vec!["PF1", "PF2"], vec!["PF3"], vec!["PF4"], vec!["PF5"]]
    );
}

#[test]
fn malformed_rows_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "xref.tsv", &format!("{}E1\tPF1;PF2\nE2\tPF3\t\t\n", HEADER));

    let outcome = pipeline::run(&absolute(1, 6), &inputs(&path)).unwrap();

    assert_eq!(outcome.stats.skipped_rows, 1);
    assert_eq!(cluster_names(&outcome), vec![vec!["PF3"]]);
}

#[test]
fn empty_input_writes_empty_tables() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "xref.tsv", HEADER);
    let out_dir = dir.path().join("out");

    let outcome = pipeline::run(&Config::default(), &inputs(&path)).unwrap();
    assert!(outcome.clusters.is_empty());

    storage::save_results(&outcome, &Config::default(), &out_dir).unwrap();
    assert_eq!(
        fs::read_to_string(out_dir.join(storage::CLUSTERS_FILE)).unwrap(),
        "TransportGroup\tPFAM\tTIGRFAM\tCOG\tOther\n"
    );
    assert!(fs::read_to_string(out_dir.join(storage::HUBS_FILE))
        .unwrap()
        .is_empty());
}

#[test]
fn unreadable_input_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.tsv");

    let err = pipeline::run(&Config::default(), &inputs(&missing)).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.tsv"));
}

#[test]
fn hub_report_lists_highest_degree_first() {
    let dir = TempDir::new().unwrap();
    let mut table = hub_table(1);
    for partner in 0..8 {
        table.push_str(&format!("h{}\tPFY;PF{}\t\t\n", partner, 100 + partner));
    }
    let path = write(&dir, "xref.tsv", &table);
    let out_dir = dir.path().join("out");

    let outcome = pipeline::run(&absolute(1, 6), &inputs(&path)).unwrap();
    storage::save_results(&outcome, &Config::default(), &out_dir).unwrap();

    assert_eq!(
        fs::read_to_string(out_dir.join(storage::HUBS_FILE)).unwrap(),
        "PFX\t10\nPFY\t8\n"
    );
}
