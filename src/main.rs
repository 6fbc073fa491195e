use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use transporter_groups::config::{
    ClusterOrder, Config, EdgeFilter, HubPruning, MissingCorrelation,
};
use transporter_groups::pipeline::{self, Inputs};
use transporter_groups::storage;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PruningArg {
    /// Remove hubs one at a time until none exceeds the limit
    Iterative,
    /// Remove every family over the limit by its initial degree
    SinglePass,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    /// Number clusters in the order they are found
    Discovery,
    /// Number clusters largest first
    Size,
}

#[derive(Parser, Debug)]
#[clap(
    name = "transporter-groups",
    about = "Cluster co-occurring protein families into transporter groups"
)]
struct Cli {
    /// Family cross-reference table (entityId, PFAMs, TIGRFAMs, COGs, ...)
    #[clap(long, short)]
    input: PathBuf,

    /// Output directory for results
    #[clap(long, default_value = "transporter_groups")]
    output_dir: PathBuf,

    /// Only link these families (one accession per line)
    #[clap(long, short)]
    families: Option<PathBuf>,

    /// Pairwise family correlation matrix
    #[clap(long)]
    correlations: Option<PathBuf>,

    /// Minimum number of entities a link must be seen on
    #[clap(long, conflicts_with = "min_fraction")]
    min_occurrence: Option<u32>,

    /// Minimum co-occurrence as a fraction of the rarer family's occurrences
    #[clap(long)]
    min_fraction: Option<f64>,

    /// Minimum correlation score of a link (fractional mode only)
    #[clap(long, requires = "min_fraction", allow_hyphen_values = true)]
    min_correlation: Option<f64>,

    /// Fail links with no correlation score instead of passing them
    #[clap(long, requires = "min_correlation")]
    strict_correlation: bool,

    /// Maximum number of distinct partners before a family counts as a hub
    #[clap(long, short = 'e', default_value = "6")]
    max_degree: usize,

    /// Hub removal strategy
    #[clap(long, value_enum, default_value = "iterative")]
    hub_pruning: PruningArg,

    /// Cluster numbering order
    #[clap(long, value_enum, default_value = "discovery")]
    order: OrderArg,

    /// Entities per edge-weighting shard
    #[clap(long, default_value = "50000")]
    shard_size: usize,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let edge_filter = match self.min_fraction {
            Some(min_fraction) => EdgeFilter::Fractional {
                min_fraction,
                min_correlation: self.min_correlation,
                missing_correlation: if self.strict_correlation {
                    MissingCorrelation::Fail
                } else {
                    MissingCorrelation::Pass
                },
            },
            None => EdgeFilter::Absolute {
                min_occurrence: self.min_occurrence.unwrap_or(1),
            },
        };

        Config {
            edge_filter,
            max_degree: self.max_degree,
            hub_pruning: match self.hub_pruning {
                PruningArg::Iterative => HubPruning::Iterative,
                PruningArg::SinglePass => HubPruning::SinglePass,
            },
            cluster_order: match self.order {
                OrderArg::Discovery => ClusterOrder::Discovery,
                OrderArg::Size => ClusterOrder::Size,
            },
            shard_size: self.shard_size,
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = args.config();
    config.validate()?;

    log::info!("Starting transporter grouping");
    log::info!("Input: {}", args.input.display());
    log::info!("Output: {}", args.output_dir.display());
    log::debug!("Configuration: {:?}", config);

    let inputs = Inputs {
        crossref: args.input.clone(),
        allow_list: args.families.clone(),
        correlations: args.correlations.clone(),
    };

    // 1. Read inputs and cluster; nothing is written if this fails
    let outcome = pipeline::run(&config, &inputs)?;

    log::info!(
        "Built {} transporter groups, excluded {} hub families",
        outcome.clusters.len(),
        outcome.hubs.len()
    );

    // 2. Save results
    storage::save_results(&outcome, &config, &args.output_dir)?;

    log::info!("Grouping complete. Results saved to {}", args.output_dir.display());

    Ok(())
}
