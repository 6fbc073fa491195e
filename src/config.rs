//! Configuration management for the transporter grouping pipeline

use serde::{Deserialize, Serialize};

use crate::error::GroupingError;

/// What to do with a pair that has no recorded correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCorrelation {
    /// Treat the pair as passing the correlation check
    Pass,
    /// Treat the pair as failing the correlation check
    Fail,
}

/// Edge acceptance rule; exactly one is active per run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EdgeFilter {
    /// Keep a link seen on at least `min_occurrence` entities
    Absolute { min_occurrence: u32 },

    /// Keep a link whose co-occurrence covers at least `min_fraction` of the
    /// rarer family's occurrences, optionally gated on a correlation score
    Fractional {
        min_fraction: f64,
        min_correlation: Option<f64>,
        missing_correlation: MissingCorrelation,
    },
}

impl Default for EdgeFilter {
    fn default() -> Self {
        Self::Absolute { min_occurrence: 1 }
    }
}

/// How hub families are removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HubPruning {
    /// Remove the worst hub, recompute degrees, repeat until none exceeds the limit
    Iterative,
    /// Remove every family over the limit by its initial degree in one step
    SinglePass,
}

/// Numbering order of emitted clusters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterOrder {
    /// Order in which the traversal discovers clusters
    Discovery,
    /// Largest cluster first, discovery order among equal sizes
    Size,
}

/// Default configuration for the transporter grouping pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Edge acceptance rule
    pub edge_filter: EdgeFilter,

    /// Families with more distinct partners than this are hubs
    pub max_degree: usize,

    /// Hub removal strategy
    pub hub_pruning: HubPruning,

    /// Cluster numbering order
    pub cluster_order: ClusterOrder,

    /// Entities per edge-weighting shard
    pub shard_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edge_filter: EdgeFilter::default(),
            max_degree: 6,
            hub_pruning: HubPruning::Iterative,
            cluster_order: ClusterOrder::Discovery,
            shard_size: 50_000,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(edge_filter: EdgeFilter, max_degree: usize) -> Self {
        Self {
            edge_filter,
            max_degree,
            ..Self::default()
        }
    }

    /// Reject thresholds that cannot describe a meaningful run
    pub fn validate(&self) -> Result<(), GroupingError> {
        match self.edge_filter {
            EdgeFilter::Absolute { min_occurrence } => {
                if min_occurrence == 0 {
                    return Err(GroupingError::ZeroMinOccurrence);
                }
            }
            EdgeFilter::Fractional {
                min_fraction,
                min_correlation,
                ..
            } => {
                if !(min_fraction > 0.0 && min_fraction <= 1.0) {
                    return Err(GroupingError::FractionOutOfRange(min_fraction));
                }
                if let Some(corr) = min_correlation {
                    if !(-1.0..=1.0).contains(&corr) {
                        return Err(GroupingError::CorrelationOutOfRange(corr));
                    }
                }
            }
        }

        if self.shard_size == 0 {
            return Err(GroupingError::ZeroShardSize);
        }

        Ok(())
    }

    /// Whether the active edge rule consults correlation scores at all
    pub fn uses_correlation(&self) -> bool {
        matches!(
            self.edge_filter,
            EdgeFilter::Fractional {
                min_correlation: Some(_),
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.max_degree, 6);
        assert_eq!(config.edge_filter, EdgeFilter::Absolute { min_occurrence: 1 });
        assert!(config.validate().is_ok());
        assert!(!config.uses_correlation());
    }

    #[rstest]
    #[case(0.0, None, GroupingError::FractionOutOfRange(0.0))]
    #[case(1.5, None, GroupingError::FractionOutOfRange(1.5))]
    #[case(0.5, Some(2.0), GroupingError::CorrelationOutOfRange(2.0))]
    fn rejects_out_of_range_fractional_thresholds(
        #[case] min_fraction: f64,
        #[case] min_correlation: Option<f64>,
        #[case] expected: GroupingError,
    ) {
        let config = Config::new(
            EdgeFilter::Fractional {
                min_fraction,
                min_correlation,
                missing_correlation: MissingCorrelation::Pass,
            },
            6,
        );
        assert_eq!(config.validate(), Err(expected));
    }

    #[test]
    fn rejects_zero_occurrence_and_shard_size() {
        let config = Config::new(EdgeFilter::Absolute { min_occurrence: 0 }, 6);
        assert_eq!(config.validate(), Err(GroupingError::ZeroMinOccurrence));

        let config = Config {
            shard_size: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(GroupingError::ZeroShardSize));
    }
}
