//! Domain errors for the transporter grouping pipeline

use thiserror::Error;

/// Failures that are not plain I/O: bad configuration or unusable input layout
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GroupingError {
    /// `min_occurrence` must be at least one
    #[error("minimum occurrence must be at least 1")]
    ZeroMinOccurrence,

    /// Fractional threshold outside (0, 1]
    #[error("minimum fraction {0} is outside (0, 1]")]
    FractionOutOfRange(f64),

    /// Correlation threshold outside [-1, 1]
    #[error("minimum correlation {0} is outside [-1, 1]")]
    CorrelationOutOfRange(f64),

    /// Weighting shards need at least one entity each
    #[error("shard size must be at least 1")]
    ZeroShardSize,

    /// The cross-reference header has no columns after the entity id
    #[error("cross-reference table {path} has no family columns")]
    NoFamilyColumns { path: String },

    /// The correlation matrix header names no families
    #[error("correlation matrix {path} has an empty header")]
    EmptyCorrelationHeader { path: String },
}
