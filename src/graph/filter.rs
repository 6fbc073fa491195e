//! Edge filtering by co-occurrence count, fraction and correlation

use crate::config::{EdgeFilter, MissingCorrelation};
use crate::graph::weights::EdgeWeights;

/// Links that survived the edge filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredLinks {
    /// Kept undirected links `(low, high)` in ascending order
    pub kept: Vec<(u32, u32)>,

    /// Observed pairs that failed in both directions
    pub dropped: usize,
}

impl EdgeFilter {
    /// Whether the directed pair `family -> partner` passes
    pub fn accepts(&self, weights: &EdgeWeights, family: u32, partner: u32) -> bool {
        let co = weights.co_link(family, partner);
        if co == 0 {
            return false;
        }

        match *self {
            EdgeFilter::Absolute { min_occurrence } => co >= min_occurrence,
            EdgeFilter::Fractional {
                min_fraction,
                min_correlation,
                missing_correlation,
            } => {
                let rarer = weights
                    .occurrence(family)
                    .min(weights.occurrence(partner))
                    .max(1);
                let frac = f64::from(co) / f64::from(rarer);
                if frac < min_fraction {
                    return false;
                }

                match min_correlation {
                    None => true,
                    Some(min_corr) => match weights.correlation(family, partner) {
                        Some(corr) => corr >= min_corr,
                        None => missing_correlation == MissingCorrelation::Pass,
                    },
                }
            }
        }
    }
}

/// Apply the edge filter to every observed pair.
///
/// Each pair is checked in both directions and kept if either passes, so
/// the result is already symmetric when read as undirected links.
pub fn filter_links(weights: &EdgeWeights, filter: &EdgeFilter) -> FilteredLinks {
    let mut out = FilteredLinks::default();

    for (a, b, _) in weights.sorted_pairs() {
        if filter.accepts(weights, a, b) || filter.accepts(weights, b, a) {
            out.kept.push((a, b));
        } else {
            out.dropped += 1;
        }
    }

    log::info!(
        "Kept {} links, removed {} below threshold",
        out.kept.len(),
        out.dropped
    );

    out
}
