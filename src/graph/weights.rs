//! Occurrence and co-occurrence counting

use std::collections::HashMap;

use rayon::prelude::*;

use crate::data::CorrelationMatrix;
use crate::family::FamilyIndex;
use crate::graph::links::{EntityLinks, Link};

/// Correlation scores resolved to family indices, keyed by ordered pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationScores {
    scores: HashMap<(u32, u32), f64>,
}

impl CorrelationScores {
    /// Keep only scores between families the run actually saw
    pub fn resolve(matrix: &CorrelationMatrix, index: &FamilyIndex) -> Self {
        let scores: HashMap<(u32, u32), f64> = matrix
            .iter()
            .filter_map(|(family, partner, score)| {
                Some(((index.get(family)?, index.get(partner)?), score))
            })
            .collect();

        log::info!(
            "Resolved {} of {} correlation scores to observed families",
            scores.len(),
            matrix.len()
        );

        Self { scores }
    }

    pub fn get(&self, family: u32, partner: u32) -> Option<f64> {
        self.scores.get(&(family, partner)).copied()
    }
}

/// Per-family occurrence counts and per-pair co-occurrence counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeWeights {
    /// Number of entities each family appeared on, by family index
    occurrence: Vec<u32>,

    /// Entities on which the family was the only annotation
    solo: Vec<u32>,

    /// Entities on which both families appeared, keyed `(low, high)`
    co_links: HashMap<(u32, u32), u32>,

    correlation: Option<CorrelationScores>,
}

/// Canonical key of an unordered pair
fn pair_key(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl EdgeWeights {
    /// Empty counters for `family_count` families
    pub fn new(family_count: usize) -> Self {
        Self {
            occurrence: vec![0; family_count],
            solo: vec![0; family_count],
            co_links: HashMap::new(),
            correlation: None,
        }
    }

    /// Count one entity's links
    pub fn record(&mut self, entity: &EntityLinks) {
        for &family in &entity.families {
            self.occurrence[family as usize] += 1;
        }

        for link in &entity.links {
            match *link {
                Link {
                    family,
                    partner: Some(partner),
                } => *self.co_links.entry(pair_key(family, partner)).or_insert(0) += 1,
                Link {
                    family,
                    partner: None,
                } => self.solo[family as usize] += 1,
            }
        }
    }

    /// Fold another shard's counts into this one
    pub fn merge(&mut self, other: EdgeWeights) {
        if self.occurrence.len() < other.occurrence.len() {
            self.occurrence.resize(other.occurrence.len(), 0);
        }
        if self.solo.len() < other.solo.len() {
            self.solo.resize(other.solo.len(), 0);
        }
        for (mine, theirs) in self.occurrence.iter_mut().zip(other.occurrence) {
            *mine += theirs;
        }
        for (mine, theirs) in self.solo.iter_mut().zip(other.solo) {
            *mine += theirs;
        }
        for (key, count) in other.co_links {
            *self.co_links.entry(key).or_insert(0) += count;
        }
    }

    /// Attach external correlation scores
    pub fn with_correlation(mut self, scores: CorrelationScores) -> Self {
        self.correlation = Some(scores);
        self
    }

    pub fn occurrence(&self, family: u32) -> u32 {
        self.occurrence.get(family as usize).copied().unwrap_or(0)
    }

    /// Entities on which the family appeared without a partner
    pub fn solo(&self, family: u32) -> u32 {
        self.solo.get(family as usize).copied().unwrap_or(0)
    }

    /// Co-occurrence count of an unordered pair, zero when never seen together
    pub fn co_link(&self, family: u32, partner: u32) -> u32 {
        self.co_links
            .get(&pair_key(family, partner))
            .copied()
            .unwrap_or(0)
    }

    /// Correlation for the ordered pair, `None` when absent or not loaded
    pub fn correlation(&self, family: u32, partner: u32) -> Option<f64> {
        self.correlation.as_ref()?.get(family, partner)
    }

    /// All observed pairs `(low, high, count)` in ascending key order
    pub fn sorted_pairs(&self) -> Vec<(u32, u32, u32)> {
        let mut pairs: Vec<(u32, u32, u32)> = self
            .co_links
            .iter()
            .map(|(&(a, b), &count)| (a, b, count))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Number of distinct unordered pairs observed
    pub fn pair_count(&self) -> usize {
        self.co_links.len()
    }
}

/// Count occurrences across all entities, one rayon task per shard.
///
/// Shards only ever sum counts, so the merged result does not depend on
/// the thread count or the order shards finish in.
pub fn weigh_links(
    entities: &[EntityLinks],
    family_count: usize,
    shard_size: usize,
) -> EdgeWeights {
    let shard_size = shard_size.max(1);
    let shards = (entities.len() + shard_size - 1) / shard_size;
    log::info!(
        "Weighting links of {} entities in {} shards",
        entities.len(),
        shards
    );

    let weights = entities
        .par_chunks(shard_size)
        .map(|shard| {
            let mut local = EdgeWeights::new(family_count);
            for entity in shard {
                local.record(entity);
            }
            local
        })
        .reduce(
            || EdgeWeights::new(family_count),
            |mut acc, shard| {
                acc.merge(shard);
                acc
            },
        );

    log::info!("Counted {} distinct co-occurring pairs", weights.pair_count());

    weights
}
