//! Co-occurrence link extraction from entity annotations

use itertools::Itertools;

use crate::data::{AllowList, Entity};
use crate::family::FamilyIndex;

/// An unordered family pair observed on one entity.
///
/// `partner == None` is a self-link: the family was the entity's only
/// (allowed) annotation, which keeps it alive as a singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
    pub family: u32,
    pub partner: Option<u32>,
}

impl Link {
    pub fn pair(family: u32, partner: u32) -> Self {
        Self {
            family,
            partner: Some(partner),
        }
    }

    pub fn alone(family: u32) -> Self {
        Self {
            family,
            partner: None,
        }
    }
}

/// Links of one entity, deduplicated within the entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityLinks {
    /// Distinct families that survived the allow-list, first-seen order
    pub families: Vec<u32>,
    pub links: Vec<Link>,
}

/// Turns entity annotations into links, interning families on the way
#[derive(Debug, Default)]
pub struct LinkExtractor<'a> {
    allow: Option<&'a AllowList>,
}

impl<'a> LinkExtractor<'a> {
    pub fn new(allow: Option<&'a AllowList>) -> Self {
        Self { allow }
    }

    /// Extract the links of one entity.
    ///
    /// Families outside the allow-list are removed before pairing, so they
    /// never appear on either side of a link and are never interned.
    pub fn extract(&self, entity: &Entity, index: &mut FamilyIndex) -> EntityLinks {
        let families: Vec<u32> = entity
            .families
            .iter()
            .filter(|fam| self.allow.map_or(true, |allow| allow.contains(fam)))
            .map(|fam| index.get_or_insert(fam))
            .unique()
            .collect();

        let links = match families.as_slice() {
            [] => Vec::new(),
            [only] => vec![Link::alone(*only)],
            _ => families
                .iter()
                .tuple_combinations()
                .map(|(&a, &b)| Link::pair(a, b))
                .collect(),
        };

        EntityLinks { families, links }
    }
}

/// Extract links for every entity, in input order
pub fn extract_all(
    entities: &[Entity],
    allow: Option<&AllowList>,
    index: &mut FamilyIndex,
) -> Vec<EntityLinks> {
    let extractor = LinkExtractor::new(allow);
    let extracted: Vec<EntityLinks> = entities
        .iter()
        .map(|entity| extractor.extract(entity, index))
        .collect();

    let link_count: usize = extracted.iter().map(|e| e.links.len()).sum();
    log::info!(
        "Extracted {} links over {} families from {} entities",
        link_count,
        index.len(),
        entities.len()
    );

    extracted
}
