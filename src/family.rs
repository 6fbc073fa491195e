//! Protein family identifiers and their source databases

use std::collections::HashMap;

/// Source database of a family accession, decided by its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyDb {
    Pfam,
    Tigrfam,
    Cog,
    Other,
}

impl FamilyDb {
    /// Classify an accession; anything unrecognised is `Other`
    pub fn classify(family: &str) -> Self {
        if family.starts_with("TIGR") {
            Self::Tigrfam
        } else if family.starts_with("COG") {
            Self::Cog
        } else if family.starts_with("PF") {
            Self::Pfam
        } else {
            Self::Other
        }
    }
}

/// Interns family accessions to dense `u32` indices in first-seen order.
///
/// Indices double as node ids in every graph the pipeline builds, so the
/// order families are first encountered fixes the traversal order and
/// therefore the cluster numbering.
#[derive(Debug, Clone, Default)]
pub struct FamilyIndex {
    /// Mapping from accession to node index
    id_to_index: HashMap<String, u32>,

    /// Accessions by node index
    names: Vec<String>,
}

impl FamilyIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the index for an accession
    pub fn get_or_insert(&mut self, family: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(family) {
            return idx;
        }

        let idx = self.names.len() as u32;
        self.id_to_index.insert(family.to_string(), idx);
        self.names.push(family.to_string());
        idx
    }

    /// Look up an accession without inserting it
    pub fn get(&self, family: &str) -> Option<u32> {
        self.id_to_index.get(family).copied()
    }

    /// Accession for a node index
    pub fn name(&self, idx: u32) -> &str {
        &self.names[idx as usize]
    }

    /// All accessions in index order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A cluster's members split by source database, each list sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceLists {
    pub pfam: Vec<String>,
    pub tigrfam: Vec<String>,
    pub cog: Vec<String>,
    pub other: Vec<String>,
}

impl NamespaceLists {
    /// Partition accessions by database; nothing is dropped
    pub fn partition<'a, I>(families: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut lists = Self::default();
        for family in families {
            let target = match FamilyDb::classify(family) {
                FamilyDb::Pfam => &mut lists.pfam,
                FamilyDb::Tigrfam => &mut lists.tigrfam,
                FamilyDb::Cog => &mut lists.cog,
                FamilyDb::Other => &mut lists.other,
            };
            target.push(family.to_string());
        }

        lists.pfam.sort_unstable();
        lists.tigrfam.sort_unstable();
        lists.cog.sort_unstable();
        lists.other.sort_unstable();
        lists
    }
}
