//! Family allow-list reader

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// Families link extraction is restricted to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    families: HashSet<String>,
}

impl AllowList {
    pub fn contains(&self, family: &str) -> bool {
        self.families.contains(family)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            families: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read one family accession per line; blank lines are ignored
pub fn read_allow_list(path: &Path) -> Result<AllowList> {
    let file = File::open(path)
        .with_context(|| format!("cannot open allow-list {}", path.display()))?;

    let mut families = HashSet::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("failed reading {}", path.display()))?;
        let family = line.trim();
        if !family.is_empty() {
            families.insert(family.to_string());
        }
    }

    log::info!("Restricting links to {} allow-listed families", families.len());

    Ok(AllowList { families })
}
