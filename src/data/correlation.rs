//! Pairwise family correlation matrix reader

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::GroupingError;

/// Correlation coefficients keyed by (row family, column family).
///
/// The matrix is stored as given; no symmetry is assumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationMatrix {
    scores: HashMap<(String, String), f64>,
}

impl CorrelationMatrix {
    /// Record one coefficient
    pub fn insert(&mut self, family: &str, partner: &str, score: f64) {
        self.scores
            .insert((family.to_string(), partner.to_string()), score);
    }

    pub fn get(&self, family: &str, partner: &str) -> Option<f64> {
        self.scores
            .get(&(family.to_string(), partner.to_string()))
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.scores
            .iter()
            .map(|((f, p), &score)| (f.as_str(), p.as_str(), score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Parse one matrix cell; empty, `NA` and non-numeric cells are missing
fn parse_score(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Load a tab-separated square family x family matrix.
///
/// The first header cell is a label and is ignored; the remaining header
/// cells name the columns. Each row starts with its family.
pub fn read_correlation_matrix(path: &Path) -> Result<CorrelationMatrix> {
    log::info!("Reading correlation matrix: {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("cannot open correlation matrix {}", path.display()))?;

    parse_correlation_matrix(file, &path.display().to_string())
}

/// Parse a correlation matrix from any reader; `source` names it in diagnostics
pub fn parse_correlation_matrix<R: Read>(reader: R, source: &str) -> Result<CorrelationMatrix> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let columns: Vec<String> = rdr
        .headers()
        .with_context(|| format!("cannot read header of {}", source))?
        .iter()
        .skip(1)
        .map(|name| name.trim().to_string())
        .collect();

    if columns.is_empty() {
        return Err(GroupingError::EmptyCorrelationHeader {
            path: source.to_string(),
        }
        .into());
    }

    let mut matrix = CorrelationMatrix::default();
    let mut missing = 0usize;

    for (line, result) in rdr.records().enumerate() {
        let line = line + 2;
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => {
                return Err(err).with_context(|| format!("failed reading {}", source));
            }
            Err(err) => {
                log::warn!("Skipping unreadable row {} of {}: {}", line, source, err);
                continue;
            }
        };

        if record.len() != columns.len() + 1 {
            log::warn!(
                "Skipping row {} of {}: expected {} columns, found {}",
                line,
                source,
                columns.len() + 1,
                record.len()
            );
            continue;
        }

        let family = record[0].trim();
        for (partner, cell) in columns.iter().zip(record.iter().skip(1)) {
            match parse_score(cell) {
                Some(score) => matrix.insert(family, partner, score),
                None => missing += 1,
            }
        }
    }

    log::info!(
        "Read {} correlation scores from {} ({} missing cells)",
        matrix.len(),
        source,
        missing
    );

    Ok(matrix)
}
