//! Family cross-reference table reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::error::GroupingError;

/// Separators allowed between families inside one cell
const CELL_SEPARATORS: [char; 2] = [';', '|'];

/// One database entry and the distinct families annotating it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: String,

    /// Distinct families in column-then-cell order
    pub families: Vec<String>,
}

/// Parsed cross-reference table
#[derive(Debug, Clone, Default)]
pub struct CrossRefTable {
    pub entities: Vec<Entity>,

    /// Rows dropped for a wrong field count or undecodable text
    pub skipped_rows: usize,
}

/// Split a multi-value cell into its non-empty family accessions
pub fn split_cell(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(&CELL_SEPARATORS[..])
        .map(str::trim)
        .filter(|fam| !fam.is_empty())
}

/// Load a tab-separated cross-reference table: `entityId, PFAMs, TIGRFAMs, COGs, ...`
pub fn read_crossref(path: &Path) -> Result<CrossRefTable> {
    log::info!("Reading family cross-reference table: {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("cannot open cross-reference table {}", path.display()))?;

    parse_crossref(file, &path.display().to_string())
}

/// Parse a cross-reference table from any reader; `source` names it in diagnostics
pub fn parse_crossref<R: Read>(reader: R, source: &str) -> Result<CrossRefTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let width = rdr
        .headers()
        .with_context(|| format!("cannot read header of {}", source))?
        .len();

    let mut table = CrossRefTable::default();

    // An empty file has no header and no rows
    if width == 0 {
        log::info!("Cross-reference table {} is empty", source);
        return Ok(table);
    }
    if width < 2 {
        return Err(GroupingError::NoFamilyColumns {
            path: source.to_string(),
        }
        .into());
    }

    for (line, result) in rdr.records().enumerate() {
        // Header is line 1
        let line = line + 2;
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => {
                return Err(err).with_context(|| format!("failed reading {}", source));
            }
            Err(err) => {
                log::warn!("Skipping unreadable row {} of {}: {}", line, source, err);
                table.skipped_rows += 1;
                continue;
            }
        };

        if record.len() != width {
            log::warn!(
                "Skipping row {} of {}: expected {} columns, found {}",
                line,
                source,
                width,
                record.len()
            );
            table.skipped_rows += 1;
            continue;
        }

        let families = record
            .iter()
            .skip(1)
            .flat_map(split_cell)
            .unique()
            .map(str::to_string)
            .collect();

        table.entities.push(Entity {
            id: record[0].to_string(),
            families,
        });
    }

    log::info!(
        "Read {} entities from {} ({} malformed rows skipped)",
        table.entities.len(),
        source,
        table.skipped_rows
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn splits_on_both_separators_and_drops_empties() {
        let fams: Vec<&str> = split_cell("PF1;PF2|PF3;;").collect();
        assert_eq!(fams, vec!["PF1", "PF2", "PF3"]);
        assert_eq!(split_cell("").count(), 0);
    }

    #[test]
    fn parses_rows_and_dedupes_per_entity() {
        let input = "gene\tPFAMs\tTIGRFAMs\tCOGs\n\
                     g1\tPF1;PF2;\tTIGR1\tCOG1\n\
                     g2\tPF1\t\tPF1\n\
                     g3\t\t\t\n";
        let table = parse_crossref(input.as_bytes(), "test").unwrap();

        assert_eq!(table.skipped_rows, 0);
        assert_eq!(table.entities.len(), 3);
        assert_eq!(table.entities[0].id, "g1");
        assert_eq!(table.entities[0].families, vec!["PF1", "PF2", "TIGR1", "COG1"]);
        assert_eq!(table.entities[1].families, vec!["PF1"]);
        assert!(table.entities[2].families.is_empty());
    }

    #[test]
    fn skips_rows_with_wrong_column_count() {
        let input = "gene\tPFAMs\tTIGRFAMs\tCOGs\n\
                     g1\tPF1\tTIGR1\n\
                     g2\tPF2\t\tCOG2\n";
        let table = parse_crossref(input.as_bytes(), "test").unwrap();

        assert_eq!(table.skipped_rows, 1);
        assert_eq!(table.entities.len(), 1);
        assert_eq!(table.entities[0].id, "g2");
    }

    #[test]
    fn empty_input_is_an_empty_table() {
        let table = parse_crossref("".as_bytes(), "test").unwrap();
        assert!(table.entities.is_empty());
        assert_eq!(table.skipped_rows, 0);
    }

    #[test]
    fn header_without_family_columns_is_rejected() {
        let err = parse_crossref("gene\ng1\n".as_bytes(), "test").unwrap_err();
        assert_eq!(
            err.downcast_ref::<GroupingError>(),
            Some(&GroupingError::NoFamilyColumns {
                path: "test".to_string()
            })
        );
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "gene\tPFAMs\ng1\tPF7\n").unwrap();

        let table = read_crossref(file.path()).unwrap();
        assert_eq!(table.entities[0].families, vec!["PF7"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_crossref(&dir.path().join("absent.tsv")).is_err());
    }
}
