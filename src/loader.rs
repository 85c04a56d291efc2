//! CSV loader for the raw rating network.
//!
//! The input has no header row and four positional columns:
//! `source,target,rating,time`.

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Number of columns in an edge row.
pub const COLUMNS: usize = 4;

/// Cell values read as a missing value.
const NA_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
    "#N/A N/A", "#NA", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

/// One row as read from disk, before any type coercion.
///
/// `None` marks a missing cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEdge {
    pub source: Option<String>,
    pub target: Option<String>,
    pub rating: Option<String>,
    pub time: Option<String>,
}

impl RawEdge {
    /// Builds a row from a CSV record, padding short records with `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has more than [`COLUMNS`] cells.
    pub fn from_record(record: &StringRecord) -> Result<Self> {
        if record.len() > COLUMNS {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            bail!(
                "line {}: expected {} fields, found {}",
                line,
                COLUMNS,
                record.len()
            );
        }

        let cell = |i: usize| record.get(i).and_then(non_missing);

        Ok(Self {
            source: cell(0),
            target: cell(1),
            rating: cell(2),
            time: cell(3),
        })
    }
}

fn non_missing(value: &str) -> Option<String> {
    if NA_TOKENS.contains(&value) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Reads every row of the headerless edge CSV at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is not valid CSV, holds no
/// rows at all, or holds a row with too many fields.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_edges(path: &Path) -> Result<Vec<RawEdge>> {
    let file =
        File::open(path).with_context(|| format!("opening input file {}", path.display()))?;
    read_edges(file).with_context(|| format!("reading {}", path.display()))
}

/// Reads headerless edge rows from any reader.
pub fn read_edges<R: std::io::Read>(reader: R) -> Result<Vec<RawEdge>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(RawEdge::from_record(&record)?);
    }

    if rows.is_empty() {
        bail!("no rows to parse");
    }

    debug!(rows = rows.len(), "Edge rows loaded");
    Ok(rows)
}
