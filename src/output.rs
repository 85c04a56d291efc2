//! Writes year partitions to disk and reports run summaries.
//!
//! Each year goes to its own headerless CSV; the year itself is never a column.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::cleaner::Edge;
use crate::config::SplitConfig;
use crate::partition::YearPartition;
use crate::stats::{SplitStats, YearCount};

/// Logs run statistics using Rust's debug pretty-print format.
pub fn print_pretty(stats: &SplitStats) {
    debug!("{:#?}", stats);
}

/// Logs run statistics as pretty-printed JSON.
pub fn print_json(stats: &SplitStats) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

/// Console line announcing a written year file.
pub fn saved_message(path: &str, rows: usize) -> String {
    format!("Saved {} ({} rows)", path, rows)
}

/// Writes `edges` to `path` as a headerless `source,target,rating,time` CSV.
///
/// Truncates any existing file.
pub fn write_edges(path: &Path, edges: &[Edge]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for edge in edges {
        writer.serialize(edge)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes one file per year under `config.output_dir`, creating it if absent.
///
/// Prints `Saved <path> (<n> rows)` after each file.
#[tracing::instrument(skip_all, fields(output_dir = %config.output_dir.display()))]
pub fn write_partition(config: &SplitConfig, partition: &YearPartition) -> Result<Vec<YearCount>> {
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating output directory {}", config.output_dir.display()))?;

    let mut written = Vec::with_capacity(partition.len());
    for (&year, edges) in partition {
        let path = config.year_file(year);
        write_edges(&path, edges)?;

        let path = path.display().to_string();
        println!("{}", saved_message(&path, edges.len()));
        info!(year, rows = edges.len(), path = %path, "Year file written");

        written.push(YearCount {
            year,
            rows: edges.len(),
            path,
        });
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::Rating;

    fn edge(source: i64, target: i64, rating: Rating, time: i64) -> Edge {
        Edge {
            source,
            target,
            rating,
            time,
        }
    }

    fn config_in(dir: &Path) -> SplitConfig {
        SplitConfig {
            output_dir: dir.join("by_year"),
            ..SplitConfig::default()
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&SplitStats::default());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&SplitStats::default()).unwrap();
    }

    #[test]
    fn test_saved_message_format() {
        assert_eq!(
            saved_message("bitcoinotc_by_year/bitcoinotc_2010.csv", 4),
            "Saved bitcoinotc_by_year/bitcoinotc_2010.csv (4 rows)"
        );
    }

    #[test]
    fn test_write_edges_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.csv");
        let edges = vec![
            edge(6, 2, Rating::Int(4), 1289241911),
            edge(1, 15, Rating::Float(0.5), 1289243140),
        ];

        write_edges(&path, &edges).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "6,2,4,1289241911\n1,15,0.5,1289243140\n");
    }

    #[test]
    fn test_write_edges_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.csv");

        write_edges(&path, &[edge(1, 2, Rating::Int(1), 0)]).unwrap();
        write_edges(&path, &[edge(3, 4, Rating::Int(-2), 5)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "3,4,-2,5\n");
    }

    #[test]
    fn test_write_partition_creates_dir_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let mut partition = YearPartition::new();
        partition.insert(2010, vec![edge(6, 2, Rating::Int(4), 1289241911)]);
        partition.insert(
            2011,
            vec![
                edge(4, 3, Rating::Int(7), 1293840000),
                edge(5, 1, Rating::Int(-1), 1293840001),
            ],
        );

        let written = write_partition(&config, &partition).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0].year, 2010);
        assert_eq!(written[0].rows, 1);
        assert_eq!(written[1].rows, 2);

        let path_2011 = config.output_dir.join("bitcoinotc_2011.csv");
        assert_eq!(written[1].path, path_2011.display().to_string());
        let content = fs::read_to_string(path_2011).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with("4,3,7,1293840000\n"));
    }

    #[test]
    fn test_write_empty_partition_still_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let written = write_partition(&config, &YearPartition::new()).unwrap();

        assert!(written.is_empty());
        assert!(config.output_dir.is_dir());
    }
}
