//! Load, clean, partition and write, in that order.

use anyhow::{Result, ensure};
use tracing::info;

use crate::cleaner::clean;
use crate::config::SplitConfig;
use crate::loader::load_edges;
use crate::output::write_partition;
use crate::partition::partition_by_year;
use crate::stats::SplitStats;

/// Runs the whole split for `config` and returns a summary.
///
/// # Errors
///
/// Any failing stage aborts the run. Files written for earlier years are left in place.
#[tracing::instrument(skip_all, fields(input = %config.input.display()))]
pub fn run(config: &SplitConfig) -> Result<SplitStats> {
    let mut stats = SplitStats::new(&config.input.display().to_string());

    let rows = load_edges(&config.input)?;
    stats.rows_read = rows.len();

    let cleaned = clean(rows)?;
    stats.rows_dropped = cleaned.dropped;

    let partition = partition_by_year(cleaned.edges)?;
    let files = write_partition(config, &partition)?;
    let stats = stats.with_files(files);
    ensure!(
        stats.is_balanced(),
        "row counts do not add up: read {}, dropped {}, written {}",
        stats.rows_read,
        stats.rows_dropped,
        stats.rows_written
    );

    info!(
        rows_read = stats.rows_read,
        rows_dropped = stats.rows_dropped,
        dropped_pct = stats.dropped_pct(),
        rows_written = stats.rows_written,
        years = ?stats.years(),
        "Split complete"
    );
    Ok(stats)
}
