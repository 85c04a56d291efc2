//! Groups cleaned edges by the UTC year of their timestamp.

use anyhow::Result;
use std::collections::BTreeMap;
use tracing::debug;

use crate::cleaner::Edge;
use crate::year::utc_year;

/// Edges keyed by year, ascending, each group in first-occurrence order.
pub type YearPartition = BTreeMap<i32, Vec<Edge>>;

/// Assigns every edge to exactly one year group.
///
/// # Errors
///
/// Returns an error if any timestamp cannot be mapped to a calendar year.
#[tracing::instrument(skip_all, fields(edges = edges.len()))]
pub fn partition_by_year(edges: Vec<Edge>) -> Result<YearPartition> {
    let mut groups = YearPartition::new();

    for edge in edges {
        let year = utc_year(edge.time)?;
        groups.entry(year).or_default().push(edge);
    }

    debug!(years = groups.len(), "Edges partitioned");
    Ok(groups)
}
