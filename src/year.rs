use anyhow::{Result, anyhow};
use chrono::{DateTime, Datelike, Utc};

/// Returns the UTC calendar year of a Unix timestamp in seconds.
///
/// # Errors
///
/// Returns an error if chrono cannot represent the timestamp.
pub fn utc_year(time: i64) -> Result<i32> {
    DateTime::<Utc>::from_timestamp(time, 0)
        .map(|dt| dt.year())
        .ok_or_else(|| anyhow!("timestamp {} is outside the supported date range", time))
}
