//! Drops incomplete rows and coerces the rest into typed [`Edge`]s.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{debug, info};

use crate::loader::RawEdge;

/// Rating carried by an edge.
///
/// Integral values, including float text such as `4.0`, become [`Rating::Int`]
/// so the column is written back without decimal points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rating {
    Int(i64),
    Float(f64),
}

/// A fully typed rating from `source` to `target` at Unix time `time`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub source: i64,
    pub target: i64,
    pub rating: Rating,
    pub time: i64,
}

/// Output of [`clean`]: the kept edges in input order plus the number of dropped rows.
#[derive(Debug)]
pub struct Cleaned {
    pub edges: Vec<Edge>,
    pub dropped: usize,
}

/// Removes rows with any missing cell and coerces the remaining ones.
///
/// # Errors
///
/// Returns an error on the first kept row holding a value that is not numeric.
#[tracing::instrument(skip_all, fields(rows = rows.len()))]
pub fn clean(rows: Vec<RawEdge>) -> Result<Cleaned> {
    let mut cleaned = Cleaned {
        edges: Vec::with_capacity(rows.len()),
        dropped: 0,
    };

    for (index, row) in rows.into_iter().enumerate() {
        let (Some(source), Some(target), Some(rating), Some(time)) =
            (row.source, row.target, row.rating, row.time)
        else {
            cleaned.dropped += 1;
            continue;
        };

        let row_number = index + 1;
        let edge = Edge {
            source: parse_node(&source).with_context(|| at("source", row_number))?,
            target: parse_node(&target).with_context(|| at("target", row_number))?,
            rating: parse_rating(&rating).with_context(|| at("rating", row_number))?,
            time: parse_time(&time).with_context(|| at("time", row_number))?,
        };
        cleaned.edges.push(edge);
    }

    if cleaned.dropped > 0 {
        debug!(dropped = cleaned.dropped, "Dropped rows with missing values");
    }
    info!(
        kept = cleaned.edges.len(),
        dropped = cleaned.dropped,
        "Rows cleaned"
    );
    Ok(cleaned)
}

fn at(column: &str, row_number: usize) -> String {
    format!("converting column `{column}` in data row {row_number}")
}

/// Parses a node id. Integral float text like `"1.0"` is accepted and truncated.
pub fn parse_node(value: &str) -> Result<i64> {
    if let Ok(v) = value.parse::<i64>() {
        return Ok(v);
    }
    truncate(value)
}

pub fn parse_rating(value: &str) -> Result<Rating> {
    if let Ok(v) = value.parse::<i64>() {
        return Ok(Rating::Int(v));
    }
    let Ok(v) = value.parse::<f64>() else {
        bail!("invalid numeric value {:?}", value);
    };
    if v.fract() == 0.0 && in_i64_range(v) {
        return Ok(Rating::Int(v as i64));
    }
    Ok(Rating::Float(v))
}

/// Parses a timestamp as a float and truncates toward zero, so `"100.9"` is `100`.
pub fn parse_time(value: &str) -> Result<i64> {
    truncate(value)
}

fn truncate(value: &str) -> Result<i64> {
    let Ok(v) = value.parse::<f64>() else {
        bail!("invalid numeric value {:?}", value);
    };
    if !v.is_finite() {
        bail!("non-finite value {:?} cannot be converted to an integer", value);
    }
    let t = v.trunc();
    if !in_i64_range(t) {
        bail!("value {:?} is out of integer range", value);
    }
    Ok(t as i64)
}

// 2^63 is exactly representable; anything at or past it overflows i64.
fn in_i64_range(v: f64) -> bool {
    (-9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0).contains(&v)
}
