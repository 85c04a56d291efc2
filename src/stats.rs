use chrono::{DateTime, Utc};
use serde::Serialize;

/// One written output file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub rows: usize,
    pub path: String,
}

/// Summary of one splitter run.
#[derive(Debug, Default, Serialize)]
pub struct SplitStats {
    pub started_at: DateTime<Utc>,
    pub input: String,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub rows_written: usize,
    pub files: Vec<YearCount>,
}

impl SplitStats {
    pub fn new(input: &str) -> Self {
        SplitStats {
            started_at: Utc::now(),
            input: input.to_string(),
            ..Default::default()
        }
    }

    /// Record the written files and derive `rows_written` from them.
    pub fn with_files(mut self, files: Vec<YearCount>) -> Self {
        self.rows_written = files.iter().map(|f| f.rows).sum();
        self.files = files;
        self
    }

    pub fn years(&self) -> Vec<i32> {
        self.files.iter().map(|f| f.year).collect()
    }

    /// Share of read rows that were dropped, as a percentage.
    pub fn dropped_pct(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.rows_dropped as f64 / self.rows_read as f64) * 100.0
        }
    }

    /// True when every read row was either dropped or written exactly once.
    pub fn is_balanced(&self) -> bool {
        self.rows_read == self.rows_dropped + self.rows_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(year: i32, rows: usize) -> YearCount {
        YearCount {
            year,
            rows,
            path: format!("out/bitcoinotc_{year}.csv"),
        }
    }

    #[test]
    fn test_dropped_pct_with_zero_rows() {
        let stats = SplitStats::new("in.csv");
        assert_eq!(stats.dropped_pct(), 0.0);
    }

    #[test]
    fn test_with_files_sums_rows() {
        let mut stats = SplitStats::new("in.csv");
        stats.rows_read = 10;
        stats.rows_dropped = 3;
        let stats = stats.with_files(vec![file(2010, 4), file(2011, 3)]);

        assert_eq!(stats.rows_written, 7);
        assert_eq!(stats.years(), vec![2010, 2011]);
        assert!(stats.is_balanced());
        assert_eq!(stats.dropped_pct(), 30.0);
    }

    #[test]
    fn test_unbalanced() {
        let mut stats = SplitStats::new("in.csv");
        stats.rows_read = 5;
        let stats = stats.with_files(vec![file(2010, 4)]);
        assert!(!stats.is_balanced());
    }
}
