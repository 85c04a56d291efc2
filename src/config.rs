//! Fixed locations used by the splitter.

use std::path::PathBuf;

/// Input file read from the working directory.
pub const INPUT_FILE: &str = "soc-sign-bitcoinotc.csv";

/// Directory that receives one CSV per year.
pub const OUTPUT_DIR: &str = "bitcoinotc_by_year";

/// Literal prefix placed before the year in every output file name.
pub const FILE_PREFIX: &str = "bitcoinotc_";

/// Year files ranked by the report after the full network.
pub const REPORT_YEARS: [i32; 3] = [2011, 2012, 2013];

/// Nodes listed per ranking in a report.
pub const TOP_N: usize = 10;

/// Where the pipeline reads from and writes to.
///
/// The binary always uses [`SplitConfig::default`]; other values exist so the
/// pipeline can be pointed at temporary directories.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub report_years: Vec<i32>,
    pub top_n: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(INPUT_FILE),
            output_dir: PathBuf::from(OUTPUT_DIR),
            file_prefix: FILE_PREFIX.to_string(),
            report_years: REPORT_YEARS.to_vec(),
            top_n: TOP_N,
        }
    }
}

impl SplitConfig {
    /// Path of the output file for `year`, e.g. `bitcoinotc_by_year/bitcoinotc_2010.csv`.
    pub fn year_file(&self, year: i32) -> PathBuf {
        self.output_dir.join(format!("{}{}.csv", self.file_prefix, year))
    }
}
