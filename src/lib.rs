pub mod cleaner;
pub mod config;
pub mod graph;
pub mod loader;
pub mod output;
pub mod partition;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod year;
