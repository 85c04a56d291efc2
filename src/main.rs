//! CLI entry point for the Bitcoin OTC year splitter.
//!
//! `split` (the default) reads `soc-sign-bitcoinotc.csv` from the working
//! directory and writes one CSV per calendar year under `bitcoinotc_by_year/`.
//! `report` ranks nodes of the full network and of selected year files.

use anyhow::Result;
use bitcoinotc_split::{
    config::SplitConfig,
    output::{print_json, print_pretty},
    pipeline::run,
    report::run_report,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bitcoinotc_split", version)]
#[command(
    about = "Split the Bitcoin OTC trust network into one CSV per year",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one CSV per year under bitcoinotc_by_year/ (default)
    Split,
    /// Rank nodes by degree, closeness and betweenness for the full network
    /// and for the 2011-2013 year files
    Report,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bitcoinotc_split.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bitcoinotc_split.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let config = SplitConfig::default();

    match cli.command.unwrap_or(Commands::Split) {
        Commands::Split => {
            info!(
                input = %config.input.display(),
                output_dir = %config.output_dir.display(),
                "Starting split"
            );

            let stats = run(&config)?;
            print_pretty(&stats);
            print_json(&stats)?;
        }
        Commands::Report => {
            info!(
                input = %config.input.display(),
                years = ?config.report_years,
                "Starting report"
            );

            for report in run_report(&config)? {
                println!("{report}");
            }
        }
    }

    Ok(())
}
