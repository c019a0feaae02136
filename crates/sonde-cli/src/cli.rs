//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sonde: profiling reports for tabular datasets
#[derive(Parser)]
#[command(name = "sonde")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render an HTML profiling report for a data file
    Profile {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the report (default: <file>.report.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON report configuration (default: standard profile)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Depth of the table of contents
        #[arg(long)]
        max_toc_depth: Option<usize>,

        /// Report title
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the statistics of a data file as JSON
    Stats {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON report configuration (default: standard profile)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
