//! Sonde CLI - profiling reports for tabular datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use sonde::LoggingConfig;

fn main() {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    }
    .with_json_format(cli.log_json);

    let result = match cli.command {
        Commands::Profile {
            file,
            output,
            config,
            max_toc_depth,
            title,
        } => commands::profile::run(file, output, config, max_toc_depth, title, &logging),

        Commands::Stats { file, config } => commands::stats::run(file, config, &logging),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
