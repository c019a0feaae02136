//! Profile command - render an HTML report for a data file.

use std::path::PathBuf;

use colored::Colorize;
use sonde::{LoggingConfig, Reporter};

use super::load_config;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    max_toc_depth: Option<usize>,
    title: Option<String>,
    logging: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let has_config = config.is_some();
    let mut reporter_config = load_config(&file, config.as_deref())?;

    // An explicit output wins; without one a configured path is kept.
    reporter_config.report_path = match output {
        Some(path) => path,
        None if has_config => reporter_config.report_path,
        None => {
            let mut p = file.clone();
            let stem = p.file_stem().unwrap_or_default().to_string_lossy();
            p.set_file_name(format!("{}.report.html", stem));
            p
        }
    };
    if let Some(depth) = max_toc_depth {
        reporter_config.max_toc_depth = depth;
    }
    if let Some(title) = title {
        reporter_config.title = title;
    }

    println!(
        "{} {}",
        "Profiling".cyan().bold(),
        file.display().to_string().white()
    );

    let reporter = Reporter::new(reporter_config)?.with_logging(logging);
    let report = reporter.run()?;

    if let Some(source) = &report.source {
        println!(
            "Analyzed {} rows and {} columns ({})",
            source.row_count.to_string().white().bold(),
            source.column_count.to_string().white().bold(),
            source.format
        );
    }
    println!(
        "Report has {} top-level sections",
        report.statistics.len().to_string().white().bold()
    );

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        reporter.report_path().display().to_string().white()
    );

    Ok(())
}
