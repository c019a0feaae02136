//! Stats command - print the statistics tree of a data file.

use std::path::PathBuf;

use sonde::{LoggingConfig, Reporter};

use super::load_config;

pub fn run(
    file: PathBuf,
    config: Option<PathBuf>,
    logging: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let reporter_config = load_config(&file, config.as_deref())?;
    let report = Reporter::new(reporter_config)?
        .with_logging(logging)
        .compute()?;

    let statistics = serde_json::Value::Object(report.statistics);
    println!("{}", serde_json::to_string_pretty(&statistics)?);
    Ok(())
}
