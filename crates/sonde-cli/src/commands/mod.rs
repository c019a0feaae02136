//! CLI command implementations.

pub mod profile;
pub mod stats;

use std::path::{Path, PathBuf};

use sonde::ReporterConfig;

/// Load the configuration, if any, and point it at `file`.
fn load_config(
    file: &Path,
    config: Option<&Path>,
) -> Result<ReporterConfig, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    let mut reporter_config = match config {
        Some(path) => ReporterConfig::from_file(path)?,
        None => ReporterConfig::default(),
    };
    reporter_config.ingestor.path = PathBuf::from(file);
    Ok(reporter_config)
}
