//! Provenance of an ingested file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::dataset::Dataset;

/// Where a dataset came from, shown at the top of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub file: String,
    pub path: PathBuf,
    /// `sha256:<hex>` digest of the raw bytes.
    pub hash: String,
    pub size_bytes: u64,
    /// Short name for the delimiter: csv, tsv, psv...
    pub format: String,
    pub row_count: usize,
    pub column_count: usize,
    pub ingested_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub(crate) fn describe(path: &Path, bytes: &[u8], delimiter: u8, dataset: &Dataset) -> Self {
        let digest = Sha256::digest(bytes);
        Self {
            file: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            hash: format!("sha256:{:x}", digest),
            size_bytes: bytes.len() as u64,
            format: format_name(delimiter).to_string(),
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            ingested_at: Utc::now(),
        }
    }
}

fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b',' => "csv",
        b'\t' => "tsv",
        b'|' => "psv",
        b';' => "ssv",
        _ => "delimited",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;

    #[test]
    fn test_describe_counts_and_hash() {
        let ds = Dataset::from_rows(
            vec!["a".to_string()],
            vec![vec![Value::Integer(1)], vec![Value::Integer(2)]],
        )
        .unwrap();
        let meta = SourceMetadata::describe(Path::new("/tmp/x/data.tsv"), b"a\n1\n2\n", b'\t', &ds);

        assert_eq!(meta.file, "data.tsv");
        assert_eq!(meta.format, "tsv");
        assert_eq!(meta.size_bytes, 6);
        assert_eq!((meta.row_count, meta.column_count), (2, 1));
        assert_eq!(meta.hash.len(), "sha256:".len() + 64);
    }
}
