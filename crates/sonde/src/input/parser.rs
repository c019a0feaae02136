//! Delimited text ingestion.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::{Dataset, Value};
use crate::error::{Result, SondeError};

use super::source::SourceMetadata;

/// Candidates for delimiter sniffing, in tie-break order.
const CANDIDATES: [u8; 4] = [b'\t', b',', b';', b'|'];

/// Lines inspected when sniffing the delimiter.
const SNIFF_LINES: usize = 10;

/// How a file is turned into a [`Dataset`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Field separator; sniffed from the first lines when unset.
    pub delimiter: Option<char>,
    pub has_header: bool,
    /// Stop after this many data rows.
    pub max_rows: Option<usize>,
    pub quote: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: '"',
        }
    }
}

/// Reads CSV/TSV-like text into a [`Dataset`], typing each cell with [`Value::parse`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Read a file, returning the dataset and where it came from.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SondeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let delimiter = self.delimiter(&bytes)?;
        let dataset = self.read(&bytes, delimiter)?;
        debug!(
            path = %path.display(),
            delimiter = %(delimiter as char).escape_default(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "ingested file"
        );

        let source = SourceMetadata::describe(path, &bytes, delimiter, &dataset);
        Ok((dataset, source))
    }

    /// Read in-memory text.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Dataset> {
        let delimiter = self.delimiter(bytes)?;
        self.read(bytes, delimiter)
    }

    fn delimiter(&self, bytes: &[u8]) -> Result<u8> {
        match self.config.delimiter {
            None => sniff_delimiter(bytes, ascii(self.config.quote, "quote")?),
            Some(c) => ascii(c, "delimiter"),
        }
    }

    fn read(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(ascii(self.config.quote, "quote")?)
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);
        let mut records = reader.records();

        let mut headers = Vec::new();
        if self.config.has_header {
            let first = records
                .next()
                .ok_or_else(|| SondeError::EmptyData("No header row found".to_string()))??;
            headers = first.iter().map(|h| h.trim().to_string()).collect();
        }

        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let mut rows = Vec::new();
        for record in records.take(limit) {
            let record = record?;
            rows.push(record.iter().map(Value::parse).collect::<Vec<_>>());
        }

        if !self.config.has_header {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            headers = (1..=width).map(|i| format!("column_{}", i)).collect();
        }
        if headers.is_empty() {
            return Err(SondeError::EmptyData("No columns found".to_string()));
        }

        Dataset::from_rows(headers, rows)
    }
}

fn ascii(c: char, what: &str) -> Result<u8> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| SondeError::Config(format!("{} '{}' is not ASCII", what, c)))
}

/// Pick the candidate that splits the sampled lines most often and most
/// consistently. Falls back to a comma when nothing splits.
fn sniff_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    let text = String::from_utf8_lossy(bytes);
    let sample: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    if sample.is_empty() {
        return Err(SondeError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best = (b',', 0usize);
    for candidate in CANDIDATES {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| split_count(line, candidate, quote))
            .collect();
        let min = counts.iter().copied().min().unwrap_or(0);
        let max = counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            continue;
        }
        // A delimiter seen the same number of times on every line beats
        // any ragged one.
        let score = if min == max { max * SNIFF_LINES * 10 } else { min * 10 + 1 };
        if score > best.1 {
            best = (candidate, score);
        }
    }
    Ok(best.0)
}

fn split_count(line: &str, delimiter: u8, quote: u8) -> usize {
    let mut quoted = false;
    line.bytes()
        .filter(|&b| {
            if b == quote {
                quoted = !quoted;
            }
            b == delimiter && !quoted
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_prefers_consistent_delimiter() {
        assert_eq!(sniff_delimiter(b"a,b,c\n1,2,3\n4,5,6", b'"').unwrap(), b',');
        assert_eq!(sniff_delimiter(b"a\tb\n1\t2", b'"').unwrap(), b'\t');
        // Commas inside a quoted field do not count.
        assert_eq!(sniff_delimiter(b"a;b\n\"1,5\";2\n\"3,1\";4", b'"').unwrap(), b';');
    }

    #[test]
    fn test_sniff_single_column_defaults_to_comma() {
        assert_eq!(sniff_delimiter(b"value\n1\n2", b'"').unwrap(), b',');
    }

    #[test]
    fn test_parse_types_cells() {
        let ds = Parser::new()
            .parse_bytes(b"name,age,city\nAlice,30,NYC\nBob,25,LA")
            .unwrap();

        assert_eq!(ds.column_names(), vec!["name", "age", "city"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.get(0, "name"), Some(&Value::from("Alice")));
        assert_eq!(ds.get(1, "age"), Some(&Value::Integer(25)));
    }

    #[test]
    fn test_short_rows_are_padded_with_null() {
        let ds = Parser::new().parse_bytes(b"a,b,c\n1,2\n3,4,5").unwrap();
        assert_eq!(ds.get(0, "c"), Some(&Value::Null));
        assert_eq!(ds.get(1, "c"), Some(&Value::Integer(5)));
    }

    #[test]
    fn test_header_only_gives_zero_rows() {
        let ds = Parser::new().parse_bytes(b"a,b\n").unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_count(), 2);
    }

    #[test]
    fn test_headerless_columns_are_numbered() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let ds = parser.parse_bytes(b"1,2\n3,4,5").unwrap();
        assert_eq!(ds.column_names(), vec!["column_1", "column_2", "column_3"]);
        assert_eq!(ds.get(0, "column_3"), Some(&Value::Null));
    }

    #[test]
    fn test_max_rows_limits_data_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        assert_eq!(parser.parse_bytes(b"a\n1\n2\n3").unwrap().row_count(), 1);
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let parser = Parser::with_config(ParserConfig {
            delimiter: Some('→'),
            ..ParserConfig::default()
        });
        assert!(matches!(parser.parse_bytes(b"a"), Err(SondeError::Config(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            Parser::new().parse_bytes(b""),
            Err(SondeError::EmptyData(_))
        ));
    }
}
