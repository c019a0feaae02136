use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::{ColumnDiscreteSection, Section};
use crate::stats::value_counts;

use super::{Analyzer, require_column};

const DEFAULT_MAX_ROWS: usize = 20;

/// Value counts of one column.
#[derive(Debug, Clone)]
pub struct ColumnDiscreteAnalyzer {
    column: String,
    dropna: bool,
    max_rows: usize,
}

impl ColumnDiscreteAnalyzer {
    /// Missing values are dropped and the report shows the 20 most frequent
    /// values by default.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            dropna: true,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }

    /// Count null and NaN as values of their own.
    pub fn with_dropna(mut self, dropna: bool) -> Self {
        self.dropna = dropna;
        self
    }

    /// Number of values listed in the rendered table. Statistics keep every value.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }
}

impl Analyzer for ColumnDiscreteAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        if let Some(empty) = require_column("ColumnDiscreteAnalyzer", dataset, &self.column) {
            return Ok(empty);
        }
        let values = dataset.column(&self.column).unwrap_or_default();
        debug!(column = %self.column, "analyzing discrete distribution");

        let (values, counts): (Vec<_>, Vec<_>) =
            value_counts(values, self.dropna).into_iter().unzip();
        Ok(ColumnDiscreteSection::new(
            self.column.clone(),
            values,
            counts,
            self.dropna,
            self.max_rows,
        )?
        .into())
    }
}
