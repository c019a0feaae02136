use std::collections::BTreeSet;

use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::{ColumnSummary, DataFrameSummarySection, Section};
use crate::stats::{null_count, value_counts};

use super::Analyzer;

const DEFAULT_TOP: usize = 5;

/// One-line overview of every column.
#[derive(Debug, Clone)]
pub struct DataFrameSummaryAnalyzer {
    top: usize,
}

impl DataFrameSummaryAnalyzer {
    pub fn new() -> Self {
        Self { top: DEFAULT_TOP }
    }

    /// Number of most frequent values listed per column.
    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }
}

impl Default for DataFrameSummaryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for DataFrameSummaryAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        debug!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "summarizing dataset"
        );
        let columns = dataset
            .columns()
            .map(|(name, values)| {
                let counts = value_counts(values, true);
                let kinds: BTreeSet<&str> = values
                    .iter()
                    .filter(|v| !v.is_null())
                    .map(|v| v.kind())
                    .collect();
                ColumnSummary {
                    name: name.to_string(),
                    kinds: kinds.into_iter().map(String::from).collect(),
                    null_count: null_count(values),
                    nunique: counts.len(),
                    most_frequent: counts
                        .into_iter()
                        .take(self.top)
                        .map(|(value, count)| (value.to_string(), count))
                        .collect(),
                }
            })
            .collect();
        Ok(DataFrameSummarySection::new(dataset.row_count(), columns).into())
    }
}
