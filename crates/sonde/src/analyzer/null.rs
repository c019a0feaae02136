use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::{NullValueSection, Section};
use crate::stats::null_count;

use super::Analyzer;

/// Counts null and NaN cells in every column.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullValueAnalyzer;

impl NullValueAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for NullValueAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        debug!(columns = dataset.column_count(), "analyzing null values");
        let mut columns = Vec::with_capacity(dataset.column_count());
        let mut nulls = Vec::with_capacity(dataset.column_count());
        for (name, values) in dataset.columns() {
            columns.push(name.to_string());
            nulls.push(null_count(values));
        }
        let totals = vec![dataset.row_count(); columns.len()];
        Ok(NullValueSection::new(columns, nulls, totals)?.into())
    }
}
