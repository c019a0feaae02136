use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::{DataTypeSection, Section};

use super::Analyzer;

/// Reports the value kinds found in each column. Nulls are not a kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataTypeAnalyzer;

impl DataTypeAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for DataTypeAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        debug!(columns = dataset.column_count(), "analyzing data types");
        let types: IndexMap<String, BTreeSet<String>> = dataset
            .columns()
            .map(|(name, values)| {
                let kinds = values
                    .iter()
                    .filter(|v| !v.is_null())
                    .map(|v| v.kind().to_string())
                    .collect();
                (name.to_string(), kinds)
            })
            .collect();
        Ok(DataTypeSection::new(types).into())
    }
}
