use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::{DuplicatedRowSection, Section};
use crate::stats::unique_row_count;

use super::{Analyzer, skip};

/// Counts duplicated rows, over all columns or a subset.
#[derive(Debug, Clone, Default)]
pub struct DuplicatedRowAnalyzer {
    columns: Option<Vec<String>>,
}

impl DuplicatedRowAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare rows on these columns only.
    pub fn with_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}

impl Analyzer for DuplicatedRowAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        let columns: Vec<String> = match &self.columns {
            Some(columns) => {
                if let Some(missing) = columns.iter().find(|c| !dataset.contains(c)) {
                    return Ok(skip(
                        "DuplicatedRowAnalyzer",
                        format!("column '{}' is not in the dataset", missing),
                    ));
                }
                columns.clone()
            }
            None => dataset.column_names().into_iter().map(String::from).collect(),
        };
        debug!(columns = columns.len(), "analyzing duplicated rows");
        let num_unique_rows = unique_row_count(dataset, &columns);
        Ok(DuplicatedRowSection::new(dataset.row_count(), num_unique_rows, self.columns.clone())?.into())
    }
}
