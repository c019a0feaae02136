use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::{ColumnContinuousSection, Histogram, Section};
use crate::stats::ContinuousStats;

use super::{Analyzer, require_column};

const DEFAULT_BINS: usize = 10;

/// Summary statistics and histogram of a numeric column.
#[derive(Debug, Clone)]
pub struct ColumnContinuousAnalyzer {
    column: String,
    bins: usize,
}

impl ColumnContinuousAnalyzer {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            bins: DEFAULT_BINS,
        }
    }

    /// Number of histogram bins.
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }
}

impl Analyzer for ColumnContinuousAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        if let Some(empty) = require_column("ColumnContinuousAnalyzer", dataset, &self.column) {
            return Ok(empty);
        }
        let values = dataset.column(&self.column).unwrap_or_default();
        debug!(column = %self.column, "analyzing continuous distribution");

        let stats = ContinuousStats::from_values(values);
        let numbers: Vec<f64> = values.iter().filter_map(|v| v.as_f64()).collect();
        let histogram = Histogram::from_values(&numbers, self.bins);
        Ok(ColumnContinuousSection::new(self.column.clone(), stats, histogram)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use serde_json::json;

    #[test]
    fn test_statistics() {
        let dataset = Dataset::new([(
            "x",
            vec![
                Value::Integer(1),
                Value::Integer(2),
                Value::Integer(3),
                Value::Null,
                Value::Float(f64::NAN),
            ],
        )])
        .unwrap();
        let stats = ColumnContinuousAnalyzer::new("x")
            .with_bins(2)
            .analyze(&dataset)
            .unwrap()
            .get_statistics();
        assert_eq!(stats["count"], json!(5));
        assert_eq!(stats["num_nulls"], json!(1));
        assert_eq!(stats["num_nans"], json!(1));
        assert_eq!(stats["mean"], json!(2.0));
        assert_eq!(stats["median"], json!(2.0));
        assert_eq!(stats["histogram"]["counts"], json!([1, 2]));
    }

    #[test]
    fn test_zero_rows_give_nan() {
        let dataset = Dataset::new([("x", Vec::new())]).unwrap();
        let stats = ColumnContinuousAnalyzer::new("x")
            .analyze(&dataset)
            .unwrap()
            .get_statistics();
        assert_eq!(stats["count"], json!(0));
        assert!(stats["mean"].is_null());
    }

    #[test]
    fn test_missing_column() {
        let section = ColumnContinuousAnalyzer::new("y")
            .analyze(&Dataset::default())
            .unwrap();
        assert!(section.is_empty());
    }
}
