//! Analyze the rows that match a query.

use tracing::debug;

use crate::dataset::{Dataset, Query};
use crate::error::Result;
use crate::section::Section;

use super::{Analyzer, BoxAnalyzer, skip};

/// Runs the inner analyzer on a filtered copy of the dataset.
///
/// A query that refers to a column absent from the dataset yields the empty
/// section. A filter that keeps no rows still runs the inner analyzer.
#[derive(Debug)]
pub struct FilteredAnalyzer {
    query: Query,
    analyzer: BoxAnalyzer,
}

impl FilteredAnalyzer {
    /// Parse `query` and wrap `analyzer`.
    pub fn new(query: &str, analyzer: impl Analyzer + 'static) -> Result<Self> {
        Ok(Self::from_query(Query::parse(query)?, Box::new(analyzer)))
    }

    pub fn from_query(query: Query, analyzer: BoxAnalyzer) -> Self {
        Self { query, analyzer }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }
}

impl Analyzer for FilteredAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        let missing: Vec<&str> = self
            .query
            .columns()
            .into_iter()
            .filter(|column| !dataset.contains(column))
            .collect();
        if !missing.is_empty() {
            return Ok(skip(
                "FilteredAnalyzer",
                format!("query '{}' uses missing columns {:?}", self.query, missing),
            ));
        }

        let filtered = dataset.filter_rows(|data, row| self.query.matches(data, row));
        debug!(
            query = %self.query,
            rows = filtered.row_count(),
            total = dataset.row_count(),
            "filtered dataset"
        );
        self.analyzer.analyze(&filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{DuplicatedRowAnalyzer, NullValueAnalyzer};
    use crate::dataset::Value;
    use serde_json::json;

    fn dataset() -> Dataset {
        Dataset::new([
            ("a", vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]),
            ("b", vec![Value::Null, Value::Null, Value::from("x")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_filters_rows() {
        let analyzer = FilteredAnalyzer::new("a >= 2", NullValueAnalyzer::new()).unwrap();
        let original = dataset();
        let stats = analyzer.analyze(&original).unwrap().get_statistics();
        assert_eq!(stats["total_count"], json!([2, 2]));
        assert_eq!(stats["null_count"], json!([0, 1]));
        assert_eq!(original.row_count(), 3);
    }

    #[test]
    fn test_zero_rows_still_runs() {
        let analyzer = FilteredAnalyzer::new("a > 100", DuplicatedRowAnalyzer::new()).unwrap();
        let stats = analyzer.analyze(&dataset()).unwrap().get_statistics();
        assert_eq!(stats["num_rows"], json!(0));
    }

    #[test]
    fn test_missing_column_is_empty() {
        let analyzer = FilteredAnalyzer::new("missing == 1", NullValueAnalyzer::new()).unwrap();
        assert!(analyzer.analyze(&dataset()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_query() {
        assert!(FilteredAnalyzer::new("a ==", NullValueAnalyzer::new()).is_err());
    }
}
