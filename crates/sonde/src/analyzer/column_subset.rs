//! Analyze a projection of the dataset.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::Section;

use super::{Analyzer, BoxAnalyzer, skip};

/// Projects the dataset onto a fixed set of columns, then runs the inner
/// analyzer on the projection.
///
/// If any requested column is absent the result is the empty section.
#[derive(Debug)]
pub struct ColumnSubsetAnalyzer {
    columns: Vec<String>,
    analyzer: BoxAnalyzer,
}

impl ColumnSubsetAnalyzer {
    pub fn new<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        analyzer: impl Analyzer + 'static,
    ) -> Self {
        Self::from_boxed(columns, Box::new(analyzer))
    }

    pub fn from_boxed<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        analyzer: BoxAnalyzer,
    ) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            analyzer,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Analyzer for ColumnSubsetAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        let missing: Vec<&str> = self
            .columns
            .iter()
            .map(String::as_str)
            .filter(|column| !dataset.contains(column))
            .collect();
        if !missing.is_empty() {
            return Ok(skip(
                "ColumnSubsetAnalyzer",
                format!("columns {:?} are not in the dataset", missing),
            ));
        }
        let subset = dataset.select(&self.columns)?;
        self.analyzer.analyze(&subset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::NullValueAnalyzer;
    use crate::dataset::Value;
    use serde_json::json;

    fn dataset() -> Dataset {
        Dataset::new([
            ("a", vec![Value::Null, Value::Integer(1)]),
            ("b", vec![Value::Integer(2), Value::Integer(3)]),
            ("c", vec![Value::Null, Value::Null]),
        ])
        .unwrap()
    }

    #[test]
    fn test_scopes_inner_analyzer() {
        let analyzer = ColumnSubsetAnalyzer::new(["c", "a"], NullValueAnalyzer::new());
        let stats = analyzer.analyze(&dataset()).unwrap().get_statistics();
        assert_eq!(stats["columns"], json!(["c", "a"]));
        assert_eq!(stats["null_count"], json!([2, 1]));
    }

    #[test]
    fn test_missing_column() {
        let analyzer = ColumnSubsetAnalyzer::new(["a", "z"], NullValueAnalyzer::new());
        let section = analyzer.analyze(&dataset()).unwrap();
        assert!(section.is_empty());
        assert!(section.get_statistics().is_empty());
    }
}
