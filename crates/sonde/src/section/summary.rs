//! One-line-per-column overview of a dataset.

use serde_json::json;

use super::html::{fmt_pct, join_blocks, paragraph, section_header, table};
use super::{RenderSection, Statistics};

/// Overview of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    /// Sorted value kinds, nulls excluded.
    pub kinds: Vec<String>,
    pub null_count: usize,
    pub nunique: usize,
    /// Most frequent values with their counts.
    pub most_frequent: Vec<(String, usize)>,
}

/// Overview of every column of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrameSummarySection {
    row_count: usize,
    columns: Vec<ColumnSummary>,
}

impl DataFrameSummarySection {
    pub fn new(row_count: usize, columns: Vec<ColumnSummary>) -> Self {
        Self { row_count, columns }
    }
}

impl RenderSection for DataFrameSummarySection {
    fn statistics(&self) -> Statistics {
        let mut stats = Statistics::new();
        stats.insert(
            "columns".into(),
            json!(self.columns.iter().map(|c| &c.name).collect::<Vec<_>>()),
        );
        stats.insert(
            "null_count".into(),
            json!(self.columns.iter().map(|c| c.null_count).collect::<Vec<_>>()),
        );
        stats.insert(
            "nunique".into(),
            json!(self.columns.iter().map(|c| c.nunique).collect::<Vec<_>>()),
        );
        stats.insert(
            "kinds".into(),
            json!(self.columns.iter().map(|c| &c.kinds).collect::<Vec<_>>()),
        );
        stats
    }

    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        let rows = self.columns.iter().enumerate().map(|(i, c)| {
            let frequent = c
                .most_frequent
                .iter()
                .map(|(value, count)| format!("{} ({})", value, count))
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                (i + 1).to_string(),
                c.name.clone(),
                c.kinds.join(", "),
                c.null_count.to_string(),
                fmt_pct(c.null_count, self.row_count),
                c.nunique.to_string(),
                fmt_pct(c.nunique, self.row_count),
                frequent,
            ]
        });
        join_blocks([
            section_header(number, tags, depth),
            paragraph(&format!(
                "This section shows a short summary of each column. The dataset has {} rows and {} columns.",
                self.row_count,
                self.columns.len()
            )),
            table(
                &[
                    "",
                    "column",
                    "types",
                    "null",
                    "null pct",
                    "nunique",
                    "nunique pct",
                    "most frequent values",
                ],
                rows,
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics() {
        let section = DataFrameSummarySection::new(
            3,
            vec![ColumnSummary {
                name: "a".into(),
                kinds: vec!["int".into()],
                null_count: 1,
                nunique: 2,
                most_frequent: vec![("1".into(), 2)],
            }],
        );
        assert_eq!(
            serde_json::Value::Object(section.statistics()),
            json!({"columns": ["a"], "null_count": [1], "nunique": [2], "kinds": [["int"]]})
        );
        let body = section.render_html_body("", &["summary".to_string()], 0);
        assert!(body.contains("<td>1 (2)</td>"));
    }
}
