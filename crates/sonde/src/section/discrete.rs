//! Distribution of a discrete column.

use serde_json::json;

use crate::dataset::Value;
use crate::error::{Result, SondeError};

use super::html::{bar, fmt_pct, join_blocks, paragraph, raw_table, section_header, text};
use super::{RenderSection, Statistics};

/// Value counts of one column, most frequent first.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDiscreteSection {
    column: String,
    values: Vec<Value>,
    counts: Vec<usize>,
    total: usize,
    dropna: bool,
    max_rows: usize,
}

impl ColumnDiscreteSection {
    /// `values` and `counts` must have the same length.
    pub fn new(
        column: impl Into<String>,
        values: Vec<Value>,
        counts: Vec<usize>,
        dropna: bool,
        max_rows: usize,
    ) -> Result<Self> {
        let column = column.into();
        if values.len() != counts.len() {
            return Err(SondeError::shape(
                &format!("ColumnDiscreteSection('{}').counts", column),
                values.len(),
                counts.len(),
            ));
        }
        let total = counts.iter().sum();
        Ok(Self {
            column,
            values,
            counts,
            total,
            dropna,
            max_rows,
        })
    }

    pub fn nunique(&self) -> usize {
        self.values.len()
    }
}

impl RenderSection for ColumnDiscreteSection {
    fn statistics(&self) -> Statistics {
        let most_common: Vec<serde_json::Value> = self
            .values
            .iter()
            .zip(&self.counts)
            .map(|(value, count)| json!([value.to_json(), count]))
            .collect();
        let mut stats = Statistics::new();
        stats.insert("most_common".into(), serde_json::Value::Array(most_common));
        stats.insert("nunique".into(), json!(self.nunique()));
        stats.insert("total".into(), json!(self.total));
        stats
    }

    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        let max_count = self.counts.first().copied().unwrap_or(0);
        let shown = self.values.len().min(self.max_rows);
        let rows = self
            .values
            .iter()
            .zip(&self.counts)
            .take(self.max_rows)
            .map(|(value, &count)| {
                let fraction = if max_count == 0 {
                    0.0
                } else {
                    count as f64 / max_count as f64
                };
                vec![
                    text(&value.to_string()),
                    count.to_string(),
                    fmt_pct(count, self.total),
                    bar(fraction),
                ]
            });

        join_blocks([
            section_header(number, tags, depth),
            paragraph(&format!(
                "This section analyzes the discrete distribution of values for column {}. \
                 Total values: {}. Number of unique values: {}. Null values {}.",
                self.column,
                self.total,
                self.nunique(),
                if self.dropna { "are ignored" } else { "are counted" },
            )),
            paragraph(&format!("Showing the {} most frequent values.", shown)),
            raw_table(&["value", "count", "pct", ""], rows),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> ColumnDiscreteSection {
        ColumnDiscreteSection::new(
            "city",
            vec!["Paris".into(), "Lyon".into()],
            vec![3, 1],
            true,
            10,
        )
        .unwrap()
    }

    #[test]
    fn test_statistics() {
        assert_eq!(
            serde_json::Value::Object(section().statistics()),
            json!({"most_common": [["Paris", 3], ["Lyon", 1]], "nunique": 2, "total": 4})
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let result = ColumnDiscreteSection::new("c", vec!["a".into()], vec![1, 2], true, 10);
        assert!(matches!(result, Err(SondeError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_body_renders_bars() {
        let body = section().render_html_body("1.", &["city".to_string()], 1);
        assert!(body.contains("<td>Paris</td><td>3</td><td>75.00 %</td>"));
        assert!(body.contains("<div class=\"bar-fill\" style=\"width: 100.0%;\"></div></div>"));
    }
}
