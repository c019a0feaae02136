//! Null value rates over time.

use serde_json::json;

use crate::error::{Result, SondeError};
use crate::stats::TemporalPeriod;

use super::html::{bar, fmt_pct, join_blocks, paragraph, raw_table, section_header, text};
use super::{RenderSection, Statistics};

/// Missing values of one column, grouped by the period of a datetime column.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalNullValueSection {
    column: String,
    dt_column: String,
    period: TemporalPeriod,
    periods: Vec<String>,
    null_count: Vec<usize>,
    total_count: Vec<usize>,
}

impl TemporalNullValueSection {
    /// The count arrays must match `periods`.
    pub fn new(
        column: impl Into<String>,
        dt_column: impl Into<String>,
        period: TemporalPeriod,
        periods: Vec<String>,
        null_count: Vec<usize>,
        total_count: Vec<usize>,
    ) -> Result<Self> {
        for (name, len) in [("null_count", null_count.len()), ("total_count", total_count.len())] {
            if len != periods.len() {
                return Err(SondeError::shape(
                    &format!("TemporalNullValueSection.{}", name),
                    periods.len(),
                    len,
                ));
            }
        }
        Ok(Self {
            column: column.into(),
            dt_column: dt_column.into(),
            period,
            periods,
            null_count,
            total_count,
        })
    }
}

impl RenderSection for TemporalNullValueSection {
    fn statistics(&self) -> Statistics {
        let mut stats = Statistics::new();
        stats.insert("periods".into(), json!(self.periods));
        stats.insert("null_count".into(), json!(self.null_count));
        stats.insert("total_count".into(), json!(self.total_count));
        stats
    }

    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        let rows = self
            .periods
            .iter()
            .zip(&self.null_count)
            .zip(&self.total_count)
            .map(|((period, &nulls), &total)| {
                let fraction = if total == 0 {
                    0.0
                } else {
                    nulls as f64 / total as f64
                };
                vec![
                    text(period),
                    nulls.to_string(),
                    total.to_string(),
                    fmt_pct(nulls, total),
                    bar(fraction),
                ]
            });
        let period = self.period.to_string();

        join_blocks([
            section_header(number, tags, depth),
            paragraph(&format!(
                "This section analyzes the temporal distribution of missing values in column {}. \
                 The column {} is used as the temporal column, grouped by {}.",
                self.column, self.dt_column, self.period
            )),
            raw_table(&[period.as_str(), "null", "total", "null pct", ""], rows),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch() {
        let result = TemporalNullValueSection::new(
            "a",
            "date",
            TemporalPeriod::Month,
            vec!["2024-01".into()],
            vec![1, 2],
            vec![3],
        );
        assert!(matches!(result, Err(SondeError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_statistics() {
        let section = TemporalNullValueSection::new(
            "a",
            "date",
            TemporalPeriod::Month,
            vec!["2024-01".into(), "2024-02".into()],
            vec![1, 0],
            vec![2, 3],
        )
        .unwrap();
        assert_eq!(
            serde_json::Value::Object(section.statistics()),
            json!({
                "periods": ["2024-01", "2024-02"],
                "null_count": [1, 0],
                "total_count": [2, 3],
            })
        );
    }
}
