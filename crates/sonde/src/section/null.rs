//! Null value rates per column.

use serde_json::json;

use crate::error::{Result, SondeError};

use super::html::{bar, fmt_pct, join_blocks, paragraph, section_header, table};
use super::{RenderSection, Statistics};

/// Number of missing (null or NaN) cells per column.
#[derive(Debug, Clone, PartialEq)]
pub struct NullValueSection {
    columns: Vec<String>,
    null_count: Vec<usize>,
    total_count: Vec<usize>,
}

impl NullValueSection {
    /// Build the section; the count arrays must match `columns`.
    pub fn new(
        columns: Vec<String>,
        null_count: Vec<usize>,
        total_count: Vec<usize>,
    ) -> Result<Self> {
        if null_count.len() != columns.len() {
            return Err(SondeError::shape(
                "NullValueSection.null_count",
                columns.len(),
                null_count.len(),
            ));
        }
        if total_count.len() != columns.len() {
            return Err(SondeError::shape(
                "NullValueSection.total_count",
                columns.len(),
                total_count.len(),
            ));
        }
        Ok(Self {
            columns,
            null_count,
            total_count,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl RenderSection for NullValueSection {
    fn statistics(&self) -> Statistics {
        let mut stats = Statistics::new();
        stats.insert("columns".into(), json!(self.columns));
        stats.insert("null_count".into(), json!(self.null_count));
        stats.insert("total_count".into(), json!(self.total_count));
        stats
    }

    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        let rows = self
            .columns
            .iter()
            .zip(&self.null_count)
            .zip(&self.total_count)
            .map(|((column, &nulls), &total)| {
                vec![
                    column.clone(),
                    nulls.to_string(),
                    total.to_string(),
                    fmt_pct(nulls, total),
                ]
            });

        let bars: Vec<String> = self
            .columns
            .iter()
            .zip(&self.null_count)
            .zip(&self.total_count)
            .map(|((column, &nulls), &total)| {
                let fraction = if total == 0 {
                    0.0
                } else {
                    nulls as f64 / total as f64
                };
                format!(
                    "<div class=\"bar-row\"><span>{}</span>{}</div>",
                    html_escape::encode_text(column),
                    bar(fraction)
                )
            })
            .collect();

        join_blocks([
            section_header(number, tags, depth),
            paragraph(&format!(
                "This section analyzes the number and proportion of missing values for the {} columns.",
                self.columns.len()
            )),
            table(&["column", "null", "total", "null pct"], rows),
            bars.join("\n"),
        ])
    }
}
