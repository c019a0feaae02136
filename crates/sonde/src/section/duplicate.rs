//! Duplicated rows.

use serde_json::json;

use crate::error::{Result, SondeError};

use super::html::{fmt_pct, join_blocks, paragraph, section_header, table};
use super::{RenderSection, Statistics};

/// Count of rows versus distinct rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatedRowSection {
    num_rows: usize,
    num_unique_rows: usize,
    columns: Option<Vec<String>>,
}

impl DuplicatedRowSection {
    /// `columns` names the subset rows were compared on, if not all.
    pub fn new(num_rows: usize, num_unique_rows: usize, columns: Option<Vec<String>>) -> Result<Self> {
        if num_unique_rows > num_rows {
            return Err(SondeError::shape(
                "DuplicatedRowSection.num_unique_rows",
                num_rows,
                num_unique_rows,
            ));
        }
        Ok(Self {
            num_rows,
            num_unique_rows,
            columns,
        })
    }

    pub fn num_duplicated_rows(&self) -> usize {
        self.num_rows - self.num_unique_rows
    }
}

impl RenderSection for DuplicatedRowSection {
    fn statistics(&self) -> Statistics {
        let mut stats = Statistics::new();
        stats.insert("num_rows".into(), json!(self.num_rows));
        stats.insert("num_unique_rows".into(), json!(self.num_unique_rows));
        stats
    }

    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        let scope = match &self.columns {
            Some(columns) => format!("the columns {}", columns.join(", ")),
            None => "all the columns".to_string(),
        };
        let duplicated = self.num_duplicated_rows();
        join_blocks([
            section_header(number, tags, depth),
            paragraph(&format!(
                "This section shows the number of duplicated rows, comparing {}.",
                scope
            )),
            table(
                &["", "num rows", "pct"],
                vec![
                    vec![
                        "unique".to_string(),
                        self.num_unique_rows.to_string(),
                        fmt_pct(self.num_unique_rows, self.num_rows),
                    ],
                    vec![
                        "duplicated".to_string(),
                        duplicated.to_string(),
                        fmt_pct(duplicated, self.num_rows),
                    ],
                    vec![
                        "total".to_string(),
                        self.num_rows.to_string(),
                        fmt_pct(self.num_rows, self.num_rows),
                    ],
                ],
            ),
        ])
    }
}
