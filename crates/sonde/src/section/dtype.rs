//! Value types observed per column.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::json;

use super::html::{join_blocks, paragraph, section_header, table};
use super::{RenderSection, Statistics};

/// Set of value kinds (`int`, `str`, ...) seen in each column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTypeSection {
    types: IndexMap<String, BTreeSet<String>>,
}

impl DataTypeSection {
    pub fn new(types: IndexMap<String, BTreeSet<String>>) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &IndexMap<String, BTreeSet<String>> {
        &self.types
    }
}

impl RenderSection for DataTypeSection {
    fn statistics(&self) -> Statistics {
        self.types
            .iter()
            .map(|(column, kinds)| (column.clone(), json!(kinds)))
            .collect()
    }

    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        let rows = self.types.iter().enumerate().map(|(i, (column, kinds))| {
            vec![
                (i + 1).to_string(),
                column.clone(),
                kinds.iter().cloned().collect::<Vec<_>>().join(", "),
                if kinds.len() > 1 { "mixed" } else { "" }.to_string(),
            ]
        });
        join_blocks([
            section_header(number, tags, depth),
            paragraph(
                "This section analyzes the value types in each column. \
                 A column with more than one type (excluding null) may need cleaning.",
            ),
            table(&["", "column", "types", ""], rows),
        ])
    }
}
