use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::{ContentSection, Section};

use super::Analyzer;

/// Inserts a fixed HTML snippet into the report.
#[derive(Debug, Clone)]
pub struct ContentAnalyzer {
    content: String,
}

impl ContentAnalyzer {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Analyzer for ContentAnalyzer {
    fn analyze(&self, _dataset: &Dataset) -> Result<Section> {
        Ok(ContentSection::new(self.content.clone()).into())
    }
}
