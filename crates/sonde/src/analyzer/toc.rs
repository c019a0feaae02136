//! Keep a section visible in the table of contents.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::{Section, TableOfContentSection};

use super::{Analyzer, BoxAnalyzer};

/// Wraps the inner analyzer's section so its own entry always appears in the
/// table of contents, whatever the depth cutoff.
///
/// Statistics and body are those of the inner section. `max_toc_depth`
/// optionally limits how many levels of the inner section's children are
/// listed.
#[derive(Debug)]
pub struct TableOfContentAnalyzer {
    analyzer: BoxAnalyzer,
    max_toc_depth: Option<usize>,
}

impl TableOfContentAnalyzer {
    pub fn new(analyzer: impl Analyzer + 'static) -> Self {
        Self::from_boxed(Box::new(analyzer))
    }

    pub fn from_boxed(analyzer: BoxAnalyzer) -> Self {
        Self {
            analyzer,
            max_toc_depth: None,
        }
    }

    pub fn with_max_toc_depth(mut self, max_toc_depth: Option<usize>) -> Self {
        self.max_toc_depth = max_toc_depth;
        self
    }
}

impl Analyzer for TableOfContentAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        let section = self.analyzer.analyze(dataset)?;
        Ok(Section::TableOfContent(TableOfContentSection::new(
            section,
            self.max_toc_depth,
        )))
    }
}
