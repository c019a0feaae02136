//! Run named analyzers on the same dataset.

use indexmap::IndexMap;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::{Section, SectionDict};

use super::{Analyzer, BoxAnalyzer};

/// Runs every child analyzer, in insertion order, on the same dataset.
///
/// The result is a [`SectionDict`] whose keys are exactly the child names.
#[derive(Debug, Default)]
pub struct MappingAnalyzer {
    analyzers: IndexMap<String, BoxAnalyzer>,
    max_toc_depth: Option<usize>,
}

impl MappingAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an existing mapping.
    pub fn from_analyzers(analyzers: IndexMap<String, BoxAnalyzer>) -> Self {
        Self {
            analyzers,
            max_toc_depth: None,
        }
    }

    /// Add a named child. A child with the same name is replaced in place.
    pub fn with(mut self, name: impl Into<String>, analyzer: impl Analyzer + 'static) -> Self {
        self.analyzers.insert(name.into(), Box::new(analyzer));
        self
    }

    /// Limit how many levels of descendants are listed in the table of contents.
    pub fn with_max_toc_depth(mut self, max_toc_depth: Option<usize>) -> Self {
        self.max_toc_depth = max_toc_depth;
        self
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

impl Analyzer for MappingAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        let mut sections = IndexMap::with_capacity(self.analyzers.len());
        for (name, analyzer) in &self.analyzers {
            debug!(analyzer = %name, "running analyzer");
            sections.insert(name.clone(), analyzer.analyze(dataset)?);
        }
        Ok(Section::Dict(
            SectionDict::new(sections).with_max_toc_depth(self.max_toc_depth),
        ))
    }
}
