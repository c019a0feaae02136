//! Analyze a transformed copy of the dataset.

use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::Section;
use crate::transform::{BoxTransformer, Transformer};

use super::{Analyzer, BoxAnalyzer};

/// Applies a [`Transformer`], then runs the inner analyzer on the result.
#[derive(Debug)]
pub struct TransformAnalyzer {
    transformer: BoxTransformer,
    analyzer: BoxAnalyzer,
}

impl TransformAnalyzer {
    pub fn new(transformer: impl Transformer + 'static, analyzer: impl Analyzer + 'static) -> Self {
        Self::from_boxed(Box::new(transformer), Box::new(analyzer))
    }

    pub fn from_boxed(transformer: BoxTransformer, analyzer: BoxAnalyzer) -> Self {
        Self {
            transformer,
            analyzer,
        }
    }
}

impl Analyzer for TransformAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        debug!(transformer = %self.transformer.description(), "transforming dataset");
        let transformed = self.transformer.transform(dataset)?;
        self.analyzer.analyze(&transformed)
    }
}
