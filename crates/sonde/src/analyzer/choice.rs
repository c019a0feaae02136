//! Run one of several analyzers, picked from the data.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{Result, SondeError};
use crate::section::Section;

use super::{Analyzer, BoxAnalyzer};

/// Picks the name of the branch to run.
pub type SelectionFn = Arc<dyn Fn(&Dataset) -> String + Send + Sync>;

/// Runs the single branch whose name is returned by the selection function.
///
/// Branches that are not selected are never evaluated. A selected name with
/// no registered branch is a configuration error.
pub struct ChoiceAnalyzer {
    analyzers: IndexMap<String, BoxAnalyzer>,
    selection_fn: SelectionFn,
}

impl ChoiceAnalyzer {
    pub fn new<F>(selection_fn: F) -> Self
    where
        F: Fn(&Dataset) -> String + Send + Sync + 'static,
    {
        Self::with_selection(Arc::new(selection_fn))
    }

    pub fn with_selection(selection_fn: SelectionFn) -> Self {
        Self {
            analyzers: IndexMap::new(),
            selection_fn,
        }
    }

    /// Register a branch.
    pub fn with(mut self, name: impl Into<String>, analyzer: impl Analyzer + 'static) -> Self {
        self.analyzers.insert(name.into(), Box::new(analyzer));
        self
    }

    /// Register an already boxed branch.
    pub fn insert(&mut self, name: impl Into<String>, analyzer: BoxAnalyzer) {
        self.analyzers.insert(name.into(), analyzer);
    }

    /// Names of the registered branches.
    pub fn choices(&self) -> Vec<&str> {
        self.analyzers.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for ChoiceAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChoiceAnalyzer")
            .field("analyzers", &self.analyzers)
            .finish_non_exhaustive()
    }
}

impl Analyzer for ChoiceAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        let key = (self.selection_fn)(dataset);
        let analyzer = self
            .analyzers
            .get(&key)
            .ok_or_else(|| SondeError::UnknownChoice {
                key: key.clone(),
                available: self.analyzers.keys().cloned().collect(),
            })?;
        debug!(choice = %key, "selected analyzer");
        analyzer.analyze(dataset)
    }
}
