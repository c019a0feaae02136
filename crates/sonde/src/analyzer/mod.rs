//! Analyzers: steps that turn a dataset into a section.
//!
//! Leaf analyzers compute statistics over one or more columns. Combinators
//! compose other analyzers:
//!
//! - [`MappingAnalyzer`]: run named children on the same data
//! - [`ChoiceAnalyzer`]: run exactly one child picked from the data
//! - [`FilteredAnalyzer`]: run a child on the rows matching a query
//! - [`TransformAnalyzer`]: run a child on transformed data
//! - [`ColumnSubsetAnalyzer`]: run a child on a column projection
//! - [`TableOfContentAnalyzer`]: keep a child visible in navigation
//!
//! # Example
//!
//! ```
//! use sonde::analyzer::{DuplicatedRowAnalyzer, MappingAnalyzer, NullValueAnalyzer};
//! use sonde::{Analyzer, Dataset, Value};
//!
//! let dataset = Dataset::new([("a", vec![Value::Integer(1), Value::Null])]).unwrap();
//! let analyzer = MappingAnalyzer::new()
//!     .with("null", NullValueAnalyzer::new())
//!     .with("duplicate", DuplicatedRowAnalyzer::new());
//!
//! let section = analyzer.analyze(&dataset).unwrap();
//! let stats = section.get_statistics();
//! assert_eq!(stats.keys().collect::<Vec<_>>(), vec!["null", "duplicate"]);
//! ```

mod choice;
mod column_subset;
mod content;
mod continuous;
mod discrete;
mod dtype;
mod duplicate;
mod filtered;
mod mapping;
mod null;
pub mod selector;
mod summary;
mod temporal;
mod toc;
mod transform;

use std::fmt::Debug;

use tracing::info;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::Section;

pub use choice::{ChoiceAnalyzer, SelectionFn};
pub use column_subset::ColumnSubsetAnalyzer;
pub use content::ContentAnalyzer;
pub use continuous::ColumnContinuousAnalyzer;
pub use discrete::ColumnDiscreteAnalyzer;
pub use dtype::DataTypeAnalyzer;
pub use duplicate::DuplicatedRowAnalyzer;
pub use filtered::FilteredAnalyzer;
pub use mapping::MappingAnalyzer;
pub use null::NullValueAnalyzer;
pub use summary::DataFrameSummaryAnalyzer;
pub use temporal::ColumnTemporalNullValueAnalyzer;
pub use toc::TableOfContentAnalyzer;
pub use transform::TransformAnalyzer;

/// A step that analyzes a dataset and produces a [`Section`].
///
/// Implementations never modify the dataset and can be called any number of
/// times. When a precondition that depends on the data does not hold (a
/// column is absent, two required columns are the same), they return
/// [`Section::Empty`] instead of an error. Errors are reserved for
/// configuration mistakes and internal inconsistencies, and abort the run.
pub trait Analyzer: Send + Sync + Debug {
    /// Analyze the dataset.
    fn analyze(&self, dataset: &Dataset) -> Result<Section>;
}

impl<A: Analyzer + ?Sized> Analyzer for Box<A> {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        (**self).analyze(dataset)
    }
}

/// Owned analyzer trait object, as held by combinators.
pub type BoxAnalyzer = Box<dyn Analyzer>;

/// Log a skipped analysis and return the empty section.
pub(crate) fn skip(analyzer: &str, reason: impl AsRef<str>) -> Section {
    info!(analyzer, reason = reason.as_ref(), "skipping analysis");
    Section::empty()
}

/// Return the empty section if `column` is absent from the dataset.
pub(crate) fn require_column(
    analyzer: &str,
    dataset: &Dataset,
    column: &str,
) -> Option<Section> {
    if dataset.contains(column) {
        None
    } else {
        Some(skip(
            analyzer,
            format!("column '{}' is not in the dataset", column),
        ))
    }
}
