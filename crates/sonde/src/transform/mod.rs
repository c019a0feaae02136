//! Dataset transformations applied before analysis.
//!
//! A [`Transformer`] returns a new [`Dataset`]; the input is left untouched so
//! sibling analyzers keep seeing the original data.

mod operations;

use std::fmt::Debug;

use crate::dataset::{Dataset, Value};
use crate::error::{Result, SondeError};

pub use operations::{Coerce, CoerceTarget, ConvertNa, QueryFilter, SelectColumns, Sequential, Standardize};

/// A dataset-level transformation.
pub trait Transformer: Send + Sync + Debug {
    /// Produce the transformed copy of `dataset`.
    fn transform(&self, dataset: &Dataset) -> Result<Dataset>;

    /// Human-readable summary, used in logs.
    fn description(&self) -> String;
}

impl<T: Transformer + ?Sized> Transformer for Box<T> {
    fn transform(&self, dataset: &Dataset) -> Result<Dataset> {
        (**self).transform(dataset)
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

/// Owned transformer trait object.
pub type BoxTransformer = Box<dyn Transformer>;

/// Look up a column a transformer needs.
fn required_column<'a>(dataset: &'a Dataset, column: &str) -> Result<&'a [Value]> {
    dataset
        .column(column)
        .ok_or_else(|| SondeError::Transform(format!("Column '{}' not found", column)))
}
