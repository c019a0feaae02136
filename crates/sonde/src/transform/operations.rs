//! Concrete transformers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::{Dataset, Query, Value, parse_datetime};
use crate::error::{Result, SondeError};

use super::{BoxTransformer, Transformer, required_column};

/// Replace values in a column based on a mapping.
///
/// Cells are matched on their text form; replacements are re-parsed so that
/// `"1"` becomes an integer again.
#[derive(Debug, Clone)]
pub struct Standardize {
    pub column: String,
    pub mapping: IndexMap<String, String>,
}

impl Standardize {
    pub fn new(column: impl Into<String>, mapping: IndexMap<String, String>) -> Self {
        Self {
            column: column.into(),
            mapping,
        }
    }
}

impl Transformer for Standardize {
    fn transform(&self, dataset: &Dataset) -> Result<Dataset> {
        let values = required_column(dataset, &self.column)?;
        let mut changed = 0;
        let standardized = values
            .iter()
            .map(|value| {
                if value.is_null() {
                    return Value::Null;
                }
                match self.mapping.get(&value.to_string()) {
                    Some(new_value) => {
                        changed += 1;
                        Value::parse(new_value)
                    }
                    None => value.clone(),
                }
            })
            .collect();
        debug!(column = %self.column, changed, "standardized values");
        dataset.with_column(self.column.clone(), standardized)
    }

    fn description(&self) -> String {
        let examples: Vec<String> = self
            .mapping
            .iter()
            .take(3)
            .map(|(from, to)| format!("'{}' -> '{}'", from, to))
            .collect();
        format!("Standardize '{}': {}", self.column, examples.join(", "))
    }
}

/// Convert matching values to null. Matching ignores case.
#[derive(Debug, Clone)]
pub struct ConvertNa {
    pub column: String,
    pub values: Vec<String>,
}

impl ConvertNa {
    pub fn new(column: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            column: column.into(),
            values,
        }
    }
}

impl Transformer for ConvertNa {
    fn transform(&self, dataset: &Dataset) -> Result<Dataset> {
        let values = required_column(dataset, &self.column)?;
        let patterns: Vec<String> = self.values.iter().map(|v| v.to_lowercase()).collect();
        let converted = values
            .iter()
            .map(|value| {
                let lower = value.to_string().to_lowercase();
                if !value.is_null() && patterns.contains(&lower) {
                    Value::Null
                } else {
                    value.clone()
                }
            })
            .collect();
        dataset.with_column(self.column.clone(), converted)
    }

    fn description(&self) -> String {
        format!("Convert {:?} to NA in '{}'", self.values, self.column)
    }
}

/// Target type of a coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoerceTarget {
    Float,
    Int,
    Str,
    Datetime,
}

impl CoerceTarget {
    /// Coerce one cell. Cells that cannot be converted become null.
    pub fn coerce(&self, value: &Value) -> Value {
        if value.is_null() {
            return Value::Null;
        }
        match self {
            CoerceTarget::Float => match value {
                Value::Integer(v) => Value::Float(*v as f64),
                Value::Float(v) => Value::Float(*v),
                Value::Bool(b) => Value::Float(if *b { 1.0 } else { 0.0 }),
                Value::Text(s) => s.trim().parse::<f64>().map_or(Value::Null, Value::Float),
                _ => Value::Null,
            },
            CoerceTarget::Int => match value {
                Value::Integer(v) => Value::Integer(*v),
                // Only whole numbers convert cleanly.
                Value::Float(v) if v.is_finite() && v.fract() == 0.0 => Value::Integer(*v as i64),
                Value::Bool(b) => Value::Integer(i64::from(*b)),
                Value::Text(s) => {
                    let trimmed = s.trim();
                    if let Ok(v) = trimmed.parse::<i64>() {
                        Value::Integer(v)
                    } else {
                        match trimmed.parse::<f64>() {
                            Ok(f) if f.is_finite() && f.fract() == 0.0 => Value::Integer(f as i64),
                            _ => Value::Null,
                        }
                    }
                }
                _ => Value::Null,
            },
            CoerceTarget::Str => Value::Text(value.to_string()),
            CoerceTarget::Datetime => match value {
                Value::DateTime(dt) => Value::DateTime(*dt),
                Value::Text(s) => parse_datetime(s.trim()).map_or(Value::Null, Value::DateTime),
                _ => Value::Null,
            },
        }
    }
}

/// Coerce a column to a type; non-convertible values become null.
#[derive(Debug, Clone)]
pub struct Coerce {
    pub column: String,
    pub target: CoerceTarget,
}

impl Coerce {
    pub fn new(column: impl Into<String>, target: CoerceTarget) -> Self {
        Self {
            column: column.into(),
            target,
        }
    }
}

impl Transformer for Coerce {
    fn transform(&self, dataset: &Dataset) -> Result<Dataset> {
        let values = required_column(dataset, &self.column)?;
        let coerced: Vec<Value> = values.iter().map(|v| self.target.coerce(v)).collect();
        let lost = values
            .iter()
            .zip(&coerced)
            .filter(|(before, after)| !before.is_null() && after.is_null())
            .count();
        debug!(column = %self.column, target = ?self.target, lost, "coerced column");
        dataset.with_column(self.column.clone(), coerced)
    }

    fn description(&self) -> String {
        format!("Coerce '{}' to {:?}", self.column, self.target)
    }
}

/// Keep the rows matching a query.
#[derive(Debug, Clone)]
pub struct QueryFilter {
    pub query: Query,
}

impl QueryFilter {
    pub fn new(query: &str) -> Result<Self> {
        Ok(Self {
            query: Query::parse(query)?,
        })
    }
}

impl Transformer for QueryFilter {
    fn transform(&self, dataset: &Dataset) -> Result<Dataset> {
        for column in self.query.columns() {
            required_column(dataset, column)?;
        }
        Ok(dataset.filter_rows(|data, row| self.query.matches(data, row)))
    }

    fn description(&self) -> String {
        format!("Filter rows where {}", self.query)
    }
}

/// Keep only the given columns, in the given order.
#[derive(Debug, Clone)]
pub struct SelectColumns {
    pub columns: Vec<String>,
}

impl SelectColumns {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl Transformer for SelectColumns {
    fn transform(&self, dataset: &Dataset) -> Result<Dataset> {
        dataset
            .select(&self.columns)
            .map_err(|e| SondeError::Transform(e.to_string()))
    }

    fn description(&self) -> String {
        format!("Select columns {:?}", self.columns)
    }
}

/// Apply transformers one after another.
#[derive(Debug, Default)]
pub struct Sequential {
    pub transformers: Vec<BoxTransformer>,
}

impl Sequential {
    pub fn new(transformers: Vec<BoxTransformer>) -> Self {
        Self { transformers }
    }

    pub fn with(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }
}

impl Transformer for Sequential {
    fn transform(&self, dataset: &Dataset) -> Result<Dataset> {
        let mut current = dataset.clone();
        for transformer in &self.transformers {
            debug!(transformer = %transformer.description(), "applying transformer");
            current = transformer.transform(&current)?;
        }
        Ok(current)
    }

    fn description(&self) -> String {
        let steps: Vec<String> = self.transformers.iter().map(|t| t.description()).collect();
        format!("Sequential [{}]", steps.join("; "))
    }
}
