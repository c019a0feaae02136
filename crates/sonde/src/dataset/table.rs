//! The immutable dataset handle consumed by analyzers.

use indexmap::IndexMap;

use crate::error::{Result, SondeError};

use super::value::Value;

/// Column-major tabular data.
///
/// A `Dataset` is never modified once built. Projections, row filters and
/// column replacements all return a new `Dataset`, so sibling analyzers that
/// still hold the original keep seeing the data they were given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: IndexMap<String, Vec<Value>>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from named columns.
    ///
    /// All columns must have the same length.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let mut map = IndexMap::new();
        let mut row_count = None;
        for (name, values) in columns {
            let name = name.into();
            let expected = *row_count.get_or_insert(values.len());
            if values.len() != expected {
                return Err(SondeError::shape(
                    &format!("column '{}'", name),
                    expected,
                    values.len(),
                ));
            }
            if map.insert(name.clone(), values).is_some() {
                return Err(SondeError::Config(format!("duplicate column '{}'", name)));
            }
        }
        Ok(Self {
            columns: map,
            row_count: row_count.unwrap_or(0),
        })
    }

    /// Build a dataset from row-major values.
    ///
    /// Short rows are padded with nulls, long rows are truncated.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut columns: Vec<Vec<Value>> = headers
            .iter()
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();
        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.push(cells.next().unwrap_or(Value::Null));
            }
        }
        Self::new(headers.into_iter().zip(columns))
    }

    /// Check whether a column exists.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// Iterate over `(name, values)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Get all column names, in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.columns.get(column).and_then(|values| values.get(row))
    }

    /// Get one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.values().map(|values| &values[index]).collect())
    }

    /// Project onto a subset of columns, in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Dataset> {
        let mut columns = IndexMap::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let values = self
                .columns
                .get(name)
                .ok_or_else(|| SondeError::Config(format!("unknown column '{}'", name)))?;
            columns.insert(name.to_string(), values.clone());
        }
        Ok(Dataset {
            columns,
            row_count: self.row_count,
        })
    }

    /// Keep the rows for which `predicate(self, row)` is true.
    pub fn filter_rows<F>(&self, predicate: F) -> Dataset
    where
        F: Fn(&Dataset, usize) -> bool,
    {
        let keep: Vec<usize> = (0..self.row_count)
            .filter(|&row| predicate(self, row))
            .collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let kept = keep.iter().map(|&row| values[row].clone()).collect();
                (name.clone(), kept)
            })
            .collect();
        Dataset {
            columns,
            row_count: keep.len(),
        }
    }

    /// Return a copy with one column added or replaced.
    pub fn with_column(&self, name: impl Into<String>, values: Vec<Value>) -> Result<Dataset> {
        let name = name.into();
        if !self.columns.is_empty() && values.len() != self.row_count {
            return Err(SondeError::shape(
                &format!("column '{}'", name),
                self.row_count,
                values.len(),
            ));
        }
        let row_count = values.len();
        let mut columns = self.columns.clone();
        columns.insert(name, values);
        Ok(Dataset { columns, row_count })
    }
}
