//! Ready-made selection functions for [`ChoiceAnalyzer`](super::ChoiceAnalyzer).

use std::sync::Arc;

use crate::dataset::{Dataset, Value};

use super::choice::SelectionFn;

pub const CONTINUOUS: &str = "continuous";
pub const DISCRETE: &str = "discrete";
pub const TEMPORAL: &str = "temporal";
pub const MISSING: &str = "missing";

/// Classify a column from its non-null values.
///
/// All numeric gives `"continuous"`, all datetime gives `"temporal"`, an
/// absent column gives `"missing"`. Everything else, including a column with
/// only nulls, is `"discrete"`.
pub fn column_kind(dataset: &Dataset, column: &str) -> &'static str {
    let Some(values) = dataset.column(column) else {
        return MISSING;
    };
    let mut present = values.iter().filter(|v| !v.is_null()).peekable();
    if present.peek().is_none() {
        return DISCRETE;
    }
    let mut numeric = true;
    let mut temporal = true;
    for value in present {
        numeric &= matches!(value, Value::Integer(_) | Value::Float(_));
        temporal &= matches!(value, Value::DateTime(_));
        if !numeric && !temporal {
            return DISCRETE;
        }
    }
    if numeric { CONTINUOUS } else { TEMPORAL }
}

/// Selection on [`column_kind`].
pub fn by_column_kind(column: impl Into<String>) -> SelectionFn {
    let column = column.into();
    Arc::new(move |dataset: &Dataset| column_kind(dataset, &column).to_string())
}

/// `"small"` below `threshold` rows, `"large"` otherwise.
pub fn by_row_count(threshold: usize) -> SelectionFn {
    Arc::new(move |dataset: &Dataset| {
        if dataset.row_count() < threshold {
            "small".to_string()
        } else {
            "large".to_string()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new([
            ("n", vec![Value::Integer(1), Value::Float(2.5), Value::Null]),
            ("t", vec![Value::parse("2024-01-01"), Value::Null, Value::Null]),
            ("s", vec![Value::from("a"), Value::Integer(1), Value::Null]),
            ("e", vec![Value::Null, Value::Null, Value::Null]),
        ])
        .unwrap()
    }

    #[test]
    fn test_column_kind() {
        let data = dataset();
        assert_eq!(column_kind(&data, "n"), CONTINUOUS);
        assert_eq!(column_kind(&data, "t"), TEMPORAL);
        assert_eq!(column_kind(&data, "s"), DISCRETE);
        assert_eq!(column_kind(&data, "e"), DISCRETE);
        assert_eq!(column_kind(&data, "z"), MISSING);
    }

    #[test]
    fn test_row_count() {
        let select = by_row_count(3);
        assert_eq!(select(&dataset()), "large");
        let select = by_row_count(10);
        assert_eq!(select(&dataset()), "small");
    }
}
