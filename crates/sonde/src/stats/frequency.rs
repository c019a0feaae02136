//! Frequency counts and duplicate detection.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::dataset::{Dataset, Value};

/// Count occurrences of each distinct value.
///
/// Sorted by descending count; ties keep first-seen order.
pub fn value_counts(values: &[Value], dropna: bool) -> Vec<(Value, usize)> {
    let mut counts: IndexMap<&Value, usize> = IndexMap::new();
    for value in values {
        if dropna && value.is_missing() {
            continue;
        }
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut counts: Vec<(Value, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.clone(), count))
        .collect();
    // Stable sort keeps insertion order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Number of distinct rows over the given columns.
///
/// Rows are compared cell by cell; two null cells are equal.
pub fn unique_row_count<S: AsRef<str>>(dataset: &Dataset, columns: &[S]) -> usize {
    let selected: Vec<&[Value]> = columns
        .iter()
        .filter_map(|name| dataset.column(name.as_ref()))
        .collect();
    let mut seen: HashSet<Vec<&Value>> = HashSet::with_capacity(dataset.row_count());
    for row in 0..dataset.row_count() {
        seen.insert(selected.iter().map(|column| &column[row]).collect());
    }
    seen.len()
}

/// Count missing cells (null or NaN).
pub fn null_count(values: &[Value]) -> usize {
    values.iter().filter(|v| v.is_missing()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_counts_order() {
        let values: Vec<Value> = ["b", "a", "b", "c", "a", "b"]
            .iter()
            .map(|s| Value::from(*s))
            .collect();
        let counts = value_counts(&values, true);
        assert_eq!(
            counts,
            vec![
                (Value::from("b"), 3),
                (Value::from("a"), 2),
                (Value::from("c"), 1)
            ]
        );
    }

    #[test]
    fn test_value_counts_dropna() {
        let values = vec![Value::Null, Value::Integer(1), Value::Null];
        assert_eq!(value_counts(&values, true), vec![(Value::Integer(1), 1)]);
        assert_eq!(
            value_counts(&values, false),
            vec![(Value::Null, 2), (Value::Integer(1), 1)]
        );
    }

    #[test]
    fn test_unique_rows() {
        let ds = Dataset::new([
            ("a", vec![Value::Integer(1), Value::Integer(1), Value::Integer(2)]),
            ("b", vec![Value::Null, Value::Null, Value::Null]),
        ])
        .unwrap();
        assert_eq!(unique_row_count(&ds, &ds.column_names()), 2);
        assert_eq!(unique_row_count(&ds, &["b"]), 1);
    }
}
