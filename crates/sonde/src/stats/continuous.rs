//! Descriptive statistics for numeric columns.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dataset::Value;

/// Quantile levels reported for continuous columns.
pub const QUANTILES: [(&str, f64); 7] = [
    ("q01", 0.01),
    ("q05", 0.05),
    ("q25", 0.25),
    ("median", 0.5),
    ("q75", 0.75),
    ("q95", 0.95),
    ("q99", 0.99),
];

// =============================================================================
// STREAMING MOMENTS
// =============================================================================
// Welford's online algorithm, extended to the third and fourth central moments.

#[derive(Debug, Clone, Default)]
struct Moments {
    count: usize,
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl Moments {
    fn add(&mut self, value: f64) {
        let n1 = self.count as f64;
        self.count += 1;
        let n = self.count as f64;
        let delta = value - self.mean;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1;

        self.mean += delta_n;
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
    }

    /// Sample standard deviation (n - 1 denominator).
    fn std(&self) -> f64 {
        match self.count {
            0 => f64::NAN,
            1 => 0.0,
            n => (self.m2 / (n - 1) as f64).sqrt(),
        }
    }

    /// Fisher-Pearson skewness.
    fn skewness(&self) -> f64 {
        if self.count == 0 || self.m2 == 0.0 {
            return f64::NAN;
        }
        let n = self.count as f64;
        n.sqrt() * self.m3 / self.m2.powf(1.5)
    }

    /// Excess kurtosis.
    fn kurtosis(&self) -> f64 {
        if self.count == 0 || self.m2 == 0.0 {
            return f64::NAN;
        }
        let n = self.count as f64;
        n * self.m4 / (self.m2 * self.m2) - 3.0
    }
}

/// Statistics for a continuous column.
///
/// Null cells and NaN are excluded from every moment and quantile. A column
/// without any usable value yields NaN moments rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuousStats {
    pub count: usize,
    pub num_nulls: usize,
    pub num_nans: usize,
    pub nunique: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub quantiles: Vec<(String, f64)>,
    pub max: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    /// Number of non-numeric, non-null cells that were ignored.
    pub num_non_numeric: usize,
}

impl ContinuousStats {
    /// Compute statistics over a column.
    pub fn from_values(values: &[Value]) -> Self {
        let mut moments = Moments::default();
        let mut sorted = Vec::with_capacity(values.len());
        let mut unique = HashSet::new();
        let mut num_nulls = 0;
        let mut num_nans = 0;
        let mut num_non_numeric = 0;

        for value in values {
            if value.is_null() {
                num_nulls += 1;
                continue;
            }
            unique.insert(value);
            match value.as_f64() {
                Some(v) if v.is_nan() => num_nans += 1,
                Some(v) => {
                    moments.add(v);
                    sorted.push(v);
                }
                None => num_non_numeric += 1,
            }
        }

        sorted.sort_by(f64::total_cmp);
        let quantiles = QUANTILES
            .iter()
            .map(|(name, q)| (name.to_string(), quantile(&sorted, *q)))
            .collect();

        Self {
            count: values.len(),
            num_nulls,
            num_nans,
            nunique: unique.len(),
            mean: if moments.count == 0 {
                f64::NAN
            } else {
                moments.mean
            },
            std: moments.std(),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            quantiles,
            max: sorted.last().copied().unwrap_or(f64::NAN),
            skewness: moments.skewness(),
            kurtosis: moments.kurtosis(),
            num_non_numeric,
        }
    }

    /// Look up a quantile by name (`"median"`, `"q25"`, ...).
    pub fn quantile(&self, name: &str) -> Option<f64> {
        self.quantiles
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Statistics as an ordered JSON mapping. NaN becomes `null`.
    pub fn to_statistics(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("count".into(), self.count.into());
        map.insert("num_nulls".into(), self.num_nulls.into());
        map.insert("num_nans".into(), self.num_nans.into());
        map.insert("nunique".into(), self.nunique.into());
        map.insert("mean".into(), self.mean.into());
        map.insert("std".into(), self.std.into());
        map.insert("min".into(), self.min.into());
        for (name, value) in &self.quantiles {
            map.insert(name.clone(), (*value).into());
        }
        map.insert("max".into(), self.max.into());
        map.insert("skewness".into(), self.skewness.into());
        map.insert("kurtosis".into(), self.kurtosis.into());
        map.insert("num_non_numeric".into(), self.num_non_numeric.into());
        map
    }
}

/// Linear-interpolated quantile of sorted data.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            let frac = pos - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|v| Value::Integer(*v)).collect()
    }

    #[test]
    fn test_basic_moments() {
        let stats = ContinuousStats::from_values(&ints(&[1, 2, 3, 4, 5]));
        assert_eq!(stats.count, 5);
        assert_eq!(stats.nunique, 5);
        assert!((stats.mean - 3.0).abs() < 1e-12);
        assert!((stats.std - 2.5f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.quantile("median"), Some(3.0));
        assert_eq!(stats.quantile("q25"), Some(2.0));
        assert!(stats.skewness.abs() < 1e-12);
    }

    #[test]
    fn test_nulls_and_nans_are_excluded() {
        let values = vec![
            Value::Float(1.0),
            Value::Null,
            Value::Float(f64::NAN),
            Value::Float(3.0),
            Value::from("oops"),
        ];
        let stats = ContinuousStats::from_values(&values);
        assert_eq!(stats.count, 5);
        assert_eq!(stats.num_nulls, 1);
        assert_eq!(stats.num_nans, 1);
        assert_eq!(stats.num_non_numeric, 1);
        assert!((stats.mean - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_column_gives_nan() {
        let stats = ContinuousStats::from_values(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.min.is_nan());
        assert!(stats.quantile("median").unwrap().is_nan());

        let map = stats.to_statistics();
        assert_eq!(map["mean"], serde_json::Value::Null);
        assert_eq!(map["count"], serde_json::json!(0));
    }

    #[test]
    fn test_skewed_distribution() {
        let stats = ContinuousStats::from_values(&ints(&[1, 1, 1, 1, 10]));
        assert!(stats.skewness > 1.0);
    }
}
