//! Distribution of a continuous column.

use serde_json::json;

use crate::error::{Result, SondeError};
use crate::stats::ContinuousStats;

use super::html::{
    bar, fmt_float, join_blocks, paragraph, raw_table, section_header, table, text,
};
use super::{RenderSection, Statistics};

/// Equal-width histogram: `counts[i]` falls in `[edges[i], edges[i + 1])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin finite values into `bins` equal-width buckets.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Self {
                edges: Vec::new(),
                counts: Vec::new(),
            };
        }
        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            return Self {
                edges: vec![min, max],
                counts: vec![finite.len()],
            };
        }
        let width = (max - min) / bins as f64;
        let edges = (0..=bins).map(|i| min + width * i as f64).collect();
        let mut counts = vec![0; bins];
        for v in finite {
            let index = (((v - min) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }
        Self { edges, counts }
    }
}

/// Summary statistics and histogram of one numeric column.
#[derive(Debug, Clone)]
pub struct ColumnContinuousSection {
    column: String,
    stats: ContinuousStats,
    histogram: Histogram,
}

impl ColumnContinuousSection {
    /// The histogram must have one more edge than counts (or be empty).
    pub fn new(
        column: impl Into<String>,
        stats: ContinuousStats,
        histogram: Histogram,
    ) -> Result<Self> {
        let column = column.into();
        let expected_edges = if histogram.counts.is_empty() {
            0
        } else {
            histogram.counts.len() + 1
        };
        if histogram.edges.len() != expected_edges {
            return Err(SondeError::shape(
                &format!("ColumnContinuousSection('{}').edges", column),
                expected_edges,
                histogram.edges.len(),
            ));
        }
        Ok(Self {
            column,
            stats,
            histogram,
        })
    }

    pub fn stats(&self) -> &ContinuousStats {
        &self.stats
    }
}

impl RenderSection for ColumnContinuousSection {
    fn statistics(&self) -> Statistics {
        let mut stats = self.stats.to_statistics();
        stats.insert("histogram".into(), json!({
            "edges": self.histogram.edges.iter().map(|e| json!(e)).collect::<Vec<_>>(),
            "counts": self.histogram.counts,
        }));
        stats
    }

    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        let s = &self.stats;
        let mut summary = vec![
            vec!["count".to_string(), s.count.to_string()],
            vec!["null values".to_string(), s.num_nulls.to_string()],
            vec!["NaN values".to_string(), s.num_nans.to_string()],
            vec!["unique values".to_string(), s.nunique.to_string()],
            vec!["mean".to_string(), fmt_float(s.mean)],
            vec!["std".to_string(), fmt_float(s.std)],
            vec!["skewness".to_string(), fmt_float(s.skewness)],
            vec!["kurtosis".to_string(), fmt_float(s.kurtosis)],
            vec!["min".to_string(), fmt_float(s.min)],
        ];
        summary.extend(
            s.quantiles
                .iter()
                .map(|(name, value)| vec![name.clone(), fmt_float(*value)]),
        );
        summary.push(vec!["max".to_string(), fmt_float(s.max)]);

        let peak = self.histogram.counts.iter().copied().max().unwrap_or(0);
        let bins = self
            .histogram
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let fraction = if peak == 0 {
                    0.0
                } else {
                    count as f64 / peak as f64
                };
                vec![
                    text(&format!(
                        "[{}, {})",
                        fmt_float(self.histogram.edges[i]),
                        fmt_float(self.histogram.edges[i + 1])
                    )),
                    count.to_string(),
                    bar(fraction),
                ]
            });

        let mut parts = vec![
            section_header(number, tags, depth),
            paragraph(&format!(
                "This section analyzes the distribution of values for column {}.",
                self.column
            )),
        ];
        if s.num_non_numeric > 0 {
            parts.push(paragraph(&format!(
                "{} non-numeric values were ignored.",
                s.num_non_numeric
            )));
        }
        parts.push(table(&["stat", "value"], summary));
        if !self.histogram.counts.is_empty() {
            parts.push(raw_table(&["bin", "count", ""], bins));
        }
        join_blocks(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;

    #[test]
    fn test_histogram() {
        let hist = Histogram::from_values(&[0.0, 1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(hist.edges, vec![0.0, 2.0, 4.0]);
        assert_eq!(hist.counts, vec![2, 3]);

        let flat = Histogram::from_values(&[5.0, 5.0], 10);
        assert_eq!(flat.counts, vec![2]);

        assert!(Histogram::from_values(&[], 10).counts.is_empty());
    }

    #[test]
    fn test_shape_mismatch() {
        let stats = ContinuousStats::from_values(&[Value::Integer(1)]);
        let histogram = Histogram {
            edges: vec![0.0, 1.0],
            counts: vec![1, 2],
        };
        assert!(matches!(
            ColumnContinuousSection::new("x", stats, histogram),
            Err(SondeError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_statistics_include_histogram() {
        let values = vec![Value::Integer(1), Value::Integer(3)];
        let stats = ContinuousStats::from_values(&values);
        let histogram = Histogram::from_values(&[1.0, 3.0], 2);
        let section = ColumnContinuousSection::new("x", stats, histogram).unwrap();
        let stats = section.statistics();
        assert_eq!(stats["mean"], json!(2.0));
        assert_eq!(stats["histogram"]["counts"], json!([1, 1]));
    }
}
