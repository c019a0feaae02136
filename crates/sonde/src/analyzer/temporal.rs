use std::collections::BTreeMap;

use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::section::{Section, TemporalNullValueSection};
use crate::stats::TemporalPeriod;

use super::{Analyzer, require_column, skip};

/// Missing values of a column grouped by the period of a datetime column.
///
/// Rows whose datetime cell is null or not a datetime are not counted.
#[derive(Debug, Clone)]
pub struct ColumnTemporalNullValueAnalyzer {
    column: String,
    dt_column: String,
    period: TemporalPeriod,
}

impl ColumnTemporalNullValueAnalyzer {
    pub fn new(column: impl Into<String>, dt_column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            dt_column: dt_column.into(),
            period: TemporalPeriod::default(),
        }
    }

    pub fn with_period(mut self, period: TemporalPeriod) -> Self {
        self.period = period;
        self
    }
}

impl Analyzer for ColumnTemporalNullValueAnalyzer {
    fn analyze(&self, dataset: &Dataset) -> Result<Section> {
        const NAME: &str = "ColumnTemporalNullValueAnalyzer";
        if let Some(empty) = require_column(NAME, dataset, &self.column) {
            return Ok(empty);
        }
        if let Some(empty) = require_column(NAME, dataset, &self.dt_column) {
            return Ok(empty);
        }
        if self.column == self.dt_column {
            return Ok(skip(
                NAME,
                format!(
                    "the analyzed column and the datetime column are both '{}'",
                    self.column
                ),
            ));
        }
        debug!(column = %self.column, dt_column = %self.dt_column, period = %self.period, "analyzing temporal null values");

        let values = dataset.column(&self.column).unwrap_or_default();
        let times = dataset.column(&self.dt_column).unwrap_or_default();

        // Period keys sort chronologically.
        let mut groups: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for (value, time) in values.iter().zip(times) {
            let Some(dt) = time.as_datetime() else {
                continue;
            };
            let entry = groups.entry(self.period.key(&dt)).or_default();
            if value.is_missing() {
                entry.0 += 1;
            }
            entry.1 += 1;
        }

        let mut periods = Vec::with_capacity(groups.len());
        let mut null_count = Vec::with_capacity(groups.len());
        let mut total_count = Vec::with_capacity(groups.len());
        for (period, (nulls, total)) in groups {
            periods.push(period);
            null_count.push(nulls);
            total_count.push(total);
        }
        Ok(TemporalNullValueSection::new(
            self.column.clone(),
            self.dt_column.clone(),
            self.period,
            periods,
            null_count,
            total_count,
        )?
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use serde_json::json;

    fn dataset() -> Dataset {
        Dataset::new([
            (
                "value",
                vec![Value::Null, Value::Integer(1), Value::Integer(2), Value::Null],
            ),
            (
                "date",
                vec![
                    Value::parse("2024-02-01"),
                    Value::parse("2024-01-15"),
                    Value::parse("2024-01-20"),
                    Value::Null,
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_monthly() {
        let stats = ColumnTemporalNullValueAnalyzer::new("value", "date")
            .analyze(&dataset())
            .unwrap()
            .get_statistics();
        assert_eq!(
            serde_json::Value::Object(stats),
            json!({
                "periods": ["2024-01", "2024-02"],
                "null_count": [0, 1],
                "total_count": [2, 1],
            })
        );
    }

    #[test]
    fn test_yearly() {
        let stats = ColumnTemporalNullValueAnalyzer::new("value", "date")
            .with_period(TemporalPeriod::Year)
            .analyze(&dataset())
            .unwrap()
            .get_statistics();
        assert_eq!(stats["periods"], json!(["2024"]));
        assert_eq!(stats["null_count"], json!([1]));
    }

    #[test]
    fn test_preconditions() {
        let same = ColumnTemporalNullValueAnalyzer::new("date", "date");
        assert!(same.analyze(&dataset()).unwrap().is_empty());
        let missing = ColumnTemporalNullValueAnalyzer::new("value", "when");
        assert!(missing.analyze(&dataset()).unwrap().is_empty());
        let missing = ColumnTemporalNullValueAnalyzer::new("other", "date");
        assert!(missing.analyze(&dataset()).unwrap().is_empty());
    }
}
