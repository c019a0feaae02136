//! Bucketing of timestamps into reporting periods.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::SondeError;

/// Granularity used to group rows over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalPeriod {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl TemporalPeriod {
    /// Sortable label of the period containing `dt`.
    pub fn key(&self, dt: &NaiveDateTime) -> String {
        match self {
            TemporalPeriod::Day => dt.format("%Y-%m-%d").to_string(),
            TemporalPeriod::Week => {
                let week = dt.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            TemporalPeriod::Month => dt.format("%Y-%m").to_string(),
            TemporalPeriod::Year => dt.format("%Y").to_string(),
        }
    }
}

impl fmt::Display for TemporalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TemporalPeriod::Day => "day",
            TemporalPeriod::Week => "week",
            TemporalPeriod::Month => "month",
            TemporalPeriod::Year => "year",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for TemporalPeriod {
    type Err = SondeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" | "d" => Ok(TemporalPeriod::Day),
            "week" | "w" => Ok(TemporalPeriod::Week),
            "month" | "m" => Ok(TemporalPeriod::Month),
            "year" | "y" => Ok(TemporalPeriod::Year),
            other => Err(SondeError::Config(format!("unknown period '{}'", other))),
        }
    }
}
