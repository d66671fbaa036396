use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key dimension handed down by the host chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Time,
    Number,
}

/// One value from the host chart's key dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainValue {
    Time(DateTime<Utc>),
    Number(f64),
    Text(String),
}

impl fmt::Display for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time(time) => write!(f, "{}", time.format("%Y-%m-%d %H:%M:%S UTC")),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One tooltip content row drawn from a hovered data point.
///
/// A present `value` distinguishes a value row from a label-only row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub id: String,
    pub label: String,
    pub value: Option<f64>,
}

impl SeriesRow {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// Hovered data point handed over by the host's interaction layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverPoint {
    pub key: DomainValue,
    pub series: Vec<SeriesRow>,
}

impl HoverPoint {
    #[must_use]
    pub fn new(key: DomainValue) -> Self {
        Self {
            key,
            series: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_series(mut self, series: Vec<SeriesRow>) -> Self {
        self.series = series;
        self
    }
}
