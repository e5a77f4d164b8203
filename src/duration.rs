use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit attached to a schedule duration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
}

impl TimeUnit {
    pub fn abbreviation(self) -> &'static str {
        match self {
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
            TimeUnit::Weeks => "w",
            TimeUnit::Months => "mo",
        }
    }
}

/// A duration as carried by the project graph: a raw value plus its unit.
/// No calendar arithmetic is performed on it; it only renders as text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskDuration {
    pub value: f64,
    pub unit: TimeUnit,
}

impl TaskDuration {
    pub fn new(value: f64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub fn days(value: f64) -> Self {
        Self::new(value, TimeUnit::Days)
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }
}

impl fmt::Display for TaskDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.fract() == 0.0 {
            write!(f, "{:.0}{}", self.value, self.unit.abbreviation())
        } else {
            write!(f, "{}{}", self.value, self.unit.abbreviation())
        }
    }
}

/// Renders an optional timestamp for output; callers decide what an absent
/// value becomes (empty field in the export, placeholder in the report).
pub(crate) fn datetime_text(value: Option<NaiveDateTime>) -> Option<String> {
    value.map(|v| v.format("%Y-%m-%d %H:%M").to_string())
}
