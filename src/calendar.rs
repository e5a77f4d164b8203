use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named working calendar attached to the project. Only its summary is
/// surfaced (in the text report); no date arithmetic is done against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub name: String,
    #[serde(default)]
    pub working_days: Vec<Weekday>,
}

impl Calendar {
    pub fn new(name: impl Into<String>, working_days: Vec<Weekday>) -> Self {
        Self {
            name: name.into(),
            working_days,
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self
            .working_days
            .iter()
            .map(|day| day.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} [{}]", self.name, days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_working_days() {
        let cal = Calendar::new("Standard", vec![Weekday::Mon, Weekday::Tue, Weekday::Fri]);
        assert_eq!(cal.to_string(), "Standard [Mon, Tue, Fri]");
    }

    #[test]
    fn display_handles_empty_working_days() {
        let cal = Calendar::new("24 Hours", Vec::new());
        assert_eq!(cal.to_string(), "24 Hours []");
    }
}
