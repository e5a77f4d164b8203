use crate::duration::TaskDuration;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency kind between two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationType {
    #[serde(rename = "FS")]
    FinishStart,
    #[serde(rename = "SS")]
    StartStart,
    #[serde(rename = "FF")]
    FinishFinish,
    #[serde(rename = "SF")]
    StartFinish,
}

impl RelationType {
    pub fn code(self) -> &'static str {
        match self {
            RelationType::FinishStart => "FS",
            RelationType::StartStart => "SS",
            RelationType::FinishFinish => "FF",
            RelationType::StartFinish => "SF",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FS" => Some(RelationType::FinishStart),
            "SS" => Some(RelationType::StartStart),
            "FF" => Some(RelationType::FinishFinish),
            "SF" => Some(RelationType::StartFinish),
            _ => None,
        }
    }
}

impl Default for RelationType {
    fn default() -> Self {
        RelationType::FinishStart
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A directed predecessor/successor link. `target` holds the unique id of the
/// task on the other end of the link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub target: i32,
    #[serde(default, rename = "type")]
    pub kind: RelationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lag: Option<TaskDuration>,
}

impl Relation {
    pub fn to(target: i32) -> Self {
        Self {
            target,
            kind: RelationType::default(),
            lag: None,
        }
    }

    pub fn with_kind(target: i32, kind: RelationType) -> Self {
        Self {
            target,
            kind,
            lag: None,
        }
    }

    /// Lag treated as zero when absent, matching how planning tools print it.
    pub fn effective_lag(&self) -> Option<TaskDuration> {
        self.lag.filter(|lag| !lag.is_zero())
    }
}

/// A task as read from the project file. All fields are read-only views; the
/// exporter and report only project them into text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub unique_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TaskDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_duration: Option<TaskDuration>,
    /// Free-text override for the baseline duration, when the source file
    /// carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_duration_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_slack: Option<TaskDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slack: Option<TaskDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_slack: Option<TaskDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_number: Option<String>,
    /// Unique id of the parent task in the outline hierarchy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub predecessors: Vec<Relation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub successors: Vec<Relation>,
}

impl Task {
    pub fn new(unique_id: i32, name: impl Into<String>) -> Self {
        Self {
            unique_id,
            id: None,
            name: name.into(),
            start: None,
            finish: None,
            duration: None,
            baseline_duration: None,
            baseline_duration_text: None,
            total_slack: None,
            start_slack: None,
            finish_slack: None,
            outline_level: None,
            outline_number: None,
            parent: None,
            notes: None,
            predecessors: Vec::new(),
            successors: Vec::new(),
        }
    }

    /// Effective baseline duration text: the free-text field wins, then the
    /// formatted baseline duration.
    pub fn baseline_duration_label(&self) -> Option<String> {
        self.baseline_duration_text
            .clone()
            .or_else(|| self.baseline_duration.map(|d| d.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::TaskDuration;

    #[test]
    fn relation_type_codes_round_trip() {
        for kind in [
            RelationType::FinishStart,
            RelationType::StartStart,
            RelationType::FinishFinish,
            RelationType::StartFinish,
        ] {
            assert_eq!(RelationType::from_code(kind.code()), Some(kind));
        }
        assert_eq!(RelationType::from_code("XX"), None);
    }

    #[test]
    fn baseline_text_prefers_the_text_field() {
        let mut task = Task::new(1, "A");
        assert_eq!(task.baseline_duration_label(), None);

        task.baseline_duration = Some(TaskDuration::days(4.0));
        assert_eq!(task.baseline_duration_label().as_deref(), Some("4d"));

        task.baseline_duration_text = Some("about a week".into());
        assert_eq!(task.baseline_duration_label().as_deref(), Some("about a week"));
    }

    #[test]
    fn effective_lag_hides_zero_lag() {
        let mut relation = Relation::to(7);
        assert_eq!(relation.effective_lag(), None);
        relation.lag = Some(TaskDuration::days(0.0));
        assert_eq!(relation.effective_lag(), None);
        relation.lag = Some(TaskDuration::days(2.0));
        assert_eq!(relation.effective_lag(), Some(TaskDuration::days(2.0)));
    }
}
