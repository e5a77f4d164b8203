use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A resource (person, crew, equipment) as read from the project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Stable identifier, unique across the project.
    pub unique_id: i32,
    /// Display identifier as shown in the planning tool; may be absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Resource {
    pub fn new(unique_id: i32, name: impl Into<String>) -> Self {
        Self {
            unique_id,
            id: None,
            name: name.into(),
            start: None,
            finish: None,
            notes: None,
        }
    }
}
