use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Summary properties of the project itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectProperties {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_date: Option<NaiveDateTime>,
}

/// A custom field definition declared in the project file, surfaced only in
/// the text report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldDefinition {
    pub field_name: String,
    #[serde(default)]
    pub alias: String,
}

impl CustomFieldDefinition {
    pub fn new(field_name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            alias: alias.into(),
        }
    }
}
