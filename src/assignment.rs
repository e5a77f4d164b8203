use serde::{Deserialize, Serialize};

/// Links a task to a resource. Either end may be absent in the source file;
/// the exporter renders missing ends as placeholder literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique id of the assigned task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<i32>,
    /// Unique id of the assigned resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<i32>,
}

impl Assignment {
    pub fn new(task: Option<i32>, resource: Option<i32>) -> Self {
        Self { task, resource }
    }
}
