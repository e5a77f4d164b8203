use crate::graph::ProjectGraph;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct GraphValidationError {
    message: String,
}

impl GraphValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for GraphValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GraphValidationError {}

/// Structural checks applied after a reader builds the graph: unique ids must
/// be unique per collection and every reference must resolve. Absent
/// assignment ends are legal; dangling ones are not.
pub fn validate_graph(graph: &ProjectGraph) -> Result<(), GraphValidationError> {
    let mut seen_resources = HashSet::with_capacity(graph.resources().len());
    for resource in graph.resources() {
        if !seen_resources.insert(resource.unique_id) {
            return Err(GraphValidationError::new(format!(
                "duplicate resource unique id {}",
                resource.unique_id
            )));
        }
    }

    let mut seen_tasks = HashSet::with_capacity(graph.tasks().len());
    for task in graph.tasks() {
        if !seen_tasks.insert(task.unique_id) {
            return Err(GraphValidationError::new(format!(
                "duplicate task unique id {}",
                task.unique_id
            )));
        }
    }

    for task in graph.tasks() {
        for relation in task.predecessors.iter().chain(task.successors.iter()) {
            if !seen_tasks.contains(&relation.target) {
                return Err(GraphValidationError::new(format!(
                    "task {} has a relation to unknown task {}",
                    task.unique_id, relation.target
                )));
            }
        }
        if let Some(parent) = task.parent {
            if !seen_tasks.contains(&parent) {
                return Err(GraphValidationError::new(format!(
                    "task {} has unknown parent {}",
                    task.unique_id, parent
                )));
            }
        }
    }

    for (idx, assignment) in graph.assignments().iter().enumerate() {
        if let Some(task) = assignment.task {
            if !seen_tasks.contains(&task) {
                return Err(GraphValidationError::new(format!(
                    "assignment #{idx} references unknown task {task}"
                )));
            }
        }
        if let Some(resource) = assignment.resource {
            if !seen_resources.contains(&resource) {
                return Err(GraphValidationError::new(format!(
                    "assignment #{idx} references unknown resource {resource}"
                )));
            }
        }
    }

    Ok(())
}
