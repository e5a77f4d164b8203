use crate::assignment::Assignment;
use crate::calendar::Calendar;
use crate::metadata::{CustomFieldDefinition, ProjectProperties};
use crate::resource::Resource;
use crate::task::Task;
use std::collections::HashMap;

/// The in-memory project graph produced by a reader. Collections preserve the
/// order of the source file; the exporter and report iterate them as-is and
/// never mutate them.
#[derive(Debug, Default)]
pub struct ProjectGraph {
    properties: ProjectProperties,
    calendars: Vec<Calendar>,
    custom_fields: Vec<CustomFieldDefinition>,
    resources: Vec<Resource>,
    tasks: Vec<Task>,
    assignments: Vec<Assignment>,
    task_index: HashMap<i32, usize>,
    resource_index: HashMap<i32, usize>,
}

impl ProjectGraph {
    pub fn new(properties: ProjectProperties) -> Self {
        Self {
            properties,
            ..Self::default()
        }
    }

    pub fn add_resource(&mut self, resource: Resource) {
        self.resource_index
            .insert(resource.unique_id, self.resources.len());
        self.resources.push(resource);
    }

    pub fn add_task(&mut self, task: Task) {
        self.task_index.insert(task.unique_id, self.tasks.len());
        self.tasks.push(task);
    }

    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    pub fn add_calendar(&mut self, calendar: Calendar) {
        self.calendars.push(calendar);
    }

    pub fn add_custom_field(&mut self, field: CustomFieldDefinition) {
        self.custom_fields.push(field);
    }

    pub fn properties(&self) -> &ProjectProperties {
        &self.properties
    }

    pub fn calendars(&self) -> &[Calendar] {
        &self.calendars
    }

    pub fn custom_fields(&self) -> &[CustomFieldDefinition] {
        &self.custom_fields
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn task_by_unique_id(&self, unique_id: i32) -> Option<&Task> {
        self.task_index
            .get(&unique_id)
            .map(|&idx| &self.tasks[idx])
    }

    pub fn resource_by_unique_id(&self, unique_id: i32) -> Option<&Resource> {
        self.resource_index
            .get(&unique_id)
            .map(|&idx| &self.resources[idx])
    }

    /// Tasks with no parent, in graph order.
    pub fn top_level_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| task.parent.is_none())
    }

    /// Direct children of the given task, in graph order.
    pub fn child_tasks(&self, parent_unique_id: i32) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| task.parent == Some(parent_unique_id))
    }

    pub fn assignments_for_task(&self, task_unique_id: i32) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(move |assignment| assignment.task == Some(task_unique_id))
    }

    pub fn assignments_for_resource(
        &self,
        resource_unique_id: i32,
    ) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(move |assignment| assignment.resource == Some(resource_unique_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> ProjectGraph {
        let mut graph = ProjectGraph::default();
        graph.add_resource(Resource::new(1, "Crew A"));
        let mut parent = Task::new(10, "Phase");
        parent.id = Some(1);
        graph.add_task(parent);
        let mut child = Task::new(11, "Step");
        child.parent = Some(10);
        graph.add_task(child);
        graph.add_assignment(Assignment::new(Some(11), Some(1)));
        graph.add_assignment(Assignment::new(Some(11), None));
        graph
    }

    #[test]
    fn unique_id_lookup_finds_entities() {
        let graph = sample_graph();
        assert_eq!(graph.task_by_unique_id(10).map(|t| t.name.as_str()), Some("Phase"));
        assert_eq!(graph.resource_by_unique_id(1).map(|r| r.name.as_str()), Some("Crew A"));
        assert!(graph.task_by_unique_id(99).is_none());
    }

    #[test]
    fn hierarchy_views_follow_parent_links() {
        let graph = sample_graph();
        let top: Vec<_> = graph.top_level_tasks().map(|t| t.unique_id).collect();
        assert_eq!(top, vec![10]);
        let children: Vec<_> = graph.child_tasks(10).map(|t| t.unique_id).collect();
        assert_eq!(children, vec![11]);
    }

    #[test]
    fn assignment_filters_match_either_end() {
        let graph = sample_graph();
        assert_eq!(graph.assignments_for_task(11).count(), 2);
        assert_eq!(graph.assignments_for_resource(1).count(), 1);
        assert_eq!(graph.assignments_for_resource(2).count(), 0);
    }
}
