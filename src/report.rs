use crate::duration::datetime_text;
use crate::graph::ProjectGraph;
use crate::task::{Relation, RelationType, Task};
use std::io::{self, Write};

const NO_DATE: &str = "(no date supplied)";
const NO_DURATION: &str = "(no duration supplied)";
const NULL_RESOURCE: &str = "(null resource)";
const NULL_TASK: &str = "(null task)";

/// Writes the free-text dump of the whole graph: header, entity lists,
/// hierarchy, notes, relationships, slack, calendars and custom fields.
/// Unlike the tabular export this is meant for human eyes, so absent values
/// render as placeholders instead of empty fields.
pub fn write_report<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    write_project_header(graph, out)?;
    list_resources(graph, out)?;
    list_tasks(graph, out)?;
    list_assignments(graph, out)?;
    list_assignments_by_task(graph, out)?;
    list_assignments_by_resource(graph, out)?;
    list_hierarchy(graph, out)?;
    list_task_notes(graph, out)?;
    list_resource_notes(graph, out)?;
    list_relationships(graph, out)?;
    list_slack(graph, out)?;
    list_calendars(graph, out)?;
    list_custom_fields(graph, out)?;
    Ok(())
}

fn write_project_header<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    let properties = graph.properties();
    let start = datetime_text(properties.start_date).unwrap_or_else(|| "(none)".into());
    let finish = datetime_text(properties.finish_date).unwrap_or_else(|| "(none)".into());
    writeln!(out, "Project Header: StartDate={start} FinishDate={finish}")?;
    writeln!(out)
}

fn list_resources<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for resource in graph.resources() {
        writeln!(
            out,
            "Resource: {} (Unique ID={}) Start={} Finish={}",
            resource.name,
            resource.unique_id,
            datetime_text(resource.start).unwrap_or_default(),
            datetime_text(resource.finish).unwrap_or_default(),
        )?;
    }
    writeln!(out)
}

fn list_tasks<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for task in graph.tasks() {
        let start = datetime_text(task.start).unwrap_or_else(|| NO_DATE.into());
        let finish = datetime_text(task.finish).unwrap_or_else(|| NO_DATE.into());
        let duration = task
            .duration
            .map(|d| d.to_string())
            .unwrap_or_else(|| NO_DURATION.into());
        let baseline = task
            .baseline_duration_label()
            .unwrap_or_else(|| NO_DURATION.into());
        writeln!(
            out,
            "Task: {} ID={} Unique ID={} (Start Date={} Finish Date={} Duration={} Baseline Duration={} Outline Level={} Outline Number={})",
            task.name,
            optional_text(task.id.map(|v| v.to_string())),
            task.unique_id,
            start,
            finish,
            duration,
            baseline,
            optional_text(task.outline_level.map(|v| v.to_string())),
            optional_text(task.outline_number.clone()),
        )?;
    }
    writeln!(out)
}

fn list_assignments<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for assignment in graph.assignments() {
        let task_name = assignment
            .task
            .and_then(|uid| graph.task_by_unique_id(uid))
            .map(|task| task.name.as_str())
            .unwrap_or(NULL_TASK);
        let resource_name = assignment
            .resource
            .and_then(|uid| graph.resource_by_unique_id(uid))
            .map(|resource| resource.name.as_str())
            .unwrap_or(NULL_RESOURCE);
        writeln!(out, "Assignment: Task={task_name} Resource={resource_name}")?;
    }
    writeln!(out)
}

fn list_assignments_by_task<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for task in graph.tasks() {
        writeln!(out, "Assignments for task {}:", task.name)?;
        for assignment in graph.assignments_for_task(task.unique_id) {
            let resource_name = assignment
                .resource
                .and_then(|uid| graph.resource_by_unique_id(uid))
                .map(|resource| resource.name.as_str())
                .unwrap_or(NULL_RESOURCE);
            writeln!(out, "   {resource_name}")?;
        }
    }
    writeln!(out)
}

fn list_assignments_by_resource<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for resource in graph.resources() {
        writeln!(out, "Assignments for resource {}:", resource.name)?;
        for assignment in graph.assignments_for_resource(resource.unique_id) {
            let task_name = assignment
                .task
                .and_then(|uid| graph.task_by_unique_id(uid))
                .map(|task| task.name.as_str())
                .unwrap_or(NULL_TASK);
            writeln!(out, "   {task_name}")?;
        }
    }
    writeln!(out)
}

fn list_hierarchy<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for task in graph.top_level_tasks() {
        writeln!(out, "Task: {}", task.name)?;
        list_children(graph, task, " ", out)?;
    }
    writeln!(out)
}

fn list_children<W: Write>(
    graph: &ProjectGraph,
    parent: &Task,
    indent: &str,
    out: &mut W,
) -> io::Result<()> {
    for child in graph.child_tasks(parent.unique_id) {
        writeln!(out, "{indent}Task: {}", child.name)?;
        let deeper = format!("{indent} ");
        list_children(graph, child, &deeper, out)?;
    }
    Ok(())
}

fn list_task_notes<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for task in graph.tasks() {
        if let Some(notes) = task.notes.as_deref() {
            if !notes.is_empty() {
                writeln!(out, "Notes for {}: {notes}", task.name)?;
            }
        }
    }
    writeln!(out)
}

fn list_resource_notes<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for resource in graph.resources() {
        if let Some(notes) = resource.notes.as_deref() {
            if !notes.is_empty() {
                writeln!(out, "Notes for {}: {notes}", resource.name)?;
            }
        }
    }
    writeln!(out)
}

/// Tabular relationship dump, one task per line: display id, name, then the
/// predecessor and successor lists in compact `<id><type><+lag>` notation so
/// the output lines up with the planning tool's own columns.
fn list_relationships<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for task in graph.tasks() {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            optional_text(task.id.map(|v| v.to_string())),
            task.name,
            relation_list_text(graph, &task.predecessors),
            relation_list_text(graph, &task.successors),
        )?;
    }
    Ok(())
}

fn relation_list_text(graph: &ProjectGraph, relations: &[Relation]) -> String {
    if relations.is_empty() {
        return String::new();
    }
    let mut text = String::new();
    if relations.len() > 1 {
        text.push('"');
    }
    for (idx, relation) in relations.iter().enumerate() {
        if idx > 0 {
            text.push(',');
        }
        text.push_str(&relation_text(graph, relation));
    }
    if relations.len() > 1 {
        text.push('"');
    }
    text
}

fn relation_text(graph: &ProjectGraph, relation: &Relation) -> String {
    // Fall back to the raw unique id when the target cannot be resolved.
    let target_id = graph
        .task_by_unique_id(relation.target)
        .and_then(|task| task.id)
        .unwrap_or(relation.target);
    let mut text = target_id.to_string();
    let lag = relation.effective_lag();
    if relation.kind != RelationType::FinishStart || lag.is_some() {
        text.push_str(relation.kind.code());
    }
    if let Some(lag) = lag {
        if lag.value > 0.0 {
            text.push('+');
        }
        text.push_str(&lag.to_string());
    }
    text
}

fn list_slack<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for task in graph.tasks() {
        writeln!(
            out,
            "{} Total Slack={} Start Slack={} Finish Slack={}",
            task.name,
            optional_text(task.total_slack.map(|d| d.to_string())),
            optional_text(task.start_slack.map(|d| d.to_string())),
            optional_text(task.finish_slack.map(|d| d.to_string())),
        )?;
    }
    Ok(())
}

fn list_calendars<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for calendar in graph.calendars() {
        writeln!(out, "{calendar}")?;
    }
    Ok(())
}

fn list_custom_fields<W: Write>(graph: &ProjectGraph, out: &mut W) -> io::Result<()> {
    for field in graph.custom_fields() {
        writeln!(out, "{} (alias={})", field.field_name, field.alias)?;
    }
    Ok(())
}

fn optional_text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::TaskDuration;

    fn graph_with_relation(relation: Relation) -> ProjectGraph {
        let mut graph = ProjectGraph::default();
        let mut target = Task::new(relation.target, "Target");
        target.id = Some(2);
        graph.add_task(target);
        let mut task = Task::new(1, "Source");
        task.id = Some(1);
        task.predecessors.push(relation);
        graph.add_task(task);
        graph
    }

    #[test]
    fn finish_start_with_no_lag_prints_bare_id() {
        let graph = graph_with_relation(Relation::to(5));
        let task = graph.task_by_unique_id(1).unwrap();
        assert_eq!(relation_list_text(&graph, &task.predecessors), "2");
    }

    #[test]
    fn non_default_type_and_lag_are_spelled_out() {
        let mut relation = Relation::with_kind(5, RelationType::StartStart);
        relation.lag = Some(TaskDuration::days(2.0));
        let graph = graph_with_relation(relation);
        let task = graph.task_by_unique_id(1).unwrap();
        assert_eq!(relation_list_text(&graph, &task.predecessors), "2SS+2d");
    }

    #[test]
    fn negative_lag_keeps_its_own_sign() {
        let mut relation = Relation::to(5);
        relation.lag = Some(TaskDuration::days(-1.0));
        let graph = graph_with_relation(relation);
        let task = graph.task_by_unique_id(1).unwrap();
        assert_eq!(relation_list_text(&graph, &task.predecessors), "2FS-1d");
    }

    #[test]
    fn multiple_relations_are_quoted() {
        let mut graph = ProjectGraph::default();
        for uid in [5, 6] {
            let mut t = Task::new(uid, format!("T{uid}"));
            t.id = Some(uid);
            graph.add_task(t);
        }
        let mut task = Task::new(1, "Source");
        task.predecessors = vec![Relation::to(5), Relation::to(6)];
        graph.add_task(task);
        let task = graph.task_by_unique_id(1).unwrap();
        assert_eq!(relation_list_text(&graph, &task.predecessors), "\"5,6\"");
    }
}
