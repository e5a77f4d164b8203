use super::{ReadError, ReadResult};
use crate::{
    Assignment, Calendar, CustomFieldDefinition, ProjectGraph, ProjectProperties, Resource, Task,
    TaskDuration, TimeUnit,
    task::{Relation, RelationType},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// The JSON interchange form of a project file: the whole graph in one
/// document, with relations carried inline on each task.
#[derive(Serialize, Deserialize)]
struct ProjectSnapshot {
    #[serde(default)]
    properties: ProjectProperties,
    #[serde(default)]
    calendars: Vec<Calendar>,
    #[serde(default)]
    custom_fields: Vec<CustomFieldDefinition>,
    #[serde(default)]
    resources: Vec<Resource>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    assignments: Vec<Assignment>,
}

impl ProjectSnapshot {
    fn into_graph(self) -> ReadResult<ProjectGraph> {
        let mut graph = ProjectGraph::new(self.properties);
        for calendar in self.calendars {
            graph.add_calendar(calendar);
        }
        for field in self.custom_fields {
            graph.add_custom_field(field);
        }
        for resource in self.resources {
            graph.add_resource(resource);
        }
        for task in self.tasks {
            graph.add_task(task);
        }
        for assignment in self.assignments {
            graph.add_assignment(assignment);
        }
        super::validate(&graph)?;
        Ok(graph)
    }
}

pub fn read_project_from_json<P: AsRef<Path>>(path: P) -> ReadResult<ProjectGraph> {
    let file = File::open(path)?;
    let snapshot: ProjectSnapshot = serde_json::from_reader(file)?;
    snapshot.into_graph()
}

/// The CSV interchange form: one record per entity with a `kind`
/// discriminator, plus a single `project` sentinel record carrying the
/// non-tabular parts as embedded JSON.
#[derive(Default, Serialize, Deserialize)]
struct RowRecord {
    kind: String,
    unique_id: String,
    id: String,
    name: String,
    start: String,
    finish: String,
    duration: String,
    baseline_duration: String,
    baseline_duration_text: String,
    outline_level: String,
    outline_number: String,
    parent: String,
    predecessors: String,
    successors: String,
    notes: String,
    total_slack: String,
    start_slack: String,
    finish_slack: String,
    task: String,
    resource: String,
    #[serde(default)]
    properties_json: String,
    #[serde(default)]
    calendars_json: String,
    #[serde(default)]
    custom_fields_json: String,
}

impl RowRecord {
    fn required_unique_id(&self) -> ReadResult<i32> {
        parse_i32(&self.unique_id)?.ok_or_else(|| {
            ReadError::InvalidData(format!("{} record is missing unique_id", self.kind))
        })
    }

    fn into_resource(self) -> ReadResult<Resource> {
        let mut resource = Resource::new(self.required_unique_id()?, self.name.clone());
        resource.id = parse_i32(&self.id)?;
        resource.start = parse_datetime(&self.start)?;
        resource.finish = parse_datetime(&self.finish)?;
        resource.notes = string_option(self.notes);
        Ok(resource)
    }

    fn into_task(self) -> ReadResult<Task> {
        let mut task = Task::new(self.required_unique_id()?, self.name.clone());
        task.id = parse_i32(&self.id)?;
        task.start = parse_datetime(&self.start)?;
        task.finish = parse_datetime(&self.finish)?;
        task.duration = parse_duration(&self.duration)?;
        task.baseline_duration = parse_duration(&self.baseline_duration)?;
        task.baseline_duration_text = string_option(self.baseline_duration_text);
        task.outline_level = parse_i32(&self.outline_level)?;
        task.outline_number = string_option(self.outline_number);
        task.parent = parse_i32(&self.parent)?;
        task.notes = string_option(self.notes);
        task.total_slack = parse_duration(&self.total_slack)?;
        task.start_slack = parse_duration(&self.start_slack)?;
        task.finish_slack = parse_duration(&self.finish_slack)?;
        task.predecessors = parse_relations(&self.predecessors)?;
        task.successors = parse_relations(&self.successors)?;
        Ok(task)
    }

    fn into_assignment(self) -> ReadResult<Assignment> {
        Ok(Assignment::new(
            parse_i32(&self.task)?,
            parse_i32(&self.resource)?,
        ))
    }
}

pub fn read_project_from_csv<P: AsRef<Path>>(path: P) -> ReadResult<ProjectGraph> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut properties: Option<ProjectProperties> = None;
    let mut calendars: Vec<Calendar> = Vec::new();
    let mut custom_fields: Vec<CustomFieldDefinition> = Vec::new();
    let mut resources: Vec<Resource> = Vec::new();
    let mut tasks: Vec<Task> = Vec::new();
    let mut assignments: Vec<Assignment> = Vec::new();

    for record in reader.deserialize::<RowRecord>() {
        let record = record?;
        let kind = record.kind.trim().to_string();
        match kind.as_str() {
            "project" => {
                if properties.is_some() {
                    return Err(ReadError::InvalidData(
                        "CSV file contained multiple project rows".into(),
                    ));
                }
                properties = Some(if record.properties_json.trim().is_empty() {
                    ProjectProperties::default()
                } else {
                    serde_json::from_str(&record.properties_json).map_err(|err| {
                        ReadError::InvalidData(format!("invalid properties json: {err}"))
                    })?
                });
                if !record.calendars_json.trim().is_empty() {
                    calendars = serde_json::from_str(&record.calendars_json).map_err(|err| {
                        ReadError::InvalidData(format!("invalid calendars json: {err}"))
                    })?;
                }
                if !record.custom_fields_json.trim().is_empty() {
                    custom_fields =
                        serde_json::from_str(&record.custom_fields_json).map_err(|err| {
                            ReadError::InvalidData(format!("invalid custom_fields json: {err}"))
                        })?;
                }
            }
            "resource" => resources.push(record.into_resource()?),
            "task" => tasks.push(record.into_task()?),
            "assignment" => assignments.push(record.into_assignment()?),
            other => {
                return Err(ReadError::InvalidData(format!(
                    "unknown record kind '{other}'"
                )));
            }
        }
    }

    let mut graph = ProjectGraph::new(properties.unwrap_or_default());
    for calendar in calendars {
        graph.add_calendar(calendar);
    }
    for field in custom_fields {
        graph.add_custom_field(field);
    }
    for resource in resources {
        graph.add_resource(resource);
    }
    for task in tasks {
        graph.add_task(task);
    }
    for assignment in assignments {
        graph.add_assignment(assignment);
    }
    super::validate(&graph)?;
    Ok(graph)
}

fn parse_datetime(input: &str) -> ReadResult<Option<NaiveDateTime>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Some(value));
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(Some(value));
    }
    // date-only values land at midnight
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(|date| date.and_hms_opt(0, 0, 0))
        .map_err(|e| ReadError::InvalidData(format!("invalid timestamp '{input}': {e}")))
}

fn parse_i32(input: &str) -> ReadResult<Option<i32>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    input
        .trim()
        .parse::<i32>()
        .map(Some)
        .map_err(|e| ReadError::InvalidData(format!("invalid integer '{input}': {e}")))
}

fn parse_duration(input: &str) -> ReadResult<Option<TaskDuration>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let (value_text, unit) = if let Some(prefix) = input.strip_suffix("mo") {
        (prefix, TimeUnit::Months)
    } else if let Some(prefix) = input.strip_suffix('m') {
        (prefix, TimeUnit::Minutes)
    } else if let Some(prefix) = input.strip_suffix('h') {
        (prefix, TimeUnit::Hours)
    } else if let Some(prefix) = input.strip_suffix('d') {
        (prefix, TimeUnit::Days)
    } else if let Some(prefix) = input.strip_suffix('w') {
        (prefix, TimeUnit::Weeks)
    } else {
        return Err(ReadError::InvalidData(format!(
            "duration '{input}' is missing a unit suffix"
        )));
    };
    let value = value_text
        .trim()
        .parse::<f64>()
        .map_err(|e| ReadError::InvalidData(format!("invalid duration '{input}': {e}")))?;
    Ok(Some(TaskDuration::new(value, unit)))
}

/// Relations are comma-joined entries of `target`, `target:KIND`, or
/// `target:KIND:lag` (e.g. `5`, `5:SS`, `5:FS:2d`).
fn parse_relations(input: &str) -> ReadResult<Vec<Relation>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(|entry| {
            let mut parts = entry.trim().splitn(3, ':');
            let target = parts
                .next()
                .unwrap_or_default()
                .trim()
                .parse::<i32>()
                .map_err(|e| {
                    ReadError::InvalidData(format!("invalid relation target in '{entry}': {e}"))
                })?;
            let kind = match parts.next() {
                None => RelationType::default(),
                Some(code) => RelationType::from_code(code.trim()).ok_or_else(|| {
                    ReadError::InvalidData(format!("invalid relation type in '{entry}'"))
                })?,
            };
            let lag = match parts.next() {
                None => None,
                Some(lag) => parse_duration(lag)?,
            };
            Ok(Relation { target, kind, lag })
        })
        .collect()
}

fn string_option(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
