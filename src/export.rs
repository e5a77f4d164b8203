use crate::duration::datetime_text;
use crate::graph::ProjectGraph;
use crate::task::Relation;
use csv::{QuoteStyle, Writer, WriterBuilder};
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

/// Fixed number of predecessor and successor slots in a relation row.
pub const RELATION_SLOTS: usize = 10;

const DELIMITER: u8 = b'\t';
const NULL_TASK: &str = "(null task)";
const NULL_RESOURCE: &str = "(null resource)";

#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    Csv(csv::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(err) => write!(f, "io error: {err}"),
            ExportError::Csv(err) => write!(f, "csv error: {err}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<io::Error> for ExportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Writes the four-section tabular export to `path`, truncating any existing
/// file at that path. The handle is dropped (and so closed) on every exit
/// path, leaving a truncated file behind on mid-run failure.
pub fn export_to_csv<P: AsRef<Path>>(graph: &ProjectGraph, path: P) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_tabular(graph, file)
}

/// Writes the four sections (Resources, Tasks, Assignments, Relations) to any
/// sink, tab-delimited, blank-line separated, with a flush after each section
/// and after every relation row so partial output stays visible on failure.
///
/// Each section gets its own csv writer over the shared sink; the blank
/// separator lines are written on the sink directly, since a csv writer
/// quotes a record made of one empty field even with quoting disabled.
pub fn write_tabular<W: io::Write>(graph: &ProjectGraph, mut sink: W) -> Result<(), ExportError> {
    {
        let mut writer = section_writer(&mut sink);
        write_resources(graph, &mut writer)?;
        writer.flush()?;
    }
    sink.write_all(b"\n")?;

    {
        let mut writer = section_writer(&mut sink);
        write_tasks(graph, &mut writer)?;
        writer.flush()?;
    }
    sink.write_all(b"\n")?;

    {
        let mut writer = section_writer(&mut sink);
        write_assignments(graph, &mut writer)?;
        writer.flush()?;
    }
    sink.write_all(b"\n")?;

    let mut writer = section_writer(&mut sink);
    write_relations(graph, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn section_writer<W: io::Write>(sink: &mut W) -> Writer<&mut W> {
    WriterBuilder::new()
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Never)
        .flexible(true)
        .from_writer(sink)
}

fn write_resources<W: io::Write>(
    graph: &ProjectGraph,
    writer: &mut Writer<W>,
) -> Result<(), ExportError> {
    writer.write_record(["Resources"])?;
    writer.write_record(["UniqueID", "ID", "Name"])?;
    for resource in graph.resources() {
        writer.write_record([
            resource.unique_id.to_string(),
            optional_id(resource.id),
            ascii_field(&resource.name).into_owned(),
        ])?;
    }
    Ok(())
}

fn write_tasks<W: io::Write>(
    graph: &ProjectGraph,
    writer: &mut Writer<W>,
) -> Result<(), ExportError> {
    writer.write_record(["Tasks"])?;
    writer.write_record(["UniqueID", "ID", "Name", "Start", "End", "Duration"])?;
    for task in graph.tasks() {
        // Computed for parity with the text report; the sheet layout has no
        // baseline column.
        let _baseline = task.baseline_duration_label();

        writer.write_record([
            task.unique_id.to_string(),
            optional_id(task.id),
            ascii_field(&task.name).into_owned(),
            datetime_text(task.start).unwrap_or_default(),
            datetime_text(task.finish).unwrap_or_default(),
            task.duration.map(|d| d.to_string()).unwrap_or_default(),
        ])?;
    }
    Ok(())
}

fn write_assignments<W: io::Write>(
    graph: &ProjectGraph,
    writer: &mut Writer<W>,
) -> Result<(), ExportError> {
    writer.write_record(["Assignments"])?;
    writer.write_record(["TaskName", "ResourceName"])?;
    for assignment in graph.assignments() {
        let task_name = assignment
            .task
            .and_then(|uid| graph.task_by_unique_id(uid))
            .map(|task| ascii_field(&task.name).into_owned())
            .unwrap_or_else(|| NULL_TASK.to_string());
        let resource_name = assignment
            .resource
            .and_then(|uid| graph.resource_by_unique_id(uid))
            .map(|resource| ascii_field(&resource.name).into_owned())
            .unwrap_or_else(|| NULL_RESOURCE.to_string());
        writer.write_record([task_name, resource_name])?;
    }
    Ok(())
}

fn write_relations<W: io::Write>(
    graph: &ProjectGraph,
    writer: &mut Writer<W>,
) -> Result<(), ExportError> {
    writer.write_record([format!("Relations (max.{RELATION_SLOTS})")])?;

    let mut header = Vec::with_capacity(2 + 2 * RELATION_SLOTS);
    header.push("TaskID".to_string());
    for slot in 1..=RELATION_SLOTS {
        header.push(format!("Pre{slot}"));
    }
    for slot in 1..=RELATION_SLOTS {
        header.push(format!("Suc{slot}"));
    }
    // Relation rows carry a trailing delimiter.
    header.push(String::new());
    writer.write_record(&header)?;

    for task in graph.tasks() {
        let mut fields = Vec::with_capacity(2 + 2 * RELATION_SLOTS);
        fields.push(task.unique_id.to_string());
        for slot in flatten_relations(&task.predecessors, RELATION_SLOTS)
            .into_iter()
            .chain(flatten_relations(&task.successors, RELATION_SLOTS))
        {
            fields.push(
                slot.map(|relation| relation.target.to_string())
                    .unwrap_or_default(),
            );
        }
        fields.push(String::new());
        writer.write_record(&fields)?;
        writer.flush()?;
    }
    Ok(())
}

/// Projects a variable-length relation list into exactly `cap` slots, padding
/// with `None` and silently dropping entries past the cap.
pub fn flatten_relations(relations: &[Relation], cap: usize) -> Vec<Option<&Relation>> {
    (0..cap).map(|slot| relations.get(slot)).collect()
}

fn optional_id(id: Option<i32>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

/// Output is ASCII; anything outside the ASCII range becomes `?`.
fn ascii_field(value: &str) -> Cow<'_, str> {
    if value.is_ascii() {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(
            value
                .chars()
                .map(|c| if c.is_ascii() { c } else { '?' })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_pads_short_lists() {
        let relations = vec![Relation::to(2), Relation::to(3)];
        let slots = flatten_relations(&relations, 10);
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0].map(|r| r.target), Some(2));
        assert_eq!(slots[1].map(|r| r.target), Some(3));
        assert!(slots[2..].iter().all(Option::is_none));
    }

    #[test]
    fn flatten_truncates_long_lists() {
        let relations: Vec<Relation> = (1..=14).map(Relation::to).collect();
        let slots = flatten_relations(&relations, 10);
        assert_eq!(slots.len(), 10);
        let targets: Vec<i32> = slots.iter().map(|s| s.unwrap().target).collect();
        assert_eq!(targets, (1..=10).collect::<Vec<i32>>());
    }

    #[test]
    fn flatten_of_empty_list_is_all_empty_slots() {
        let slots = flatten_relations(&[], 10);
        assert_eq!(slots.len(), 10);
        assert!(slots.iter().all(Option::is_none));
    }

    #[test]
    fn ascii_field_replaces_non_ascii() {
        assert_eq!(ascii_field("Crew A"), "Crew A");
        assert_eq!(ascii_field("Bürogebäude"), "B?rogeb?ude");
    }
}
