use chrono::NaiveDate;
use schedule_export::{
    Assignment, ProjectGraph, Relation, Resource, Task, TaskDuration, export_to_csv, write_tabular,
};
use std::fs;
use tempfile::NamedTempFile;

fn sample_graph() -> ProjectGraph {
    let mut graph = ProjectGraph::default();

    let mut r1 = Resource::new(1, "R1");
    r1.id = Some(1);
    graph.add_resource(r1);
    let mut r2 = Resource::new(2, "R2");
    r2.id = Some(2);
    graph.add_resource(r2);

    let mut t1 = Task::new(10, "T1");
    t1.id = Some(1);
    t1.predecessors = vec![Relation::to(11), Relation::to(12), Relation::to(13)];
    graph.add_task(t1);

    graph.add_assignment(Assignment::new(Some(10), Some(1)));
    graph
}

fn render(graph: &ProjectGraph) -> String {
    let mut buffer = Vec::new();
    write_tabular(graph, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn four_sections_match_expected_bytes() {
    let mut expected = String::new();
    expected.push_str("Resources\nUniqueID\tID\tName\n1\t1\tR1\n2\t2\tR2\n\n");
    expected.push_str("Tasks\nUniqueID\tID\tName\tStart\tEnd\tDuration\n10\t1\tT1\t\t\t\n\n");
    expected.push_str("Assignments\nTaskName\tResourceName\nT1\tR1\n\n");
    expected.push_str("Relations (max.10)\n");
    expected.push_str(
        "TaskID\tPre1\tPre2\tPre3\tPre4\tPre5\tPre6\tPre7\tPre8\tPre9\tPre10\
         \tSuc1\tSuc2\tSuc3\tSuc4\tSuc5\tSuc6\tSuc7\tSuc8\tSuc9\tSuc10\t\n",
    );
    expected.push_str(&format!("10\t11\t12\t13{}\n", "\t".repeat(18)));

    assert_eq!(render(&sample_graph()), expected);
}

#[test]
fn section_separators_are_truly_blank_lines() {
    let output = render(&sample_graph());
    // one empty line between each pair of adjacent sections, and no quoting
    // artifacts standing in for them
    assert_eq!(output.matches("\n\n").count(), 3);
    assert!(output.contains("R2\n\nTasks\n"));
    assert!(!output.contains('"'));
}

#[test]
fn task_dates_and_durations_render_when_present() {
    let mut graph = ProjectGraph::default();
    let mut task = Task::new(20, "Dig");
    task.id = Some(3);
    task.start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(8, 0, 0);
    task.finish = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap().and_hms_opt(17, 0, 0);
    task.duration = Some(TaskDuration::days(5.0));
    graph.add_task(task);

    let output = render(&graph);
    assert!(output.contains("20\t3\tDig\t2025-03-10 08:00\t2025-03-14 17:00\t5d\n"));
}

#[test]
fn missing_assignment_ends_render_placeholders() {
    let mut graph = ProjectGraph::default();
    graph.add_assignment(Assignment::new(None, None));
    let output = render(&graph);
    assert!(output.contains("(null task)\t(null resource)\n"));
}

#[test]
fn relation_row_always_has_fixed_width() {
    let mut graph = ProjectGraph::default();
    let mut task = Task::new(1, "Busy");
    task.predecessors = (100..114).map(Relation::to).collect();
    task.successors = vec![Relation::to(200)];
    graph.add_task(task);

    let output = render(&graph);
    let relations = output.split("Relations (max.10)\n").nth(1).unwrap();
    // first line after the section title is the header
    let row = relations.lines().nth(1).expect("relation row");
    let fields: Vec<&str> = row.split('\t').collect();
    // task id, 10 predecessor slots, 10 successor slots, plus the trailing
    // delimiter's empty field
    assert_eq!(fields.len(), 22);
    assert_eq!(&fields[1..11], &["100", "101", "102", "103", "104", "105", "106", "107", "108", "109"]);
    assert_eq!(fields[11], "200");
    assert!(fields[12..].iter().all(|f| f.is_empty()));
}

#[test]
fn relation_row_of_unlinked_task_is_all_empty_slots() {
    let mut graph = ProjectGraph::default();
    graph.add_task(Task::new(7, "Lonely"));
    let output = render(&graph);
    assert!(output.contains(&format!("7{}\n", "\t".repeat(21))));
}

#[test]
fn export_is_idempotent_and_overwrites_stale_content() {
    let graph = sample_graph();
    let file = NamedTempFile::new().unwrap();

    export_to_csv(&graph, file.path()).unwrap();
    let first = fs::read(file.path()).unwrap();

    fs::write(file.path(), b"stale content that must disappear").unwrap();
    export_to_csv(&graph, file.path()).unwrap();
    let second = fs::read(file.path()).unwrap();

    assert_eq!(first, second);
    assert!(!String::from_utf8_lossy(&second).contains("stale"));
}

#[test]
fn non_ascii_names_are_replaced_in_the_output() {
    let mut graph = ProjectGraph::default();
    graph.add_resource(Resource::new(1, "Bürogebäude"));
    let output = render(&graph);
    assert!(output.contains("1\t\tB?rogeb?ude\n"));
    assert!(output.is_ascii());
}
