pub mod assignment;
pub mod calendar;
pub mod duration;
pub mod export;
pub mod graph;
pub(crate) mod graph_validation;
pub mod metadata;
pub mod reader;
pub mod report;
pub mod resource;
pub mod task;

pub use assignment::Assignment;
pub use calendar::Calendar;
pub use duration::{TaskDuration, TimeUnit};
pub use export::{ExportError, RELATION_SLOTS, export_to_csv, flatten_relations, write_tabular};
pub use graph::ProjectGraph;
pub use metadata::{CustomFieldDefinition, ProjectProperties};
pub use reader::{ReadError, ReadResult, read_project_file};
pub use report::write_report;
pub use resource::Resource;
pub use task::{Relation, RelationType, Task};
