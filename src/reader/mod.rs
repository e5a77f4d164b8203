use crate::graph::ProjectGraph;
use crate::graph_validation;
use log::debug;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum ReadError {
    Io(io::Error),
    Serialization(SerdeJsonError),
    Csv(csv::Error),
    UnsupportedFormat(String),
    InvalidData(String),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(err) => write!(f, "io error: {err}"),
            ReadError::Serialization(err) => write!(f, "serialization error: {err}"),
            ReadError::Csv(err) => write!(f, "csv error: {err}"),
            ReadError::UnsupportedFormat(detail) => {
                write!(f, "unsupported project file format: {detail}")
            }
            ReadError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for ReadError {}

impl From<io::Error> for ReadError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SerdeJsonError> for ReadError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<csv::Error> for ReadError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type ReadResult<T> = Result<T, ReadError>;

/// Loads a project graph from disk, picking the concrete reader from the
/// file extension the way a reader-utility facade would.
pub fn read_project_file<P: AsRef<Path>>(path: P) -> ReadResult<ProjectGraph> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    debug!("reading {} as '{}' project file", path.display(), extension);
    match extension.as_str() {
        "json" => file::read_project_from_json(path),
        "csv" => file::read_project_from_csv(path),
        _ => Err(ReadError::UnsupportedFormat(format!(
            "no reader for '{}'",
            path.display()
        ))),
    }
}

pub(crate) fn validate(graph: &ProjectGraph) -> ReadResult<()> {
    graph_validation::validate_graph(graph)
        .map_err(|err| ReadError::InvalidData(err.to_string()))
}

pub mod file;

pub use file::{read_project_from_csv, read_project_from_json};
