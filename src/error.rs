use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a dump from becoming a plot.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} has no header line")]
    EmptyInput { path: PathBuf },
    #[error("line {line} has {found} fields, the header has {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("column {column} not found in the header")]
    MissingColumn { column: String },
    #[error("column {column} has {available} values, the window needs {needed}")]
    ShortColumn {
        column: String,
        needed: usize,
        available: usize,
    },
    #[error("column {column}, row {row}: {value:?} is not a number")]
    Parse {
        column: String,
        row: usize,
        value: String,
    },
    #[error("invalid plot style: {0}")]
    InvalidStyle(String),
    #[error("failed to render plot: {0}")]
    Render(String),
    #[error("could not show {path}: {reason}")]
    Show { path: PathBuf, reason: String },
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Render(format!("{value:?}"))
    }
}
