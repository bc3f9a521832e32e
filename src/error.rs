use thiserror::Error;

/// Errors raised by the chart core.
#[derive(Debug, Error)]
pub enum GanttError {
    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse chart configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid zoom factor {0}: must be finite and positive")]
    InvalidZoom(f64),

    /// An edit was committed without both of its snapshots.
    #[error("Incomplete edit: missing {0} snapshot")]
    IncompleteEdit(&'static str),

    #[error("Nothing to undo")]
    CannotUndo,

    #[error("Nothing to redo")]
    CannotRedo,
}

pub type Result<T> = std::result::Result<T, GanttError>;
