use thiserror::Error;

use crate::gui::ElementId;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A required argument was absent (or, in compatibility mode, zero).
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("no GUI element with handle {0}")]
    UnknownElement(ElementId),

    /// The drawing surface rejected an operation.
    #[error("surface error: {0}")]
    Surface(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
