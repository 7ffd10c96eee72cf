use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("No drag in progress")]
    NoActiveDrag,

    #[error("A drag is already in progress")]
    DragInProgress,

    #[error("Invalid id format: {0}")]
    InvalidId(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
