use bookly_domain::WindowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),
    #[error("Invalid window: {0}")]
    InvalidWindow(#[from] WindowError),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
