use thiserror::Error;
use uuid::Uuid;

/// Error type that captures appointment storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Appointment not found: {0}")]
    NotFound(Uuid),
}
