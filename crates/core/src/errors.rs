use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeError {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Ownership error: {0}")]
    Ownership(String),

    #[error("Booking conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),
}

pub type TimeResult<T> = Result<T, TimeError>;
