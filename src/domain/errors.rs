use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("Invalid PIN")]
    InvalidPin,
    #[error("Access denied")]
    Forbidden,
    #[error("{0}")]
    Conflict(String),
    #[error("Delivery failed: {0}")]
    Delivery(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
