use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between receiving a POST and the row landing.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to connect to database: {0}")]
    Connection(String),
    #[error("malformed telemetry payload: {0}")]
    MalformedInput(String),
    #[error("failed to insert into database: {0}")]
    Insertion(String),
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl IngestError {
    pub fn status(&self) -> StatusCode {
        match self {
            IngestError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            IngestError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            IngestError::Insertion(_) | IngestError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
