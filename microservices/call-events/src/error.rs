//! Error types for the Call Events service

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use callhook_db::DbError;

use crate::response::EventResponse;

/// Result type alias
pub type Result<T> = std::result::Result<T, CallEventError>;

/// Failures a webhook request can end in.
///
/// A malformed timestamp is deliberately absent: it downgrades the field to
/// NULL and the request carries on.
#[derive(Debug, thiserror::Error)]
pub enum CallEventError {
    #[error("Invalid request data")]
    InvalidRequestBody,

    /// The body could not be read at all (too large, aborted upload).
    #[error("{0}")]
    BodyRejected(BytesRejection),

    #[error("Invalid table name: {0}")]
    InvalidCategory(String),

    #[error("{0}")]
    Persistence(#[from] DbError),

    #[error("{0}")]
    Unhandled(String),
}

impl CallEventError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody | Self::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            Self::BodyRejected(rejection) => rejection.status(),
            Self::Persistence(_) | Self::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller. The rejected category is logged but
    /// never echoed back.
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidCategory(_) => "Invalid table name".to_string(),
            Self::BodyRejected(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}

impl From<CallEventError> for EventResponse {
    fn from(err: CallEventError) -> Self {
        EventResponse::error(err.status_code(), err.client_message())
    }
}

impl IntoResponse for CallEventError {
    fn into_response(self) -> Response {
        EventResponse::from(self).into_response()
    }
}
