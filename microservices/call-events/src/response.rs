//! Response envelope shared by the recorder and the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Body of every webhook response: exactly one of `message` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseBody {
    Message(String),
    Error(String),
}

/// Result of one webhook request: a status code paired with its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl EventResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: ResponseBody::Message(message.into()),
        }
    }

    pub fn error(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Error(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl IntoResponse for EventResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
