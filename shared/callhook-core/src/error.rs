//! Error types for Callhook services

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CallhookError>;

#[derive(Error, Debug)]
pub enum CallhookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CallhookError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<std::io::Error> for CallhookError {
    fn from(err: std::io::Error) -> Self {
        CallhookError::Network(err.to_string())
    }
}
