//! Configuration shared by every Callhook microservice

use crate::error::{CallhookError, Result};
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub service_name: String,
    pub http_bind: SocketAddr,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_bind = lookup("HTTP_BIND").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        Ok(Self {
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "call-events".to_string()),
            http_bind: http_bind
                .parse()
                .map_err(|e| CallhookError::Config(format!("Invalid HTTP_BIND {http_bind:?}: {e}")))?,
        })
    }
}
