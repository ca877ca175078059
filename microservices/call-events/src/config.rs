//! Configuration for the Call Events service

use callhook_core::{CallhookError, Result, ServiceConfig};
use callhook_db::PoolConfig;

#[derive(Debug, Clone)]
pub struct CallEventsConfig {
    pub service: ServiceConfig,
    pub pool: PoolConfig,
    /// Path prefix the webhook routes are nested under; empty serves them at
    /// the root.
    pub route_prefix: String,
}

impl CallEventsConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            service: ServiceConfig::from_lookup(&lookup)?,
            pool: PoolConfig::from_lookup(&lookup).map_err(|e| CallhookError::Config(e.to_string()))?,
            route_prefix: normalize_prefix(lookup("ROUTE_PREFIX").as_deref().unwrap_or("")),
        })
    }
}

/// `api/`, `/api` and `/api/` all become `/api`; blank or `/` becomes empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
