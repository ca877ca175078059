//! Callhook Core - shared service infrastructure
//!
//! This crate provides:
//! - The service trait every webhook microservice implements
//! - Runtime bootstrap with graceful shutdown
//! - Base service configuration
//! - Platform error type

pub mod config;
pub mod error;
pub mod service;

pub use config::ServiceConfig;
pub use error::{CallhookError, Result};
pub use service::{CallhookService, DependencyStatus, HealthStatus, MicroserviceRuntime, ReadinessStatus};
