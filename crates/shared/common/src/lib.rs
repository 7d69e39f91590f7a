//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - The error carrier every layer returns ([`AppError`] / [`ErrorKind`])
//! - Configuration structures loaded from the environment
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{AppConfig, Config, DatabaseConfig, JwtConfig};
pub use error::{AppError, AppResult, BoxError, ErrorKind, OptionExt};
