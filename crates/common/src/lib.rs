//! Newswire Common Library
//!
//! Shared code for the Newswire services including:
//! - Database models and repository pattern
//! - Dynamic list-query construction
//! - Error taxonomy and HTTP mapping
//! - Request validation
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod validation;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::Repository;
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
