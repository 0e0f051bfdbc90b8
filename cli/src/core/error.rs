//! # LaundryBot Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used around the resolver: configuration
//! loading, catalog validation, template rendering and server startup. The
//! resolver itself is total and never produces an error; an unrecognised
//! message resolves to the help response instead.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `LaundryError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! if entry.prices.is_empty() {
//!     return Err(LaundryError::Catalog(format!("Service '{}' has no prices", entry.key)))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the LaundryBot application.
#[derive(Error, Debug)]
pub enum LaundryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Unknown service key '{key}'. Expected one of: wash_iron, iron_only, shoe_wash, bed_linen.")]
    InvalidServiceKey { key: String },

    #[error("Server error: {0}")]
    Server(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
