//! # LaundryBot Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the LaundryBot CLI. Every
//! command is a thin caller of the resolver: it supplies a message and shows
//! the reply. None of them carries resolution logic of its own.
//!
//! ## Command Groups
//!
//! - `ask`: Resolve a single message and print the reply
//! - `catalog`: Print services, prices and process times
//! - `chat`: Interactive terminal chat session
//! - `serve`: HTTP chat endpoint
//!
//! `AppContext` is built once in `main.rs` (configuration plus rendered
//! catalog) and handed to whichever command runs.
//!
use crate::core::config::{self, Config};
use crate::core::error::Result;
use crate::resolver::Catalog;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolves one message given on the command line.
pub mod ask;
/// Prints the service catalog.
pub mod catalog;
/// Interactive chat session with a session-only transcript.
pub mod chat;
/// HTTP server exposing the resolver as a chat endpoint.
pub mod serve;

/// Configuration and catalog shared by every command.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub catalog: Arc<Catalog>,
}

impl AppContext {
    /// Loads configuration (with an optional `--catalog` override) and builds the catalog.
    pub fn load(catalog_override: Option<PathBuf>) -> Result<Self> {
        let config = config::load_config(catalog_override.as_deref())?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let catalog = Catalog::load(&config.assistant)?;
        Ok(Self {
            config,
            catalog: Arc::new(catalog),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AssistantConfig;

    #[test]
    fn test_context_from_default_config_uses_builtin_catalog() {
        let ctx = AppContext::from_config(Config::default()).unwrap();
        assert_eq!(ctx.catalog.services().len(), 4);
        assert_eq!(ctx.catalog.support_contact(), "0812-3456-7890");
    }

    #[test]
    fn test_context_reports_missing_catalog_file() {
        let config = Config {
            assistant: AssistantConfig {
                catalog_path: Some("/definitely/not/here/catalog.toml".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = AppContext::from_config(config).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog file"));
    }
}
