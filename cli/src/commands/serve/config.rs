//! # LaundryBot Server Configuration
//!
//! File: cli/src/commands/serve/config.rs
//!
//! ## Overview
//!
//! Combines the `[server]` section of the configuration with command-line
//! flags into the effective `ServerConfig`:
//! 1. Command-line arguments (highest priority)
//! 2. `[server]` in `.laundrybot.toml` / user `config.toml`
//! 3. Default values (lowest priority)
//!
use crate::core::config::ServerDefaults;
use crate::core::error::{LaundryError, Result};
use anyhow::anyhow;
use clap::Parser;
use std::net::IpAddr;
use tracing::debug;

/// Arguments for `laundrybot serve`.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Port to listen on. Defaults to the configured port (8080).
    #[arg(long, short)]
    pub port: Option<u16>,

    /// IP address to bind to. Use `0.0.0.0` for all interfaces.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Do not send CORS headers.
    #[arg(long)]
    pub no_cors: bool,
}

/// Effective server settings after merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub enable_cors: bool,
}

impl ServerConfig {
    pub fn resolve(args: &ServeArgs, defaults: &ServerDefaults) -> Result<Self> {
        let host = match args.host {
            Some(host) => host,
            None => defaults.host().parse().map_err(|e| {
                anyhow!(LaundryError::Config(format!(
                    "Invalid server host '{}': {}",
                    defaults.host(),
                    e
                )))
            })?,
        };
        let config = Self {
            host,
            port: args.port.unwrap_or_else(|| defaults.port()),
            enable_cors: defaults.enable_cors() && !args.no_cors,
        };
        debug!("Effective server config: {:?}", config);
        Ok(config)
    }
}
