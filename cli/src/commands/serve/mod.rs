//! # LaundryBot Chat Server
//!
//! File: cli/src/commands/serve/mod.rs
//!
//! ## Overview
//!
//! Exposes the resolver over HTTP for the mobile app's chat screen:
//! - `POST /api/chat` with `{"message": "..."}` returns the reply
//! - `GET /api/services` lists services with prices and process times
//! - `GET /api/suggestions` returns the quick-reply buttons and WhatsApp link
//! - `GET /health` liveness probe
//!
//! The transport (message list, sockets) stays on the app side; each request
//! is one independent call into the resolver.
//!
//! ```bash
//! laundrybot serve
//! laundrybot serve --port 9000 --host 0.0.0.0 --no-cors
//! ```
//!
use super::AppContext;
use crate::core::error::Result;
use tracing::info;

pub use config::ServeArgs;

/// Merges `[server]` settings with command-line flags.
pub mod config;

/// Axum router, handlers and server loop.
pub mod server_logic;

/// Entry point for `laundrybot serve`.
pub async fn handle_serve(args: ServeArgs, ctx: &AppContext) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);
    let config = config::ServerConfig::resolve(&args, &ctx.config.server)?;
    server_logic::run_server(config, ctx.catalog.clone()).await
}
