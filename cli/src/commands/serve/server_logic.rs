//! # LaundryBot HTTP Server Implementation
//!
//! File: cli/src/commands/serve/server_logic.rs
//!
//! ## Overview
//!
//! Builds the Axum router around a shared `Resolver` and runs it:
//! 1. Find an available port (the requested one, or the next free one)
//! 2. Set up the router with tracing and CORS middleware
//! 3. Print connection information
//! 4. Serve until Ctrl+C / SIGTERM
//!
//! The resolver is immutable, so handlers share it through an `Arc` without
//! any locking.
//!
use super::config::ServerConfig;
use crate::core::error::{LaundryError, Result};
use crate::resolver::catalog::ServiceCatalogEntry;
use crate::resolver::{Catalog, Category, Resolver, ServiceKey};
use anyhow::anyhow;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, error, info, warn, Level};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    resolver: Arc<Resolver>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub category: Option<Category>,
    pub service: Option<ServiceKey>,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsBody {
    pub suggestions: Vec<String>,
    pub contact: String,
    pub whatsapp_link: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error returned by handlers; rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// # Run HTTP Server (`run_server`)
///
/// Binds the first free port at or after the configured one, prints the
/// endpoints and serves until a shutdown signal arrives.
pub async fn run_server(config: ServerConfig, catalog: Arc<Catalog>) -> Result<()> {
    let max_port_attempts = 10;
    let addr = find_available_port(config.host, config.port, max_port_attempts).await?;

    let app = create_app(&config, catalog);

    println!("\n=================================================================");
    println!("💬 LaundryBot chat endpoint: http://{}/api/chat", addr);
    println!("🧺 Services:                 http://{}/api/services", addr);
    println!("💡 Suggestions:              http://{}/api/suggestions", addr);
    println!("🔒 CORS enabled:             {}", config.enable_cors);
    println!("=================================================================\n");

    info!("Starting server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        LaundryError::Server(format!(
            "Failed to bind TCP listener to address {}: {}",
            addr, e
        ))
    })?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| LaundryError::Server(format!("HTTP server failed: {}", e)))?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves when Ctrl+C (or SIGTERM on Unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port` and up to `max_attempts - 1` following ports, returning
/// the first address that can be bound.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(port) => port,
                    None => break,
                };
            }
        }
    }

    Err(anyhow!(LaundryError::Server(format!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host, start_port, max_attempts
    ))))
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router with the chat, services and suggestions routes plus
/// tracing and CORS middleware.
pub fn create_app(config: &ServerConfig, catalog: Arc<Catalog>) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let state = AppState {
        resolver: Arc::new(Resolver::new(catalog)),
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/services", get(services))
        .route("/api/suggestions", get(suggestions))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer),
        )
}

async fn health() -> &'static str {
    "ok"
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> std::result::Result<Json<ChatReply>, ApiError> {
    if request.message.trim().is_empty() {
        debug!("Rejecting empty chat message");
        return Err(ApiError {
            status: StatusCode::BAD_REQUEST,
            message: "message cannot be empty".to_string(),
        });
    }
    let resolution = state.resolver.explain(&request.message);
    Ok(Json(ChatReply {
        reply: resolution.reply,
        category: resolution.category,
        service: resolution.service,
        sent_at: Utc::now(),
    }))
}

async fn services(State(state): State<AppState>) -> Json<Vec<ServiceCatalogEntry>> {
    Json(state.resolver.catalog().services().to_vec())
}

async fn suggestions(State(state): State<AppState>) -> Json<SuggestionsBody> {
    let catalog = state.resolver.catalog();
    Json(SuggestionsBody {
        suggestions: catalog.suggestions().to_vec(),
        contact: catalog.support_contact().to_string(),
        whatsapp_link: catalog.whatsapp_link(),
    })
}
