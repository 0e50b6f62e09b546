//! # Autoreply
//!
//! A Rust web service that batch-posts replies to tweets via the Twitter/X API v2.
//! Given a newline-separated list of tweet URLs and a reply message, it posts one
//! reply per URL using OAuth 2.0 User Context authentication and reports a
//! per-URL success/failure outcome.
//!
//! ## Features
//!
//! - HTTP server with batch reply and batch like endpoints (`/reply`, `/like`)
//! - HTML form frontend served at `/`
//! - Twitter/X API v2 integration with OAuth 2.0 User Context authentication
//! - Per-URL error isolation: one failing tweet never aborts the batch
//! - Health check endpoint
//!
//! ## Environment Variables
//!
//! - `ACCESS_TOKEN`: Twitter API Access Token (required, OAuth 2.0 User Context)
//! - `BEARER_TOKEN`, `API_KEY`, `API_SECRET`, `ACCESS_TOKEN_SECRET`: remaining
//!   developer-app credentials (optional)
//! - `PORT`: Server port (defaults to 3000)
//! - `CORS_ALLOW_ORIGIN`: Origin allowed for cross-origin requests (defaults to
//!   `http://localhost:3000`)
//!
//! ## API Endpoints
//!
//! - `GET /`: Serves the HTML batch reply form
//! - `POST /reply`: Posts a reply to each submitted tweet URL
//! - `POST /like`: Likes each submitted tweet URL
//! - `GET /health`: Returns service health status

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use log::info;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod dispatcher;
mod handlers;
mod twitter;

use config::{get_allowed_origin, get_server_port, TwitterConfig};
use handlers::{handle_health, handle_like, handle_reply, handle_root, SharedClient};
use twitter::TwitterApiClient;

/// Main entry point for the autoreply web service.
///
/// This function initializes the logging system, loads the Twitter credentials
/// from the environment, sets up the HTTP server with all routes, and starts
/// listening for incoming requests. The server runs indefinitely until
/// terminated.
///
/// # Server Configuration
///
/// The server is configured with the following routes:
/// - `GET /`: HTML batch reply form
/// - `POST /reply`: Batch reply endpoint
/// - `POST /like`: Batch like endpoint
/// - `GET /health`: Health check endpoint
///
/// # Middleware
///
/// The server includes HTTP request tracing middleware and a CORS layer that
/// allows requests from the single configured origin.
///
/// # Logging
///
/// The application uses the `env_logger` crate for structured logging. Log levels
/// can be controlled via the `RUST_LOG` environment variable.
///
/// # Example Usage
///
/// ```bash
/// # Run with default port 3000
/// ACCESS_TOKEN=... cargo run
///
/// # Run on custom port with debug logging
/// ACCESS_TOKEN=... PORT=8080 RUST_LOG=debug cargo run
/// ```
///
/// # Panics
///
/// This function will panic if:
/// - The server port cannot be bound (e.g., port already in use)
#[tokio::main]
async fn main() {
    // Initialize the logging system
    env_logger::init();

    // Load credentials once at startup; the client handle is shared by every request
    let twitter_config = match TwitterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load Twitter configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client: SharedClient = Arc::new(TwitterApiClient::new(twitter_config));

    // Allow cross-origin requests from exactly one configured origin
    let allowed_origin = get_allowed_origin();
    let origin_value = match HeaderValue::from_str(&allowed_origin) {
        Ok(value) => value,
        Err(e) => {
            log::error!("Invalid CORS_ALLOW_ORIGIN '{}': {}", allowed_origin, e);
            std::process::exit(1);
        }
    };
    info!("Allowing cross-origin requests from {}", allowed_origin);

    let cors = CorsLayer::new()
        .allow_origin(origin_value)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    // Build the HTTP application with all routes and middleware
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/reply", post(handle_reply))
        .route("/like", post(handle_like))
        .route("/health", get(handle_health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(client);

    // Get the server port and bind address
    let port = get_server_port();
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Starting autoreply server on {}", addr);

    // Bind to the address and start serving requests
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("HTTP server error: {}", e);
    }
}

#[cfg(test)]
mod tests;
