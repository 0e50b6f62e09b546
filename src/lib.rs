//! # Autoreply Library
//!
//! A Rust web service library that batch-posts replies to tweets via the
//! Twitter/X API v2 using OAuth 2.0 User Context Access Token authentication.
//!
//! ## Features
//!
//! - HTTP server with a batch reply endpoint, a batch like endpoint, and a health check
//! - Twitter/X API v2 integration with OAuth 2.0 User Context Access Token authentication
//! - Per-URL success/failure reporting, batch never aborted by a single failure
//! - Comprehensive test suite with an injectable fake client
//! - Structured logging
//!
//! ## Configuration
//!
//! The following environment variables are used:
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

pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod twitter;

// Re-export commonly used types and functions
pub use config::{get_allowed_origin, get_server_port, TwitterConfig};
pub use dispatcher::{
    dispatch_likes, dispatch_replies, extract_tweet_id, ResultEntry, ResultStatus,
    SocialPostClient,
};
pub use handlers::{handle_health, handle_like, handle_reply, handle_root, SharedClient};
pub use twitter::TwitterApiClient;

#[cfg(test)]
mod tests;
