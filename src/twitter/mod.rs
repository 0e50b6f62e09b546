//! Twitter/X API integration module.
//!
//! This module contains the client for interacting with the Twitter/X API v2,
//! posting replies and liking tweets using OAuth 2.0 User Context
//! authentication.

mod api;
mod client;

// Re-export public API
pub use client::TwitterApiClient;

// Crate-internal re-exports (used by tests)
#[allow(unused_imports)]
pub(crate) use api::sanitize_for_logging;
