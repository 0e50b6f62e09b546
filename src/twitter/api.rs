//! Core Twitter API utilities.
//!
//! This module contains low-level utilities shared by the Twitter API client:
//! authorization header construction, response handling, and log sanitizing.

use log::{debug, error, info};

/// Builds the Authorization header for OAuth 2.0 User Context authentication.
///
/// This function creates the proper Authorization header for OAuth 2.0 User Context
/// authentication, which is required for Twitter API v2 endpoints that perform
/// user-specific operations like posting replies and liking tweets.
///
/// # Parameters
///
/// - `access_token`: The Access Token obtained through OAuth 2.0 Authorization Code Flow
///
/// # Returns
///
/// A properly formatted Authorization header string for OAuth 2.0 User Context authentication.
///
/// # Format
///
/// The header follows this format:
/// ```text
/// Bearer YOUR_ACCESS_TOKEN_HERE
/// ```
pub(crate) fn build_oauth2_user_context_header(access_token: &str) -> String {
    format!("Bearer {}", access_token)
}

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// This function:
/// - Truncates long text to prevent log flooding
/// - Replaces control characters that could manipulate log output
/// - Escapes newlines to prevent log injection
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum length before truncation
///
/// # Returns
///
/// A sanitized string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    // Replace control characters and newlines to prevent log injection
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' => ' ',
            '\r' => ' ',
            '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.len() > max_len {
        format!(
            "{}... [truncated, {} total bytes]",
            &sanitized[..max_len],
            text.len()
        )
    } else {
        sanitized
    }
}

/// Sends a prepared request to the Twitter API and returns the response body.
///
/// This helper handles the common pattern of sending an authenticated request,
/// logging the outcome, and converting non-success status codes into errors
/// that carry the status and a sanitized excerpt of the response body.
///
/// # Parameters
///
/// - `request_builder`: A configured reqwest::RequestBuilder ready to send
/// - `operation_name`: Human-readable name for the operation (for logging and errors)
///
/// # Returns
///
/// - `Ok(String)`: The API response body on success
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the request fails or the API returns an error status
pub(crate) async fn send_api_request(
    request_builder: reqwest::RequestBuilder,
    operation_name: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    info!(
        "Making authenticated request for operation: {}",
        operation_name
    );

    let response = request_builder.send().await?;
    let status = response.status();
    info!(
        "Received response with status: {} for operation: {}",
        status, operation_name
    );

    if status.is_success() {
        let response_text = response.text().await?;
        info!("Operation '{}' completed successfully", operation_name);
        debug!(
            "Response summary for '{}': {} bytes received",
            operation_name,
            response_text.len()
        );
        return Ok(response_text);
    }

    let error_text = response.text().await?;
    error!("Operation '{}' failed - Status: {}", operation_name, status);
    Err(format!(
        "Twitter API error for operation '{}' ({}): {}",
        operation_name,
        status,
        sanitize_for_logging(&error_text, 200)
    )
    .into())
}
