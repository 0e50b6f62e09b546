//! # Tests Module
//!
//! This module contains comprehensive tests for the autoreply web service.
//! It includes unit tests for individual functions and integration tests for
//! HTTP endpoints.
//!
//! ## Test Categories
//!
//! ### Unit Tests
//! - Tweet ID extraction (`extract_tweet_id`)
//! - Batch dispatching (`dispatch_replies`, `dispatch_likes`)
//! - Configuration loading (`get_server_port`, `get_allowed_origin`)
//! - Credential masking and log sanitizing helpers
//!
//! ### Integration Tests
//! - HTTP endpoint testing for all routes
//! - Request/response validation
//! - Error handling verification
//!
//! ## Test Environment
//!
//! The endpoint tests run against a router wired to a fake social post client,
//! so no test ever talks to the Twitter API.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::{get_allowed_origin, get_server_port, mask_credential, TwitterConfig};
use crate::dispatcher::{
    dispatch_likes, dispatch_replies, extract_tweet_id, ResultStatus, SocialPostClient,
};
use crate::handlers::{handle_health, handle_like, handle_reply, handle_root, SharedClient};
use crate::twitter::sanitize_for_logging;

/// A fake social post client that records calls and never touches the network.
///
/// Tweet IDs listed in `failing_ids` produce an error; every other ID
/// succeeds, with replies returning `reply-<tweet id>` as the created post ID.
struct FakeSocialClient {
    failing_ids: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeSocialClient {
    /// Creates a fake client for which every call succeeds.
    fn new() -> Self {
        Self::failing_on(&[])
    }

    /// Creates a fake client that fails for the given tweet IDs.
    fn failing_on(ids: &[&str]) -> Self {
        FakeSocialClient {
            failing_ids: ids.iter().map(|id| id.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the tweet IDs called so far, in call order.
    fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SocialPostClient for FakeSocialClient {
    async fn create_reply(
        &self,
        _text: &str,
        in_reply_to_tweet_id: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.calls
            .lock()
            .unwrap()
            .push(in_reply_to_tweet_id.to_string());

        if self.failing_ids.iter().any(|id| id == in_reply_to_tweet_id) {
            return Err(format!("provider rejected tweet {}", in_reply_to_tweet_id).into());
        }
        Ok(format!("reply-{}", in_reply_to_tweet_id))
    }

    async fn like_tweet(
        &self,
        tweet_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.calls.lock().unwrap().push(tweet_id.to_string());

        if self.failing_ids.iter().any(|id| id == tweet_id) {
            return Err(format!("provider rejected tweet {}", tweet_id).into());
        }
        Ok(())
    }
}

/// Creates a test application instance with all routes configured.
///
/// This helper function sets up a minimal Axum router with all the same routes
/// as the main application, but without middleware layers that might interfere
/// with testing, wired to the given client.
///
/// # Returns
///
/// An Axum `Router` instance configured with all application routes.
fn create_test_app(client: SharedClient) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/reply", post(handle_reply))
        .route("/like", post(handle_like))
        .route("/health", get(handle_health))
        .with_state(client)
}

/// Sends a form-encoded POST request to the given app and parses the JSON response.
///
/// Asserts that the response status is 200 OK.
async fn post_form(app: Router, uri: &str, fields: &[(&str, &str)]) -> Value {
    let body = serde_urlencoded::to_string(fields).unwrap();

    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Unit test for the extract_tweet_id function.
///
/// This test verifies the tweet ID extraction required for reply targeting:
/// the final path segment of the URL, minus any query string.
#[test]
fn test_extract_tweet_id() {
    assert_eq!(
        extract_tweet_id("https://twitter.com/user/status/12345"),
        "12345"
    );
    assert_eq!(
        extract_tweet_id("https://twitter.com/user/status/12345?s=20"),
        "12345"
    );
    assert_eq!(
        extract_tweet_id("https://x.com/user/status/67890?s=46&t=abc"),
        "67890"
    );
}

/// Unit test for extract_tweet_id with malformed input.
///
/// Malformed URLs are not validated: the extraction stays purely syntactic and
/// whatever it produces is passed to the provider unchanged.
#[test]
fn test_extract_tweet_id_malformed_input() {
    // No slashes at all: the whole string is the "segment"
    assert_eq!(extract_tweet_id("12345"), "12345");
    assert_eq!(extract_tweet_id("not a url"), "not a url");

    // Trailing slash yields an empty segment
    assert_eq!(extract_tweet_id("https://twitter.com/user/status/"), "");

    // Query string on a non-numeric segment is still stripped
    assert_eq!(extract_tweet_id("https://x.com/about?lang=en"), "about");
}

/// Unit test for dispatch_replies with a fully successful batch.
///
/// This test verifies that:
/// - One entry is produced per non-blank input line, in input order
/// - Each success entry carries the reply ID returned by the client
/// - Calls are made in input order
#[tokio::test]
async fn test_dispatch_replies_success_order() {
    let client = FakeSocialClient::new();
    let input = "https://twitter.com/a/status/111\nhttps://twitter.com/b/status/222\nhttps://twitter.com/c/status/333";

    let results = dispatch_replies(&client, input, "hello").await;

    assert_eq!(results.len(), 3);
    for (entry, id) in results.iter().zip(["111", "222", "333"]) {
        assert_eq!(entry.status, ResultStatus::Success);
        assert_eq!(entry.reply_id, Some(format!("reply-{}", id)));
        assert_eq!(entry.message, None);
        assert!(entry.url.contains(id));
    }
    assert_eq!(client.recorded_calls(), vec!["111", "222", "333"]);
}

/// Unit test for dispatch_replies blank line handling.
///
/// Blank lines, including lines of only whitespace, are excluded from the
/// output; surrounding whitespace on URL lines is trimmed.
#[tokio::test]
async fn test_dispatch_replies_skips_blank_lines() {
    let client = FakeSocialClient::new();
    let input = "\nhttps://twitter.com/a/status/111\n\n   \n\t\n  https://twitter.com/b/status/222  \n";

    let results = dispatch_replies(&client, input, "hello").await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, "https://twitter.com/a/status/111");
    assert_eq!(results[1].url, "https://twitter.com/b/status/222");
}

/// Unit test for dispatch_replies error isolation.
///
/// A client error for one URL is recorded as that entry's stringified error
/// message; the other entries are unaffected and processing continues.
#[tokio::test]
async fn test_dispatch_replies_error_isolation() {
    let client = FakeSocialClient::failing_on(&["222"]);
    let input = "https://twitter.com/a/status/111\nhttps://twitter.com/b/status/222\nhttps://twitter.com/c/status/333";

    let results = dispatch_replies(&client, input, "hello").await;

    assert_eq!(results.len(), 3);

    assert_eq!(results[0].status, ResultStatus::Success);
    assert_eq!(results[0].reply_id, Some("reply-111".to_string()));

    assert_eq!(results[1].status, ResultStatus::Error);
    assert_eq!(results[1].reply_id, None);
    assert_eq!(
        results[1].message,
        Some("provider rejected tweet 222".to_string())
    );

    assert_eq!(results[2].status, ResultStatus::Success);
    assert_eq!(results[2].reply_id, Some("reply-333".to_string()));

    // The failing URL did not stop the batch
    assert_eq!(client.recorded_calls(), vec!["111", "222", "333"]);
}

/// Unit test for dispatch_replies with empty input.
///
/// Input with zero non-blank lines yields an empty results sequence and no
/// client calls.
#[tokio::test]
async fn test_dispatch_replies_empty_input() {
    let client = FakeSocialClient::new();

    assert!(dispatch_replies(&client, "", "hello").await.is_empty());
    assert!(dispatch_replies(&client, "\n  \n\t\n", "hello").await.is_empty());
    assert!(client.recorded_calls().is_empty());
}

/// Unit test for dispatch_likes.
///
/// This test verifies that like entries follow the same per-line and error
/// isolation rules as replies, and that success entries carry no reply ID.
#[tokio::test]
async fn test_dispatch_likes() {
    let client = FakeSocialClient::failing_on(&["222"]);
    let input = "https://twitter.com/a/status/111\nhttps://twitter.com/b/status/222";

    let results = dispatch_likes(&client, input).await;

    assert_eq!(results.len(), 2);

    assert_eq!(results[0].status, ResultStatus::Success);
    assert_eq!(results[0].reply_id, None);
    assert_eq!(results[0].message, None);

    assert_eq!(results[1].status, ResultStatus::Error);
    assert_eq!(
        results[1].message,
        Some("provider rejected tweet 222".to_string())
    );
}

/// Unit test for ResultEntry serialization.
///
/// Success entries must omit the `message` field and error entries must omit
/// the `reply_id` field; the status serializes lowercase.
#[tokio::test]
async fn test_result_entry_serialization() {
    let client = FakeSocialClient::failing_on(&["222"]);
    let input = "https://twitter.com/a/status/111\nhttps://twitter.com/b/status/222";

    let results = dispatch_replies(&client, input, "hello").await;
    let json = serde_json::to_value(&results).unwrap();

    assert_eq!(json[0]["status"], "success");
    assert_eq!(json[0]["reply_id"], "reply-111");
    assert!(json[0].get("message").is_none());

    assert_eq!(json[1]["status"], "error");
    assert_eq!(json[1]["message"], "provider rejected tweet 222");
    assert!(json[1].get("reply_id").is_none());
}

/// Tests the health endpoint handler function directly.
///
/// This test verifies that the `handle_health` function returns a properly
/// formatted JSON response with the correct status and service name.
#[tokio::test]
async fn test_handle_health() {
    let response = handle_health().await;
    let Json(json_response): Json<Value> = response;

    assert_eq!(json_response["status"], "healthy");
    assert_eq!(json_response["service"], "autoreply");
}

/// Integration test for the root endpoint (GET /).
///
/// This test makes an actual HTTP request to the root endpoint and verifies:
/// - The response status is 200 OK
/// - The response body is the HTML form with both form fields present
#[tokio::test]
async fn test_root_endpoint() {
    let app = create_test_app(Arc::new(FakeSocialClient::new()));

    let request = Request::builder()
        .uri("/")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8(body.to_vec()).unwrap();
    assert!(body_str.contains("<!DOCTYPE html>"));
    assert!(body_str.contains("name=\"tweet_urls\""));
    assert!(body_str.contains("name=\"reply_message\""));
    assert!(body_str.contains("action=\"/like\""));
}

/// Integration test for the health endpoint (GET /health).
///
/// This test makes an actual HTTP request to the health endpoint and verifies:
/// - The response status is 200 OK
/// - The response is valid JSON
/// - The JSON contains the expected status and service fields
#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(Arc::new(FakeSocialClient::new()));

    let request = Request::builder()
        .uri("/health")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json_response: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json_response["status"], "healthy");
    assert_eq!(json_response["service"], "autoreply");
}

/// Integration test for the reply endpoint (POST /reply).
///
/// This test submits a form with two URLs, one of which the fake client
/// rejects, and verifies the JSON response shape: one entry per URL in input
/// order, a success entry with a reply_id, and an error entry carrying the
/// stringified client error.
#[tokio::test]
async fn test_reply_endpoint() {
    let app = create_test_app(Arc::new(FakeSocialClient::failing_on(&["222"])));

    let json_response = post_form(
        app,
        "/reply",
        &[
            (
                "tweet_urls",
                "https://twitter.com/a/status/111\nhttps://twitter.com/b/status/222",
            ),
            ("reply_message", "thanks for sharing!"),
        ],
    )
    .await;

    let results = json_response["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0]["url"], "https://twitter.com/a/status/111");
    assert_eq!(results[0]["status"], "success");
    assert_eq!(results[0]["reply_id"], "reply-111");

    assert_eq!(results[1]["url"], "https://twitter.com/b/status/222");
    assert_eq!(results[1]["status"], "error");
    assert_eq!(results[1]["message"], "provider rejected tweet 222");
}

/// Integration test for the reply endpoint with empty input.
///
/// Submitting a form with no non-blank URL lines yields HTTP 200 and an empty
/// results array.
#[tokio::test]
async fn test_reply_endpoint_empty_input() {
    let app = create_test_app(Arc::new(FakeSocialClient::new()));

    let json_response = post_form(
        app,
        "/reply",
        &[("tweet_urls", "\n   \n"), ("reply_message", "hello")],
    )
    .await;

    let results = json_response["results"].as_array().unwrap();
    assert!(results.is_empty());
}

/// Integration test for the like endpoint (POST /like).
///
/// This test submits a form with one URL and verifies the response entry has
/// status success and carries no reply_id field.
#[tokio::test]
async fn test_like_endpoint() {
    let app = create_test_app(Arc::new(FakeSocialClient::new()));

    let json_response = post_form(
        app,
        "/like",
        &[("tweet_urls", "https://twitter.com/a/status/111")],
    )
    .await;

    let results = json_response["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["url"], "https://twitter.com/a/status/111");
    assert_eq!(results[0]["status"], "success");
    assert!(results[0].get("reply_id").is_none());
}

/// Unit test for the get_server_port function.
///
/// This test verifies that the server port configuration function:
/// - Returns the default port (3000) when PORT environment variable is not set
/// - Correctly parses and returns custom port values from environment
/// - Properly cleans up environment variables after testing
#[test]
fn test_get_server_port() {
    // Test default port
    std::env::remove_var("PORT");
    let port = get_server_port();
    assert_eq!(port, 3000);

    // Test custom port
    std::env::set_var("PORT", "8080");
    let port = get_server_port();
    assert_eq!(port, 8080);

    // Clean up
    std::env::remove_var("PORT");
}

/// Unit test for the get_allowed_origin function.
///
/// This test verifies the default CORS origin and the environment override.
#[test]
fn test_get_allowed_origin() {
    // Test default origin
    std::env::remove_var("CORS_ALLOW_ORIGIN");
    assert_eq!(get_allowed_origin(), "http://localhost:3000");

    // Test custom origin
    std::env::set_var("CORS_ALLOW_ORIGIN", "https://example.com");
    assert_eq!(get_allowed_origin(), "https://example.com");

    // Clean up
    std::env::remove_var("CORS_ALLOW_ORIGIN");
}

/// Unit test for the mask_credential function.
///
/// Long credentials keep an 8-character prefix and suffix; short credentials
/// never reveal more than their first 8 characters.
#[test]
fn test_mask_credential() {
    assert_eq!(
        mask_credential("abcdefgh0123456789ZYXWVUTS"),
        "abcdefgh...ZYXWVUTS"
    );
    assert_eq!(mask_credential("abcdefghij"), "abcdefgh...");
    assert_eq!(mask_credential("abc"), "abc...");
}

/// Unit test for TwitterConfig::has_full_credential_set.
///
/// The full set requires every optional credential in addition to the access
/// token.
#[test]
fn test_has_full_credential_set() {
    let full = TwitterConfig {
        access_token: "token".to_string(),
        bearer_token: Some("bearer".to_string()),
        api_key: Some("key".to_string()),
        api_secret: Some("secret".to_string()),
        access_token_secret: Some("token_secret".to_string()),
    };
    assert!(full.has_full_credential_set());

    let partial = TwitterConfig {
        bearer_token: None,
        ..full
    };
    assert!(!partial.has_full_credential_set());
}

/// Unit test for the sanitize_for_logging function.
///
/// Control characters are scrubbed, newlines become spaces, and long text is
/// truncated with a byte count.
#[test]
fn test_sanitize_for_logging() {
    assert_eq!(sanitize_for_logging("plain text", 100), "plain text");
    assert_eq!(
        sanitize_for_logging("line one\nline two\r\tend", 100),
        "line one line two  end"
    );
    assert_eq!(sanitize_for_logging("a\x1b[31mb", 100), "a?[31mb");

    let long_text = "x".repeat(300);
    let sanitized = sanitize_for_logging(&long_text, 200);
    assert!(sanitized.starts_with(&"x".repeat(200)));
    assert!(sanitized.ends_with("[truncated, 300 total bytes]"));
}
