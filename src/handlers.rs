//! HTTP route handlers for the autoreply service.
//!
//! This module contains all the HTTP route handler functions that process
//! incoming requests and return appropriate responses.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Json},
    Form,
};
use log::info;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::dispatcher::{dispatch_likes, dispatch_replies, SocialPostClient};

/// Shared handler state: the social post client used for all outbound calls.
///
/// The client is constructed once at startup and injected into the router,
/// which lets the endpoint tests substitute a fake client.
pub type SharedClient = Arc<dyn SocialPostClient>;

/// Form body of the `POST /reply` endpoint.
#[derive(Debug, Deserialize)]
pub struct ReplyForm {
    /// Newline-separated tweet URLs
    pub tweet_urls: String,
    /// The text to post as a reply to each tweet
    pub reply_message: String,
}

/// Form body of the `POST /like` endpoint.
#[derive(Debug, Deserialize)]
pub struct LikeForm {
    /// Newline-separated tweet URLs
    pub tweet_urls: String,
}

/// Handles GET requests to the root `/` endpoint.
///
/// This endpoint serves the HTML form used to submit a batch of tweet URLs
/// together with a reply message, plus a smaller form for batch likes.
///
/// # Returns
///
/// The static HTML form page.
pub async fn handle_root() -> Html<&'static str> {
    info!("Serving the batch reply form");
    Html(FORM_PAGE)
}

/// Handles GET requests to the `/health` endpoint.
///
/// This endpoint provides a health check for the service, returning the current
/// status and service name. It's commonly used by load balancers and monitoring
/// systems to verify that the service is running and responsive.
///
/// # Returns
///
/// A JSON response containing:
/// - `status`: Always "healthy" when the service is running
/// - `service`: The service name "autoreply"
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "autoreply"
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "autoreply"}))
}

/// Handles POST requests to the `/reply` endpoint.
///
/// This endpoint accepts a form-encoded body with `tweet_urls` (newline
/// separated) and `reply_message`, posts one reply per non-blank URL through
/// the shared client, and returns the per-URL outcomes. Per-URL failures are
/// recorded in their entries and never fail the request, so the response is
/// always `200 OK`.
///
/// # Returns
///
/// A JSON response of the form:
///
/// ```json
/// {
///   "results": [
///     {"url": "...", "status": "success", "reply_id": "..."},
///     {"url": "...", "status": "error", "message": "..."}
///   ]
/// }
/// ```
pub async fn handle_reply(
    State(client): State<SharedClient>,
    Form(form): Form<ReplyForm>,
) -> Json<Value> {
    info!("Received batch reply request");

    let results = dispatch_replies(client.as_ref(), &form.tweet_urls, &form.reply_message).await;

    info!("Batch reply request finished with {} entries", results.len());
    Json(json!({ "results": results }))
}

/// Handles POST requests to the `/like` endpoint.
///
/// This endpoint accepts a form-encoded body with `tweet_urls` (newline
/// separated), likes each non-blank URL's tweet through the shared client,
/// and returns the per-URL outcomes in the same shape as `/reply` (success
/// entries carry no `reply_id`).
///
/// # Returns
///
/// A JSON response of the form `{"results": [...]}`; always `200 OK`.
pub async fn handle_like(
    State(client): State<SharedClient>,
    Form(form): Form<LikeForm>,
) -> Json<Value> {
    info!("Received batch like request");

    let results = dispatch_likes(client.as_ref(), &form.tweet_urls).await;

    info!("Batch like request finished with {} entries", results.len());
    Json(json!({ "results": results }))
}

/// The HTML form page served at the root endpoint.
const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Autoreply - Batch Tweet Replies</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
        }
        .container {
            max-width: 700px;
            margin: 0 auto;
            background-color: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        h1 {
            color: #333;
            margin-top: 0;
        }
        h2 {
            color: #555;
            margin-top: 30px;
        }
        label {
            display: block;
            margin-top: 15px;
            font-weight: 600;
            color: #555;
        }
        textarea {
            width: 100%;
            margin-top: 5px;
            padding: 10px;
            border: 1px solid #ddd;
            border-radius: 4px;
            font-family: inherit;
            box-sizing: border-box;
        }
        button {
            margin-top: 15px;
            padding: 10px 20px;
            background-color: #1d9bf0;
            color: white;
            border: none;
            border-radius: 4px;
            font-size: 15px;
            cursor: pointer;
        }
        button:hover {
            background-color: #1a8cd8;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Batch Tweet Replies</h1>
        <form method="post" action="/reply">
            <label for="tweet_urls">Tweet URLs (one per line)</label>
            <textarea id="tweet_urls" name="tweet_urls" rows="8" placeholder="https://twitter.com/user/status/12345"></textarea>
            <label for="reply_message">Reply message</label>
            <textarea id="reply_message" name="reply_message" rows="3" placeholder="Your reply text"></textarea>
            <button type="submit">Send replies</button>
        </form>
        <h2>Batch Likes</h2>
        <form method="post" action="/like">
            <label for="like_urls">Tweet URLs to like (one per line)</label>
            <textarea id="like_urls" name="tweet_urls" rows="4" placeholder="https://twitter.com/user/status/12345"></textarea>
            <button type="submit">Like tweets</button>
        </form>
    </div>
</body>
</html>"#;
