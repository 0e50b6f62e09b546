//! Twitter/X API v2 client.
//!
//! This module contains the reqwest-based client that performs the actual
//! Twitter API calls: creating reply posts and liking tweets using OAuth 2.0
//! User Context authentication.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::json;
use tokio::sync::Mutex;

use crate::config::TwitterConfig;
use crate::dispatcher::SocialPostClient;

use super::api::{build_oauth2_user_context_header, send_api_request};

/// Base URL of the Twitter API v2.
const API_BASE_URL: &str = "https://api.x.com/2";

/// Twitter/X API v2 client.
///
/// Holds one long-lived `reqwest::Client` that is reused for every call made
/// during the lifetime of the process, together with the credentials loaded at
/// startup. The client is constructed once in `main` and shared across
/// requests behind an `Arc`.
pub struct TwitterApiClient {
    http: Client,
    config: TwitterConfig,
    /// ID of the authenticated user, resolved on first use and then reused.
    user_id: Mutex<Option<String>>,
}

impl TwitterApiClient {
    /// Creates a new client from a loaded Twitter configuration.
    ///
    /// # Parameters
    ///
    /// - `config`: The credential set loaded from the environment
    ///
    /// # Returns
    ///
    /// A client ready to perform authenticated Twitter API v2 calls.
    pub fn new(config: TwitterConfig) -> Self {
        TwitterApiClient {
            http: Client::new(),
            config,
            user_id: Mutex::new(None),
        }
    }

    /// Returns the ID of the authenticated user, resolving it on first use.
    ///
    /// The ID is looked up via `GET /2/users/me` the first time it is needed
    /// (liking a tweet requires it) and cached for all subsequent calls.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The authenticated user's ID
    /// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the lookup fails
    async fn authenticated_user_id(
        &self,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let mut cached = self.user_id.lock().await;
        if let Some(id) = cached.as_ref() {
            debug!("Using cached authenticated user ID {}", id);
            return Ok(id.clone());
        }

        info!("Looking up the authenticated user");

        let url = format!("{}/users/me", API_BASE_URL);
        let auth_header = build_oauth2_user_context_header(&self.config.access_token);
        let request_builder = self.http.get(&url).header("Authorization", auth_header);

        let response_text = send_api_request(request_builder, "users_me").await?;
        let json_response: serde_json::Value = serde_json::from_str(&response_text)?;

        let user_id = json_response
            .get("data")
            .and_then(|data| data.get("id"))
            .and_then(|id| id.as_str())
            .ok_or("Twitter API response for users/me did not contain data.id")?
            .to_string();

        info!("Authenticated as user {}", user_id);
        *cached = Some(user_id.clone());
        Ok(user_id)
    }
}

#[async_trait]
impl SocialPostClient for TwitterApiClient {
    /// Creates a reply to a tweet using the Twitter/X API v2 endpoint.
    ///
    /// This posts a reply to an existing tweet by including the `reply`
    /// parameter in the tweet payload, authenticated with the OAuth 2.0 User
    /// Context Access Token, and returns the ID of the created post.
    async fn create_reply(
        &self,
        text: &str,
        in_reply_to_tweet_id: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        info!("Starting reply operation to tweet {}", in_reply_to_tweet_id);

        let url = format!("{}/tweets", API_BASE_URL);
        debug!("Target URL: {}", url);

        // Create the reply payload
        let payload = json!({
            "text": text,
            "reply": {
                "in_reply_to_tweet_id": in_reply_to_tweet_id
            }
        });
        debug!("Reply payload: {}", serde_json::to_string_pretty(&payload)?);

        // Build the Authorization header with OAuth 2.0 User Context Access Token
        let auth_header = build_oauth2_user_context_header(&self.config.access_token);
        debug!("Request headers: Authorization: Bearer [REDACTED], Content-Type: application/json");

        let request_builder = self
            .http
            .post(&url)
            .header("Authorization", auth_header)
            .header("Content-Type", "application/json")
            .json(&payload);

        let response_text = send_api_request(request_builder, "create_reply").await?;
        let json_response: serde_json::Value = serde_json::from_str(&response_text)?;

        let reply_id = json_response
            .get("data")
            .and_then(|data| data.get("id"))
            .and_then(|id| id.as_str())
            .ok_or("Twitter API response did not contain data.id")?
            .to_string();

        info!(
            "Created reply {} to tweet {}",
            reply_id, in_reply_to_tweet_id
        );
        Ok(reply_id)
    }

    /// Likes a tweet as the authenticated user using the Twitter/X API v2 endpoint.
    ///
    /// The authenticated user's ID is resolved (and cached) first because the
    /// likes endpoint is addressed by user: `POST /2/users/:id/likes`.
    async fn like_tweet(
        &self,
        tweet_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Starting like operation for tweet {}", tweet_id);

        let user_id = self.authenticated_user_id().await?;
        let url = format!("{}/users/{}/likes", API_BASE_URL, user_id);
        debug!("Target URL: {}", url);

        let payload = json!({
            "tweet_id": tweet_id
        });

        let auth_header = build_oauth2_user_context_header(&self.config.access_token);
        let request_builder = self
            .http
            .post(&url)
            .header("Authorization", auth_header)
            .header("Content-Type", "application/json")
            .json(&payload);

        let response_text = send_api_request(request_builder, "like_tweet").await?;
        let json_response: serde_json::Value = serde_json::from_str(&response_text)?;

        let liked = json_response
            .get("data")
            .and_then(|data| data.get("liked"))
            .and_then(|liked| liked.as_bool())
            .unwrap_or(false);

        if !liked {
            return Err(format!("Twitter API did not confirm the like for tweet {}", tweet_id).into());
        }

        info!("Liked tweet {}", tweet_id);
        Ok(())
    }
}
