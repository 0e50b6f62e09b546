//! Batch dispatching of reply and like operations.
//!
//! This module contains the dispatcher that walks a newline-separated list of
//! tweet URLs and performs one Twitter API call per URL, collecting a
//! per-URL outcome. Calls are sequential; a failed call is recorded in its
//! entry and never aborts the rest of the batch.

use async_trait::async_trait;
use log::{info, warn};
use serde::Serialize;

/// Interface to the social-media posting backend used by the dispatcher.
///
/// The dispatcher and the HTTP handlers are written against this trait so the
/// production service can wire in the real Twitter API client while tests
/// substitute a fake that never touches the network.
#[async_trait]
pub trait SocialPostClient: Send + Sync {
    /// Creates a reply post referencing the given tweet.
    ///
    /// # Parameters
    ///
    /// - `text`: The text content of the reply
    /// - `in_reply_to_tweet_id`: The ID of the tweet being replied to
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The ID of the newly created reply post
    /// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the provider rejects the call
    async fn create_reply(
        &self,
        text: &str,
        in_reply_to_tweet_id: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Likes the given tweet as the authenticated user.
    ///
    /// # Parameters
    ///
    /// - `tweet_id`: The ID of the tweet to like
    ///
    /// # Returns
    ///
    /// - `Ok(())`: If the provider confirmed the like
    /// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the provider rejects the call
    async fn like_tweet(
        &self,
        tweet_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Outcome of one dispatched call.
///
/// One entry is produced per non-blank input line, in input order. Successful
/// replies carry the ID of the created post in `reply_id`; failures carry the
/// stringified provider error in `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    /// The input URL this entry belongs to, as submitted (after trimming)
    pub url: String,
    /// Whether the call succeeded
    pub status: ResultStatus,
    /// The ID of the created reply post (successful replies only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<String>,
    /// The stringified provider error (failures only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResultEntry {
    /// Builds a success entry for `url`, optionally carrying the created post ID.
    fn success(url: &str, reply_id: Option<String>) -> Self {
        ResultEntry {
            url: url.to_string(),
            status: ResultStatus::Success,
            reply_id,
            message: None,
        }
    }

    /// Builds an error entry for `url` carrying the stringified provider error.
    fn error(url: &str, error: &(dyn std::error::Error + Send + Sync)) -> Self {
        ResultEntry {
            url: url.to_string(),
            status: ResultStatus::Error,
            reply_id: None,
            message: Some(error.to_string()),
        }
    }
}

/// Status of a single dispatched call, serialized as `"success"` or `"error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
}

/// Extracts the tweet ID from a tweet URL.
///
/// The extraction is purely syntactic: the final slash-delimited segment of
/// the URL, minus any query string. Malformed URLs are not validated - a
/// nonsensical segment is passed through unchanged and will surface as a
/// provider error in the result entry for that URL.
///
/// # Parameters
///
/// - `url`: The tweet URL to extract the ID from
///
/// # Returns
///
/// The extracted tweet ID as a subslice of `url`.
///
/// # Example
///
/// ```rust
/// use autoreply::extract_tweet_id;
///
/// assert_eq!(
///     extract_tweet_id("https://twitter.com/user/status/12345"),
///     "12345"
/// );
/// assert_eq!(
///     extract_tweet_id("https://twitter.com/user/status/12345?s=20"),
///     "12345"
/// );
/// ```
pub fn extract_tweet_id(url: &str) -> &str {
    let last_segment = match url.rsplit_once('/') {
        Some((_, segment)) => segment,
        None => url,
    };
    match last_segment.split_once('?') {
        Some((id, _)) => id,
        None => last_segment,
    }
}

/// Posts a reply to every tweet in a newline-separated list of URLs.
///
/// The input is split on newlines; each line is trimmed and blank lines are
/// skipped. For every remaining line the tweet ID is extracted and one
/// `create_reply` call is made and awaited before the next line is processed.
/// A failed call is recorded as an error entry for that URL and processing
/// continues; the batch itself never fails.
///
/// # Parameters
///
/// - `client`: The social post client used for the outbound calls
/// - `tweet_urls`: Raw newline-separated tweet URLs
/// - `reply_message`: The text to post as a reply to each tweet
///
/// # Returns
///
/// One `ResultEntry` per non-blank input line, preserving input order.
pub async fn dispatch_replies(
    client: &dyn SocialPostClient,
    tweet_urls: &str,
    reply_message: &str,
) -> Vec<ResultEntry> {
    let mut results = Vec::new();

    for url in tweet_urls.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let tweet_id = extract_tweet_id(url);
        info!("Replying to tweet {} from URL {}", tweet_id, url);

        match client.create_reply(reply_message, tweet_id).await {
            Ok(reply_id) => {
                info!("Created reply {} to tweet {}", reply_id, tweet_id);
                results.push(ResultEntry::success(url, Some(reply_id)));
            }
            Err(e) => {
                warn!("Failed to reply to tweet {}: {}", tweet_id, e);
                results.push(ResultEntry::error(url, e.as_ref()));
            }
        }
    }

    info!("Reply dispatch produced {} entries", results.len());
    results
}

/// Likes every tweet in a newline-separated list of URLs.
///
/// Line handling, ordering and error policy match [`dispatch_replies`]; the
/// only difference is the operation performed per line, so success entries
/// carry no `reply_id`.
///
/// # Parameters
///
/// - `client`: The social post client used for the outbound calls
/// - `tweet_urls`: Raw newline-separated tweet URLs
///
/// # Returns
///
/// One `ResultEntry` per non-blank input line, preserving input order.
pub async fn dispatch_likes(client: &dyn SocialPostClient, tweet_urls: &str) -> Vec<ResultEntry> {
    let mut results = Vec::new();

    for url in tweet_urls.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let tweet_id = extract_tweet_id(url);
        info!("Liking tweet {} from URL {}", tweet_id, url);

        match client.like_tweet(tweet_id).await {
            Ok(()) => {
                info!("Liked tweet {}", tweet_id);
                results.push(ResultEntry::success(url, None));
            }
            Err(e) => {
                warn!("Failed to like tweet {}: {}", tweet_id, e);
                results.push(ResultEntry::error(url, e.as_ref()));
            }
        }
    }

    info!("Like dispatch produced {} entries", results.len());
    results
}
