//! Twitter Reply Posting Script
//!
//! This script allows you to post a single reply to a tweet by providing
//! your access token, the target tweet ID and the message you want to post.

use std::io::{self, Write};

/// Builds the Authorization header for OAuth 2.0 User Context authentication.
///
/// This function creates the proper Authorization header for OAuth 2.0 User Context
/// authentication, which is required for Twitter API v2 endpoints that perform
/// user-specific operations like posting replies.
///
/// # Parameters
///
/// - `access_token`: The Access Token obtained through OAuth 2.0 Authorization Code Flow
///
/// # Returns
///
/// A properly formatted Authorization header string for OAuth 2.0 User Context authentication.
fn build_oauth2_user_context_header(access_token: &str) -> String {
    let header = format!("Bearer {}", access_token);
    println!("🔑 Authorization header built successfully");
    header
}

/// Posts a reply to a tweet using the Twitter/X API v2 endpoint.
///
/// This function uses OAuth 2.0 User Context authentication to post a reply
/// to the Twitter/X API v2 endpoint. It builds the proper authorization header
/// and sends the request with the reply content and target tweet ID.
///
/// # Parameters
///
/// - `access_token`: The OAuth 2.0 User Context Access Token
/// - `text`: The text content of the reply to post
/// - `reply_to_tweet_id`: The ID of the tweet to reply to
///
/// # Returns
///
/// - `Ok(String)`: The API response body on successful reply posting
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If authentication fails, network error, or API error
async fn post_reply(
    access_token: &str,
    text: &str,
    reply_to_tweet_id: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    println!(
        "🚀 Starting reply operation to tweet {} with text: '{}'",
        reply_to_tweet_id, text
    );

    let client = reqwest::Client::new();
    let url = "https://api.x.com/2/tweets";
    println!("📍 Target URL: {}", url);

    // Create the reply payload
    let payload = serde_json::json!({
        "text": text,
        "reply": {
            "in_reply_to_tweet_id": reply_to_tweet_id
        }
    });
    println!("📝 Reply payload created");

    // Build the Authorization header with OAuth 2.0 User Context Access Token
    println!("🔐 Building OAuth 2.0 User Context authorization header");
    let auth_header = build_oauth2_user_context_header(access_token);

    // Log request details
    println!("📤 Sending POST request to Twitter API v2");
    println!("🔗 Request URL: {}", url);
    println!(
        "📋 Request headers: Authorization: Bearer [REDACTED], Content-Type: application/json"
    );

    // Create the request builder
    let request_builder = client
        .post(url)
        .header("Authorization", auth_header)
        .header("Content-Type", "application/json")
        .json(&payload);

    // Send the request
    let response = request_builder.send().await?;
    let status = response.status();
    println!("📊 Received response with status: {}", status);

    if status.is_success() {
        let response_text = response.text().await?;
        println!("✅ Reply posted successfully!");
        println!("📄 Response: {}", response_text);
        Ok(response_text)
    } else {
        let error_text = response.text().await?;
        println!("❌ Reply posting failed!");
        println!("🚨 Status: {}, Error: {}", status, error_text);
        Err(format!("Twitter API error ({}): {}", status, error_text).into())
    }
}

/// Reads one trimmed line from stdin after printing a prompt.
fn prompt_line(prompt: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("🐦 Twitter Reply Posting Tool");
    println!("==============================");

    // Get access token from user
    let access_token = prompt_line("🔑 Enter your Twitter Access Token: ")?;
    if access_token.is_empty() {
        println!("❌ Access token cannot be empty!");
        return Err("Access token is required".into());
    }

    // Get the target tweet ID from user
    let tweet_id = prompt_line("🎯 Enter the ID of the tweet to reply to: ")?;
    if tweet_id.is_empty() {
        println!("❌ Tweet ID cannot be empty!");
        return Err("Tweet ID is required".into());
    }

    // Get reply message from user
    let reply_text = prompt_line("📝 Enter your reply message: ")?;
    if reply_text.is_empty() {
        println!("❌ Reply message cannot be empty!");
        return Err("Reply message is required".into());
    }

    // Validate reply length (Twitter's limit is 280 characters)
    if reply_text.chars().count() > 280 {
        println!(
            "❌ Reply is too long! {} characters (max 280)",
            reply_text.chars().count()
        );
        return Err("Reply exceeds 280 character limit".into());
    }

    println!("📏 Reply length: {} characters", reply_text.chars().count());

    // Post the reply
    println!("\n🚀 Posting your reply...");
    match post_reply(&access_token, &reply_text, &tweet_id).await {
        Ok(response) => {
            println!("\n🎉 Success! Your reply has been posted.");
            println!("📄 Full response: {}", response);
        }
        Err(e) => {
            println!("\n💥 Failed to post reply: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
