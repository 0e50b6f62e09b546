//! Configuration module for the autoreply service.
//!
//! This module contains configuration structures and environment variable handling
//! for the Twitter/X API integration and the HTTP server.

use log::{debug, error, info, warn};
use std::env;

/// Configuration struct for Twitter/X API credentials.
///
/// This struct holds the credential set of a Twitter/X developer app as read from
/// the environment. Posting replies and liking tweets authenticate with the
/// OAuth 2.0 User Context Access Token; the remaining credentials are accepted
/// so operators can supply the complete set their developer app issues.
#[derive(Debug)]
pub struct TwitterConfig {
    /// The Access Token for OAuth 2.0 User Context authentication (all write operations)
    pub access_token: String,
    /// The app-only Bearer Token of the developer app
    pub bearer_token: Option<String>,
    /// The API Key (consumer key) of the developer app
    pub api_key: Option<String>,
    /// The API Secret (consumer secret) of the developer app
    pub api_secret: Option<String>,
    /// The Access Token Secret paired with the access token
    pub access_token_secret: Option<String>,
}

impl TwitterConfig {
    /// Creates a new `TwitterConfig` instance by loading credentials from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `ACCESS_TOKEN`: Access Token (OAuth 2.0 User Context, used for all write operations)
    ///
    /// # Optional Environment Variables
    ///
    /// - `BEARER_TOKEN`: App-only Bearer Token
    /// - `API_KEY`: API Key (consumer key)
    /// - `API_SECRET`: API Secret (consumer secret)
    /// - `ACCESS_TOKEN_SECRET`: Access Token Secret
    ///
    /// # Returns
    ///
    /// - `Ok(TwitterConfig)`: If the required environment variable is present
    /// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the environment variable is missing
    ///
    /// # Example
    ///
    /// ```rust
    /// use autoreply::TwitterConfig;
    ///
    /// std::env::set_var("ACCESS_TOKEN", "your_access_token");
    ///
    /// let config = TwitterConfig::from_env().unwrap();
    /// assert_eq!(config.access_token, "your_access_token");
    /// ```
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        info!("Loading Twitter configuration from environment variables");

        // Load required access token
        let access_token = match env::var("ACCESS_TOKEN") {
            Ok(token) => {
                let token_length = token.len();
                info!(
                    "Found ACCESS_TOKEN environment variable with length: {}",
                    token_length
                );
                debug!("Access token (masked): {}", mask_credential(&token));

                // Validate token format (basic checks)
                if token.is_empty() {
                    error!("Access token is empty");
                    return Err("Access token cannot be empty".into());
                }

                if token_length < 10 {
                    warn!(
                        "Access token seems unusually short ({} characters)",
                        token_length
                    );
                }

                token
            }
            Err(e) => {
                error!("Failed to load ACCESS_TOKEN from environment: {}", e);
                error!("Make sure ACCESS_TOKEN environment variable is set");
                return Err(format!("Missing ACCESS_TOKEN environment variable: {}", e).into());
            }
        };

        // Load the optional remainder of the developer-app credential set
        let bearer_token = load_optional_credential("BEARER_TOKEN");
        let api_key = load_optional_credential("API_KEY");
        let api_secret = load_optional_credential("API_SECRET");
        let access_token_secret = load_optional_credential("ACCESS_TOKEN_SECRET");

        if api_key.is_some() != api_secret.is_some() {
            warn!(
                "Only one of API_KEY and API_SECRET is set - the app credential pair is incomplete"
            );
        }

        let config = TwitterConfig {
            access_token,
            bearer_token,
            api_key,
            api_secret,
            access_token_secret,
        };

        info!("Twitter configuration loaded successfully");
        if config.has_full_credential_set() {
            info!("Full developer-app credential set is present");
        } else {
            info!("Posting will authenticate with the user-context access token only");
        }

        Ok(config)
    }

    /// Checks whether the complete developer-app credential set was provided.
    ///
    /// Returns `true` only when every optional credential (bearer token, API
    /// key/secret, access token secret) is present in addition to the required
    /// access token.
    pub fn has_full_credential_set(&self) -> bool {
        self.bearer_token.is_some()
            && self.api_key.is_some()
            && self.api_secret.is_some()
            && self.access_token_secret.is_some()
    }
}

/// Loads a single optional credential from the environment.
///
/// Empty values are treated as absent so a blank entry in an env file does not
/// masquerade as a credential.
///
/// # Parameters
///
/// - `name`: The environment variable name to read
///
/// # Returns
///
/// - `Some(String)`: If the variable is set and non-empty
/// - `None`: If the variable is unset or empty
fn load_optional_credential(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if value.is_empty() => {
            warn!("{} is set but empty, ignoring", name);
            None
        }
        Ok(value) => {
            info!(
                "Found {} environment variable with length: {}",
                name,
                value.len()
            );
            debug!("{} (masked): {}", name, mask_credential(&value));
            Some(value)
        }
        Err(_) => {
            info!("No {} found in environment variables", name);
            None
        }
    }
}

/// Masks a credential for safe logging.
///
/// Long values keep an 8-character prefix and suffix, shorter values keep at
/// most the first 8 characters, so logs never contain a full credential.
///
/// # Parameters
///
/// - `credential`: The credential value to mask
///
/// # Returns
///
/// A masked representation safe for logging.
pub(crate) fn mask_credential(credential: &str) -> String {
    let length = credential.len();
    let prefix = if length > 8 {
        &credential[..8]
    } else {
        credential
    };

    if length > 16 {
        format!("{}...{}", prefix, &credential[length - 8..])
    } else {
        format!("{}...", prefix)
    }
}

/// Gets the server port from environment variables or returns the default.
///
/// This function reads the `PORT` environment variable and parses it as a u16.
/// If the environment variable is not set, it defaults to 3000.
///
/// # Returns
///
/// The port number as a u16.
///
/// # Panics
///
/// This function will panic if the `PORT` environment variable is set to a value
/// that cannot be parsed as a valid port number.
///
/// # Example
///
/// ```rust
/// use autoreply::get_server_port;
///
/// // With no PORT set
/// let port = get_server_port(); // Returns 3000
/// ```
pub fn get_server_port() -> u16 {
    env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .expect("PORT must be a valid number")
}

/// Gets the origin allowed to make cross-origin requests to this service.
///
/// This function reads the `CORS_ALLOW_ORIGIN` environment variable. If the
/// variable is not set, it defaults to `http://localhost:3000`, the address of
/// the local development frontend.
///
/// # Returns
///
/// The allowed origin as a String.
pub fn get_allowed_origin() -> String {
    env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
