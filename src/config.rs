//! Configuration management for the playlist chart web app.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API credentials, the
//! server bind address, and the Spotify endpoint URLs.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

use crate::types::Credential;

/// Placeholder client id shipped in `.env.example`. Startup is refused while
/// the configured value still equals it.
pub const PLACEHOLDER_CLIENT_ID: &str = "your-client-id";

/// Placeholder client secret shipped in `.env.example`.
pub const PLACEHOLDER_CLIENT_SECRET: &str = "your-client-secret";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `plotify/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/plotify/.env`
/// - macOS: `~/Library/Application Support/plotify/.env`
/// - Windows: `%LOCALAPPDATA%/plotify/.env`
///
/// A missing `.env` file is not an error: all values may also be provided
/// through the process environment directly.
///
/// # Returns
///
/// Returns `Ok(())` if the environment is usable, or an error string if
/// directory creation fails.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plotify/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the application credentials, validated against the placeholders.
///
/// Reads `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_AUTH_CLIENT_SECRET`
/// and rejects values that are unset, empty, or still equal to the
/// `.env.example` placeholders. The credential pair is loaded once at startup
/// and treated as immutable afterwards.
///
/// # Errors
///
/// Returns an error string naming the offending variable; callers at startup
/// treat this as fatal.
///
/// # Example
///
/// ```
/// let credential = config::credentials()?; // fails fast on placeholders
/// ```
pub fn credentials() -> Result<Credential, String> {
    let client_id = env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .map_err(|_| "SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string())?;
    let client_secret = env::var("SPOTIFY_API_AUTH_CLIENT_SECRET")
        .map_err(|_| "SPOTIFY_API_AUTH_CLIENT_SECRET must be set".to_string())?;

    let credential = Credential {
        client_id,
        client_secret,
    };
    validate_credential(&credential)?;
    Ok(credential)
}

/// Checks a credential pair against empty and placeholder values.
///
/// Split out of [`credentials`] so the rule is testable without touching the
/// process environment.
pub fn validate_credential(credential: &Credential) -> Result<(), String> {
    if credential.client_id.is_empty() || credential.client_id == PLACEHOLDER_CLIENT_ID {
        return Err(format!(
            "SPOTIFY_API_AUTH_CLIENT_ID is unset or still the placeholder '{}'",
            PLACEHOLDER_CLIENT_ID
        ));
    }
    if credential.client_secret.is_empty() || credential.client_secret == PLACEHOLDER_CLIENT_SECRET
    {
        return Err(format!(
            "SPOTIFY_API_AUTH_CLIENT_SECRET is unset or still the placeholder '{}'",
            PLACEHOLDER_CLIENT_SECRET
        ));
    }
    Ok(())
}

/// Returns the address the web server binds to.
///
/// Retrieves the `SERVER_ADDRESS` environment variable which specifies the
/// address and port of the HTTP server serving both the application pages and
/// the OAuth callback.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:8888"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Retrieves the `SPOTIFY_API_REDIRECT_URI` environment variable which
/// specifies the callback URL that Spotify should redirect to after user
/// authorization. This must match the redirect URI registered in the Spotify
/// application settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
///
/// # Example
///
/// ```
/// let redirect_uri = spotify_redirect_uri(); // e.g., "http://127.0.0.1:8888/callback"
/// ```
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// Retrieves the `SPOTIFY_API_AUTH_URL` environment variable which contains
/// the base URL for Spotify's OAuth authorization endpoint. This is where
/// users are redirected to grant permissions to the application.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let auth_url = spotify_apiauth_url(); // e.g., "https://accounts.spotify.com/authorize"
/// ```
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable which contains the
/// base URL for Spotify's Web API endpoints. This is used for all API
/// operations after authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let api_url = spotify_apiurl(); // e.g., "https://api.spotify.com/v1"
/// ```
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable which contains
/// the URL for exchanging authorization codes for access tokens during the
/// OAuth flow, and for refreshing expired access tokens.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let token_url = spotify_apitoken_url(); // e.g., "https://accounts.spotify.com/api/token"
/// ```
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}
