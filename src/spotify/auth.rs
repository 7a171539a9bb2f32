use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde_json::Value;

use crate::{
    config,
    management::AuthStateRegistry,
    types::{Credential, TokenGrant},
};

/// Errors produced by the OAuth authorization-code flow.
#[derive(Debug)]
pub enum AuthError {
    /// The token endpoint returned an error payload or one that is missing
    /// expected fields. The session is not created; the user is asked to
    /// re-authorize.
    RemoteRejected(String),
    /// The callback carried a state value that is not outstanding. Treated
    /// as a potential cross-site request forgery; the token endpoint is
    /// never contacted.
    StateMismatch,
    /// Network or protocol failure talking to the token endpoint.
    Transport(reqwest::Error),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::RemoteRejected(reason) => {
                write!(f, "token endpoint rejected the request: {}", reason)
            }
            AuthError::StateMismatch => write!(f, "callback state does not match any login attempt"),
            AuthError::Transport(err) => write!(f, "token endpoint unreachable: {}", err),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Transport(err)
    }
}

/// Client for the three-legged OAuth 2.0 authorization-code grant and its
/// refresh variant.
///
/// Owns the HTTP client, the immutable application credential and the
/// endpoint URLs. One instance is created at startup and shared across
/// request handlers; all methods take `&self`.
///
/// # Authentication Flow
///
/// 1. **Authorize URL**: [`build_authorize_url`](Self::build_authorize_url)
///    issues a fresh state nonce and returns the browser redirect target
/// 2. **User Authorization**: the user grants permissions on the Spotify
///    consent page
/// 3. **Callback**: Spotify redirects back with `code` and `state`; the
///    state must match exactly one outstanding nonce (single use)
/// 4. **Token Exchange**: [`exchange_code`](Self::exchange_code) posts the
///    code with an HTTP Basic authorization header and receives the token
///    pair
/// 5. **Refresh**: [`refresh`](Self::refresh) renews an expired access token
///    without user interaction
pub struct OAuthClient {
    http: Client,
    credential: Credential,
    redirect_uri: String,
    authorize_url: String,
    token_url: String,
}

impl OAuthClient {
    pub fn new(
        credential: Credential,
        redirect_uri: String,
        authorize_url: String,
        token_url: String,
    ) -> Self {
        Self {
            http: Client::new(),
            credential,
            redirect_uri,
            authorize_url,
            token_url,
        }
    }

    /// Builds a client whose endpoint URLs and redirect URI come from the
    /// environment configuration.
    pub fn from_env(credential: Credential) -> Self {
        Self::new(
            credential,
            config::spotify_redirect_uri(),
            config::spotify_apiauth_url(),
            config::spotify_apitoken_url(),
        )
    }

    /// Builds the authorization redirect URL for a new login attempt.
    ///
    /// Issues a fresh random state nonce, records it as outstanding in the
    /// registry, and returns the URL embedding client_id, redirect_uri,
    /// `response_type=code` and the nonce. The nonce is consumed exactly
    /// once by the matching callback.
    ///
    /// # Returns
    ///
    /// The full authorization URL and the issued nonce.
    pub async fn build_authorize_url(&self, states: &AuthStateRegistry) -> (String, String) {
        let nonce = states.issue().await;

        let url = format!(
            "{authorize_url}?client_id={client_id}&redirect_uri={redirect_uri}&response_type=code&state={state}",
            authorize_url = self.authorize_url,
            client_id = self.credential.client_id,
            redirect_uri = urlencoding::encode(&self.redirect_uri),
            state = nonce,
        );

        (url, nonce)
    }

    /// Exchanges an authorization code for an access/refresh token pair.
    ///
    /// Posts `grant_type=authorization_code` as a form body, authenticated
    /// with an HTTP Basic header of `base64(client_id:client_secret)`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RemoteRejected`] when the response carries an
    /// `error` field or is missing any of `access_token`, `refresh_token`
    /// or `expires_in`, and [`AuthError::Transport`] for network failures.
    ///
    /// # Example
    ///
    /// ```
    /// let grant = oauth.exchange_code("AQA...auth_code").await?;
    /// println!("Access token expires in {} seconds", grant.expires_in);
    /// ```
    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant, AuthError> {
        let res = self
            .http
            .post(&self.token_url)
            .header("Authorization", self.basic_auth())
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let json: Value = res.json().await?;
        parse_exchange_grant(&json)
    }

    /// Refreshes an expired access token using a refresh token.
    ///
    /// Same transport pattern as [`exchange_code`](Self::exchange_code) with
    /// `grant_type=refresh_token`. The response carries no new refresh
    /// token; the original remains valid and the returned grant has
    /// `refresh_token: None`.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, AuthError> {
        let res = self
            .http
            .post(&self.token_url)
            .header("Authorization", self.basic_auth())
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let json: Value = res.json().await?;
        parse_refresh_grant(&json)
    }

    fn basic_auth(&self) -> String {
        let encoded = STANDARD.encode(format!(
            "{}:{}",
            self.credential.client_id, self.credential.client_secret
        ));
        format!("Basic {}", encoded)
    }
}

/// Interprets a token-endpoint response to an authorization-code exchange.
///
/// All three of `access_token`, `refresh_token` and `expires_in` must be
/// present; an `error` field or a missing field yields
/// [`AuthError::RemoteRejected`].
pub fn parse_exchange_grant(json: &Value) -> Result<TokenGrant, AuthError> {
    if let Some(error) = json.get("error") {
        return Err(AuthError::RemoteRejected(error.to_string()));
    }

    let access_token = json["access_token"]
        .as_str()
        .ok_or_else(|| missing_field("access_token"))?
        .to_string();
    let refresh_token = json["refresh_token"]
        .as_str()
        .ok_or_else(|| missing_field("refresh_token"))?
        .to_string();
    let expires_in = json["expires_in"]
        .as_u64()
        .ok_or_else(|| missing_field("expires_in"))?;

    Ok(TokenGrant {
        access_token,
        refresh_token: Some(refresh_token),
        expires_in,
    })
}

/// Interprets a token-endpoint response to a refresh grant, which omits the
/// refresh token.
pub fn parse_refresh_grant(json: &Value) -> Result<TokenGrant, AuthError> {
    if let Some(error) = json.get("error") {
        return Err(AuthError::RemoteRejected(error.to_string()));
    }

    let access_token = json["access_token"]
        .as_str()
        .ok_or_else(|| missing_field("access_token"))?
        .to_string();
    let expires_in = json["expires_in"]
        .as_u64()
        .ok_or_else(|| missing_field("expires_in"))?;

    Ok(TokenGrant {
        access_token,
        refresh_token: None,
        expires_in,
    })
}

fn missing_field(field: &str) -> AuthError {
    AuthError::RemoteRejected(format!("response is missing the '{}' field", field))
}
