use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    response::Redirect,
};
use chrono::Utc;

use crate::{
    server::AppState,
    spotify::{self, auth::AuthError},
    success,
    types::UserSession,
    warning,
};

/// Starts a login attempt: registers a fresh state nonce and redirects the
/// browser to the Spotify authorization page.
pub async fn login(Extension(state): Extension<Arc<AppState>>) -> Redirect {
    let (url, _nonce) = state.oauth.build_authorize_url(&state.auth_states).await;
    Redirect::temporary(&url)
}

/// Completes a login attempt.
///
/// The callback must carry the `code` and `state` query parameters. The
/// state value has to match exactly one outstanding nonce; anything else is
/// a potential request forgery or replay and redirects back to the login
/// flow without ever contacting the token endpoint. On success the code is
/// exchanged, the user's id resolved, and the session persisted before
/// redirecting to the playlist listing.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AppState>>,
) -> Redirect {
    let Some(code) = params.get("code") else {
        warning!("Callback is missing the authorization code");
        return Redirect::temporary("/login");
    };
    let Some(state_param) = params.get("state") else {
        warning!("Callback is missing the state parameter");
        return Redirect::temporary("/login");
    };

    // Unknown or already-consumed state values fail closed.
    if !state.auth_states.consume(state_param).await {
        warning!("Rejecting callback: {}", AuthError::StateMismatch);
        return Redirect::temporary("/login");
    }

    let grant = match state.oauth.exchange_code(code).await {
        Ok(grant) => grant,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return Redirect::temporary("/login");
        }
    };

    let user_id = match spotify::users::get_user_id(&grant.access_token).await {
        Ok(id) => id,
        Err(e) => {
            warning!("Profile lookup failed: {}", e);
            return Redirect::temporary("/login");
        }
    };

    let session = UserSession {
        access_token: Some(grant.access_token),
        refresh_token: grant.refresh_token,
        expires_at: Utc::now().timestamp() + grant.expires_in as i64,
    };

    if let Err(e) = state.sessions.save(&user_id, session).await {
        warning!("Failed to persist session for {}: {}", user_id, e);
        return Redirect::temporary("/login");
    }

    success!("Session created for user {}", user_id);
    Redirect::temporary(&format!(
        "/playlists?user={}",
        urlencoding::encode(&user_id)
    ))
}

/// Deletes the user's persisted session data and returns to the home page.
pub async fn logout(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AppState>>,
) -> Redirect {
    if let Some(user_id) = params.get("user") {
        if let Err(e) = state.sessions.logout(user_id).await {
            warning!("Failed to delete session for {}: {}", user_id, e);
        }
    }

    Redirect::temporary("/")
}
