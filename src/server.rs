use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{
    api, config, error,
    management::{AuthStateRegistry, GenreCacheManager, SessionManager},
    spotify::auth::OAuthClient,
};

/// Shared state injected into every request handler.
pub struct AppState {
    pub oauth: OAuthClient,
    pub sessions: SessionManager,
    pub genres: GenreCacheManager,
    pub auth_states: AuthStateRegistry,
}

impl AppState {
    /// Builds the application state from the environment configuration.
    /// Fails when the credentials are unset or still the placeholders.
    pub fn from_env() -> Result<Self, String> {
        let credential = config::credentials()?;

        Ok(Self {
            oauth: OAuthClient::from_env(credential),
            sessions: SessionManager::new(),
            genres: GenreCacheManager::new(),
            auth_states: AuthStateRegistry::new(),
        })
    }
}

pub async fn start_server(state: Arc<AppState>) {
    let app = Router::new()
        .route("/", get(api::home))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/logout", get(api::logout))
        .route("/playlists", get(api::playlists))
        .route("/analyze", get(api::analyze))
        .route("/results", get(api::results))
        .route("/health", get(api::health))
        .layer(Extension(state));

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
