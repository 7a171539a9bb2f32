use std::path::PathBuf;

use chrono::Utc;
use plotify::management::{SessionError, SessionManager};
use plotify::spotify::auth::OAuthClient;
use plotify::types::{Credential, UserSession};

// Helper function to create a session store under a unique temp path
fn temp_store(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("plotify-test-{}-{}", name, std::process::id()));
    path.push("sessions.json");
    path
}

// Helper function to create an OAuth client that must never be contacted;
// the token URL points at a closed port
fn offline_oauth() -> OAuthClient {
    OAuthClient::new(
        Credential {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
        },
        "http://127.0.0.1:1/callback".to_string(),
        "http://127.0.0.1:1/authorize".to_string(),
        "http://127.0.0.1:1/api/token".to_string(),
    )
}

fn active_session() -> UserSession {
    UserSession {
        access_token: Some("token".to_string()),
        refresh_token: Some("refresh".to_string()),
        expires_at: Utc::now().timestamp() + 3600,
    }
}

fn expired_session() -> UserSession {
    UserSession {
        access_token: Some("stale".to_string()),
        refresh_token: None,
        expires_at: Utc::now().timestamp() - 60,
    }
}

#[tokio::test]
async fn test_save_and_get_round_trip() {
    let sessions = SessionManager::with_path(temp_store("round-trip"));

    sessions.save("user1", active_session()).await.unwrap();

    let loaded = sessions.get("user1").await.unwrap();
    assert_eq!(loaded.access_token.as_deref(), Some("token"));
    assert_eq!(loaded.refresh_token.as_deref(), Some("refresh"));
}

#[tokio::test]
async fn test_get_unknown_user_is_none() {
    let sessions = SessionManager::with_path(temp_store("unknown"));

    assert!(sessions.get("nobody").await.is_none());
}

#[tokio::test]
async fn test_last_write_wins() {
    let sessions = SessionManager::with_path(temp_store("last-write"));

    sessions.save("user1", expired_session()).await.unwrap();
    sessions.save("user1", active_session()).await.unwrap();

    let loaded = sessions.get("user1").await.unwrap();
    assert_eq!(loaded.access_token.as_deref(), Some("token"));
}

#[tokio::test]
async fn test_is_active_requires_future_expiry() {
    let sessions = SessionManager::with_path(temp_store("active"));

    sessions.save("fresh", active_session()).await.unwrap();
    sessions.save("stale", expired_session()).await.unwrap();

    assert!(sessions.is_active("fresh").await);
    assert!(!sessions.is_active("stale").await);
    assert!(!sessions.is_active("missing").await);
}

#[tokio::test]
async fn test_is_active_requires_access_token() {
    let sessions = SessionManager::with_path(temp_store("tokenless"));

    sessions
        .save(
            "user1",
            UserSession {
                access_token: None,
                refresh_token: Some("refresh".to_string()),
                expires_at: Utc::now().timestamp() + 3600,
            },
        )
        .await
        .unwrap();

    assert!(!sessions.is_active("user1").await);
}

#[tokio::test]
async fn test_bearer_token_only_for_active_sessions() {
    let sessions = SessionManager::with_path(temp_store("bearer"));

    sessions.save("fresh", active_session()).await.unwrap();
    sessions.save("stale", expired_session()).await.unwrap();

    assert_eq!(sessions.bearer_token("fresh").await.as_deref(), Some("token"));
    assert_eq!(sessions.bearer_token("stale").await, None);
    assert_eq!(sessions.bearer_token("missing").await, None);
}

#[tokio::test]
async fn test_logout_deletes_the_record() {
    let sessions = SessionManager::with_path(temp_store("logout"));

    sessions.save("user1", active_session()).await.unwrap();
    sessions.logout("user1").await.unwrap();

    assert!(sessions.get("user1").await.is_none());
    assert!(!sessions.is_active("user1").await);
}

#[tokio::test]
async fn test_refresh_if_needed_leaves_active_session_alone() {
    let sessions = SessionManager::with_path(temp_store("refresh-active"));
    let oauth = offline_oauth();

    sessions.save("user1", active_session()).await.unwrap();

    // Succeeds without contacting the (unreachable) token endpoint
    sessions.refresh_if_needed("user1", &oauth).await.unwrap();

    let loaded = sessions.get("user1").await.unwrap();
    assert_eq!(loaded.access_token.as_deref(), Some("token"));
}

#[tokio::test]
async fn test_refresh_if_needed_without_session_requires_reauthorization() {
    let sessions = SessionManager::with_path(temp_store("refresh-missing"));
    let oauth = offline_oauth();

    let result = sessions.refresh_if_needed("nobody", &oauth).await;

    assert!(matches!(
        result,
        Err(SessionError::ReauthorizationRequired)
    ));
}

#[tokio::test]
async fn test_refresh_if_needed_without_refresh_token_requires_reauthorization() {
    let sessions = SessionManager::with_path(temp_store("refresh-no-token"));
    let oauth = offline_oauth();

    sessions.save("user1", expired_session()).await.unwrap();

    let result = sessions.refresh_if_needed("user1", &oauth).await;

    assert!(matches!(
        result,
        Err(SessionError::ReauthorizationRequired)
    ));
}

#[tokio::test]
async fn test_sessions_are_kept_separate_per_user() {
    let sessions = SessionManager::with_path(temp_store("separate"));

    sessions.save("user1", active_session()).await.unwrap();
    sessions.save("user2", expired_session()).await.unwrap();

    sessions.logout("user1").await.unwrap();

    assert!(sessions.get("user1").await.is_none());
    assert!(sessions.get("user2").await.is_some());
}
