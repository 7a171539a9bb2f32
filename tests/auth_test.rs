use plotify::config::{PLACEHOLDER_CLIENT_ID, PLACEHOLDER_CLIENT_SECRET, validate_credential};
use plotify::management::{AuthStateRegistry, generate_state_nonce};
use plotify::spotify::auth::{AuthError, parse_exchange_grant, parse_refresh_grant};
use plotify::types::Credential;
use serde_json::json;

#[test]
fn test_parse_exchange_grant_complete_response() {
    let json = json!({
        "access_token": "T1",
        "refresh_token": "R1",
        "expires_in": 3600
    });

    let grant = parse_exchange_grant(&json).unwrap();

    assert_eq!(grant.access_token, "T1");
    assert_eq!(grant.refresh_token.as_deref(), Some("R1"));
    assert_eq!(grant.expires_in, 3600);
}

#[test]
fn test_parse_exchange_grant_error_field_is_rejected() {
    let json = json!({
        "error": "invalid_grant",
        "error_description": "Invalid authorization code"
    });

    let result = parse_exchange_grant(&json);

    assert!(matches!(result, Err(AuthError::RemoteRejected(_))));
}

#[test]
fn test_parse_exchange_grant_missing_field_is_rejected() {
    // Missing refresh_token
    let json = json!({
        "access_token": "T1",
        "expires_in": 3600
    });
    assert!(matches!(
        parse_exchange_grant(&json),
        Err(AuthError::RemoteRejected(_))
    ));

    // Missing access_token
    let json = json!({
        "refresh_token": "R1",
        "expires_in": 3600
    });
    assert!(matches!(
        parse_exchange_grant(&json),
        Err(AuthError::RemoteRejected(_))
    ));

    // Missing expires_in
    let json = json!({
        "access_token": "T1",
        "refresh_token": "R1"
    });
    assert!(matches!(
        parse_exchange_grant(&json),
        Err(AuthError::RemoteRejected(_))
    ));
}

#[test]
fn test_parse_refresh_grant_has_no_refresh_token() {
    // Refresh responses omit the refresh token; the original remains valid
    let json = json!({
        "access_token": "T2",
        "expires_in": 3600
    });

    let grant = parse_refresh_grant(&json).unwrap();

    assert_eq!(grant.access_token, "T2");
    assert_eq!(grant.refresh_token, None);
    assert_eq!(grant.expires_in, 3600);
}

#[test]
fn test_parse_refresh_grant_error_field_is_rejected() {
    let json = json!({ "error": "invalid_grant" });

    assert!(matches!(
        parse_refresh_grant(&json),
        Err(AuthError::RemoteRejected(_))
    ));
}

#[test]
fn test_generate_state_nonce() {
    let nonce = generate_state_nonce();

    // Should be exactly 32 characters
    assert_eq!(nonce.len(), 32);

    // Should contain only alphanumeric characters
    assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated nonces should be different
    let nonce2 = generate_state_nonce();
    assert_ne!(nonce, nonce2);
}

#[tokio::test]
async fn test_state_nonce_is_single_use() {
    let registry = AuthStateRegistry::new();

    let nonce = registry.issue().await;

    // First callback consumes the nonce
    assert!(registry.consume(&nonce).await);

    // Replaying the same callback is rejected
    assert!(!registry.consume(&nonce).await);
}

#[tokio::test]
async fn test_unknown_state_nonce_is_rejected() {
    let registry = AuthStateRegistry::new();
    let _outstanding = registry.issue().await;

    assert!(!registry.consume("never-issued").await);
    assert_eq!(registry.outstanding_count().await, 1);
}

#[tokio::test]
async fn test_each_login_attempt_gets_its_own_nonce() {
    let registry = AuthStateRegistry::new();

    let first = registry.issue().await;
    let second = registry.issue().await;

    assert_ne!(first, second);
    assert_eq!(registry.outstanding_count().await, 2);

    // Consuming one leaves the other outstanding
    assert!(registry.consume(&first).await);
    assert_eq!(registry.outstanding_count().await, 1);
    assert!(registry.consume(&second).await);
}

#[test]
fn test_validate_credential_accepts_real_values() {
    let credential = Credential {
        client_id: "abc123".to_string(),
        client_secret: "def456".to_string(),
    };

    assert!(validate_credential(&credential).is_ok());
}

#[test]
fn test_validate_credential_rejects_placeholders() {
    let credential = Credential {
        client_id: PLACEHOLDER_CLIENT_ID.to_string(),
        client_secret: "def456".to_string(),
    };
    assert!(validate_credential(&credential).is_err());

    let credential = Credential {
        client_id: "abc123".to_string(),
        client_secret: PLACEHOLDER_CLIENT_SECRET.to_string(),
    };
    assert!(validate_credential(&credential).is_err());
}

#[test]
fn test_validate_credential_rejects_empty_values() {
    let credential = Credential {
        client_id: "".to_string(),
        client_secret: "def456".to_string(),
    };
    assert!(validate_credential(&credential).is_err());

    let credential = Credential {
        client_id: "abc123".to_string(),
        client_secret: "".to_string(),
    };
    assert!(validate_credential(&credential).is_err());
}
