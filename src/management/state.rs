use std::collections::HashMap;

use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use tokio::sync::Mutex;

/// Outstanding login attempts older than this are dropped; the matching
/// callback would be rejected anyway by the authorization server.
pub const STATE_TTL_SECONDS: i64 = 600;

const STATE_NONCE_LENGTH: usize = 32;

/// Registry of outstanding state nonces, one per login attempt.
///
/// Created once at process start and shared across request handlers. A nonce
/// is added when the authorize URL is built and removed either by the
/// matching callback (single use) or by the TTL prune. A callback whose
/// state is not outstanding is rejected without contacting the token
/// endpoint.
pub struct AuthStateRegistry {
    outstanding: Mutex<HashMap<String, i64>>,
}

impl AuthStateRegistry {
    pub fn new() -> Self {
        Self {
            outstanding: Mutex::new(HashMap::new()),
        }
    }

    /// Issues a fresh nonce and records it as outstanding.
    pub async fn issue(&self) -> String {
        let nonce = generate_state_nonce();
        let mut outstanding = self.outstanding.lock().await;
        let now = Utc::now().timestamp();
        outstanding.retain(|_, issued_at| now - *issued_at < STATE_TTL_SECONDS);
        outstanding.insert(nonce.clone(), now);
        nonce
    }

    /// Consumes an outstanding nonce. Returns false for unknown, expired or
    /// already-consumed values; such callbacks fail closed.
    pub async fn consume(&self, state: &str) -> bool {
        let mut outstanding = self.outstanding.lock().await;
        let now = Utc::now().timestamp();
        outstanding.retain(|_, issued_at| now - *issued_at < STATE_TTL_SECONDS);
        outstanding.remove(state).is_some()
    }

    pub async fn outstanding_count(&self) -> usize {
        self.outstanding.lock().await.len()
    }
}

impl Default for AuthStateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub fn generate_state_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_NONCE_LENGTH)
        .map(char::from)
        .collect()
}
