use std::{collections::HashMap, fmt, path::PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    spotify::auth::{AuthError, OAuthClient},
    types::UserSession,
};

#[derive(Debug)]
pub enum SessionError {
    /// No usable refresh path exists; the user must go through the
    /// authorization flow again.
    ReauthorizationRequired,
    Refresh(AuthError),
    Store(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::ReauthorizationRequired => write!(f, "re-authorization required"),
            SessionError::Refresh(err) => write!(f, "token refresh failed: {}", err),
            SessionError::Store(err) => write!(f, "session store failure: {}", err),
        }
    }
}

impl std::error::Error for SessionError {}

/// Maps an opaque user id to a usable bearer token.
///
/// Sessions are persisted as one JSON document of the shape
/// `{user_id: {access_token, refresh_token, expires_at}}`, read and written
/// whole. The internal mutex serializes read-modify-write cycles within this
/// process; concurrent refreshes for the same user race benignly (last
/// writer wins, tokens are idempotently re-derivable).
pub struct SessionManager {
    path: PathBuf,
    lock: Mutex<()>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_path(Self::store_path())
    }

    /// Uses an explicit store location instead of the default data directory.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub async fn get(&self, user_id: &str) -> Option<UserSession> {
        self.read_all().await.ok()?.remove(user_id)
    }

    /// Stores the session for a user, replacing any previous record.
    pub async fn save(&self, user_id: &str, session: UserSession) -> Result<(), SessionError> {
        let _guard = self.lock.lock().await;
        let mut sessions = self.read_all().await?;
        sessions.insert(user_id.to_string(), session);
        self.write_all(&sessions).await
    }

    /// Deletes all persisted session data for a user. Irreversible.
    pub async fn logout(&self, user_id: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().await;
        let mut sessions = self.read_all().await?;
        sessions.remove(user_id);
        self.write_all(&sessions).await
    }

    /// True iff a session exists, holds an access token, and the expiry is
    /// strictly in the future.
    pub async fn is_active(&self, user_id: &str) -> bool {
        match self.get(user_id).await {
            Some(session) => {
                session.access_token.is_some() && session.expires_at > Utc::now().timestamp()
            }
            None => false,
        }
    }

    /// Returns the access token if the session is active; callers receiving
    /// None redirect the user to re-authorization.
    pub async fn bearer_token(&self, user_id: &str) -> Option<String> {
        let session = self.get(user_id).await?;
        if session.access_token.is_some() && session.expires_at > Utc::now().timestamp() {
            session.access_token
        } else {
            None
        }
    }

    /// Refreshes an inactive session in place.
    ///
    /// An already-active session is left untouched. Otherwise the stored
    /// refresh token is exchanged for a new access token and expiry; the
    /// refresh token itself is preserved, since the remote keeps it valid.
    ///
    /// # Errors
    ///
    /// [`SessionError::ReauthorizationRequired`] when no session or no
    /// refresh token exists, [`SessionError::Refresh`] when the token
    /// endpoint rejects the refresh.
    pub async fn refresh_if_needed(
        &self,
        user_id: &str,
        oauth: &OAuthClient,
    ) -> Result<(), SessionError> {
        if self.is_active(user_id).await {
            return Ok(());
        }

        let session = self
            .get(user_id)
            .await
            .ok_or(SessionError::ReauthorizationRequired)?;
        let refresh_token = session
            .refresh_token
            .ok_or(SessionError::ReauthorizationRequired)?;

        let grant = oauth
            .refresh(&refresh_token)
            .await
            .map_err(SessionError::Refresh)?;

        let updated = UserSession {
            access_token: Some(grant.access_token),
            refresh_token: Some(refresh_token),
            expires_at: Utc::now().timestamp() + grant.expires_in as i64,
        };
        self.save(user_id, updated).await
    }

    async fn read_all(&self) -> Result<HashMap<String, UserSession>, SessionError> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| SessionError::Store(e.to_string()))
            }
            // a store that does not exist yet is simply empty
            Err(_) => Ok(HashMap::new()),
        }
    }

    async fn write_all(
        &self,
        sessions: &HashMap<String, UserSession>,
    ) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| SessionError::Store(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(sessions).map_err(|e| SessionError::Store(e.to_string()))?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))
    }

    fn store_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("plotify/store/sessions.json");
        path
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
