mod genres;
mod session;
mod state;

pub use genres::GenreCacheManager;
pub use session::SessionError;
pub use session::SessionManager;
pub use state::AuthStateRegistry;
pub use state::STATE_TTL_SECONDS;
pub use state::generate_state_nonce;
