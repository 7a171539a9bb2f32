//! # API Module
//!
//! This module provides the HTTP handlers for the web application's entire
//! surface: the OAuth login flow, the playlist pages, the analysis redirect
//! boundary and a health check.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Builds the Spotify authorization URL (registering a fresh
//!   state nonce) and redirects the browser to it.
//! - [`callback`] - Completes the authorization-code grant: validates the
//!   single-use state nonce, exchanges the code for tokens, resolves the
//!   user's id and persists the session.
//! - [`logout`] - Deletes the user's persisted session.
//!
//! ### Application Pages
//!
//! - [`home`] - Landing page with the login link.
//! - [`playlists`] - Lists the authenticated user's playlists with one
//!   analyze link per playlist.
//! - [`analyze`] - Runs the aggregation pipeline for one playlist and
//!   redirects to the results page with the frequency tables encoded into
//!   the query string.
//! - [`results`] - Decodes the transported tables and renders the counts.
//!
//! ### Monitoring
//!
//! - [`health`] - Returns application status and version information.
//!
//! ## Architecture
//!
//! Handlers are plain async functions wired into an [Axum](https://docs.rs/axum)
//! router by [`crate::server`]. Shared state (OAuth client, session store,
//! genre cache, nonce registry) is injected through an `Extension` layer.
//!
//! ## Error Behavior
//!
//! Authentication and fetch failures are terminal for the current request
//! and surface as redirects back into the login flow; per-artist genre
//! failures inside the analysis pipeline degrade the output instead. No
//! handler retries a failed remote call.

mod auth;
mod health;
mod home;
mod playlists;

pub use auth::callback;
pub use auth::login;
pub use auth::logout;
pub use health::health;
pub use home::home;
pub use playlists::analyze;
pub use playlists::playlists;
pub use playlists::results;
