//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by the
//! playlist chart app: the OAuth 2.0 authorization-code flow, the user
//! profile lookup, playlist retrieval with pagination, and per-artist genre
//! lookups. It is the only layer that issues HTTP requests against Spotify.
//!
//! ## Architecture
//!
//! The module follows a feature-based organization where each submodule
//! handles a specific domain of Spotify API functionality:
//!
//! ```text
//! Application Layer (HTTP handlers, Analysis)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 authorization-code grant)
//!     ├── User Profile (opaque user id)
//!     ├── Playlist Operations (listing, track pagination)
//!     └── Artist Operations (genre lookup)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 authorization-code grant:
//! - **Authorize URL**: Builds the browser redirect carrying a single-use
//!   state nonce
//! - **Code Exchange**: Exchanges the callback code for an access/refresh
//!   token pair using an HTTP Basic authorization header
//! - **Token Refresh**: Obtains a fresh access token from a stored refresh
//!   token; the original refresh token remains valid
//!
//! ### User Module
//!
//! [`users`] - Resolves the authenticated user's opaque id, which keys the
//! session store.
//!
//! ### Playlist Module
//!
//! [`playlists`] - Retrieves playlist data:
//! - **Playlist Listing**: limit/offset pagination with the remote cap of 50
//!   items per page
//! - **Track Retrieval**: follows server-supplied next-page URLs until the
//!   whole playlist is materialized, special-casing the first-page envelope
//!
//! ### Artist Module
//!
//! [`artists`] - Fetches an artist's genre list, treating 204 and non-JSON
//! responses as "no genres available".
//!
//! ## Error Types
//!
//! - [`auth::AuthError`] - token endpoint rejections, state-nonce mismatches
//!   and transport failures
//! - [`playlists::FetchError`] - non-success HTTP responses and transport
//!   failures while paginating
//!
//! ## API Coverage
//!
//! - `GET /authorize` (accounts host) - user authorization redirect
//! - `POST /api/token` (accounts host) - code exchange and refresh
//! - `GET /me` - current user's profile
//! - `GET /me/playlists` - the user's playlists
//! - `GET /playlists/{id}` - playlist detail with the first track page
//! - `GET /artists/{id}` - artist detail carrying the genre list

pub mod artists;
pub mod auth;
pub mod playlists;
pub mod users;
