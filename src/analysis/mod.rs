//! # Analysis Module
//!
//! Turns a fully materialized playlist into the three frequency tables the
//! results page renders: tracks per artist, per album and per genre.
//!
//! ## Pipeline
//!
//! 1. **Counting pass** ([`aggregate::count_tracks`]) - one scan over the
//!    track sequence, attributing each track to its lead artist (the first
//!    artist listed) and its album, collecting the distinct lead artists on
//!    the way
//! 2. **Genre resolution** ([`aggregate::plan_genre_lookups`] plus one
//!    remote lookup per distinct unresolved artist, executed sequentially) -
//!    cached artists cost zero remote calls, artists without a catalog id
//!    are skipped
//! 3. **Genre tally** ([`aggregate::tally_genres`]) - each resolved artist
//!    contributes its full track count to every one of its genres
//! 4. **Write-through** - newly discovered artist → genre mappings are
//!    merged into the persisted cache after the pass
//!
//! Per-artist lookup failures degrade the genre table instead of failing
//! the run; fetch failures abort it with no partial result.
//!
//! The [`sanitize`] submodule percent-encodes table keys so they survive the
//! round trip through the redirect query string unambiguously.

pub mod aggregate;
pub mod sanitize;

use std::collections::HashMap;

use crate::{
    info,
    management::GenreCacheManager,
    spotify::{self, playlists::FetchError},
    types::PlaylistAnalysis,
    warning,
};

/// Fetches a playlist and aggregates it into a [`PlaylistAnalysis`].
///
/// This is the whole pipeline behind the analyze endpoint: pagination,
/// counting, genre resolution against the persisted cache, and the cache
/// write-through. Genre lookups run one at a time; the per-playlist cost is
/// bounded by the number of distinct uncached lead artists.
pub async fn analyze_playlist(
    playlist_id: &str,
    token: &str,
    genre_cache: &GenreCacheManager,
) -> Result<PlaylistAnalysis, FetchError> {
    let (tracks, playlist_name, total_tracks) =
        spotify::playlists::fetch_all_tracks(playlist_id, token).await?;

    let counts = aggregate::count_tracks(&tracks);

    let cache = genre_cache.load().await;
    let plan = aggregate::plan_genre_lookups(&counts.leads, &cache);

    for name in &plan.skipped {
        info!("{} has no catalog id, skipping genre lookup", name);
    }

    let mut resolved = plan.cached;
    let mut discovered: HashMap<String, Vec<String>> = HashMap::new();

    for lead in plan.pending {
        let Some(artist_id) = lead.artist_id.clone() else {
            continue;
        };

        match spotify::artists::get_artist_genres(&artist_id, token).await {
            Ok(Some(genres)) => {
                discovered.insert(lead.name.clone(), genres.clone());
                resolved.push((lead, genres));
            }
            Ok(None) => {
                warning!("No genre data available for {}", lead.name);
            }
            Err(e) => {
                warning!("Genre lookup failed for {}: {}", lead.name, e);
            }
        }
    }

    let genres = aggregate::tally_genres(&resolved);

    if let Err(e) = genre_cache.merge(&discovered).await {
        warning!("Failed to persist {} new genre mappings: {}", discovered.len(), e);
    }

    Ok(PlaylistAnalysis {
        playlist_name,
        total_tracks,
        artist_count: counts.artists.len() as u64,
        album_count: counts.albums.len() as u64,
        genre_count: genres.len() as u64,
        artists: counts.artists,
        albums: counts.albums,
        genres,
    })
}
