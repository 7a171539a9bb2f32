use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping of a display key (artist / album / genre name) to an occurrence
/// count within one playlist analysis.
pub type FrequencyTable = BTreeMap<String, u64>;

#[derive(Debug, Clone)]
pub struct Credential {
    pub client_id: String,
    pub client_secret: String,
}

/// Result of a token-endpoint call. `refresh_token` is absent on refresh
/// grants, where the original refresh token remains valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: PlaylistTracksRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsPage {
    pub items: Vec<Playlist>,
    pub total: u64,
    pub next: Option<String>,
}

/// First-page envelope of a playlist-detail response: the track page is
/// nested under `tracks`, later pages arrive as the page object directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub name: String,
    pub tracks: TracksPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksPage {
    pub items: Vec<PlaylistTrackItem>,
    pub next: Option<String>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: String,
    pub album: AlbumRef,
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub is_local: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistDetail {
    pub genres: Vec<String>,
}

/// A playlist item reduced to the fields the aggregation cares about.
/// `lead_artist_id` is None for local or otherwise non-catalog files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrack {
    pub track_id: String,
    pub track_name: String,
    pub album_name: String,
    pub artist_names: Vec<String>,
    pub lead_artist_id: Option<String>,
}

/// The payload carried through the results redirect as query-string-encoded
/// JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistAnalysis {
    pub playlist_name: String,
    pub total_tracks: u64,
    pub artist_count: u64,
    pub album_count: u64,
    pub genre_count: u64,
    pub artists: FrequencyTable,
    pub albums: FrequencyTable,
    pub genres: FrequencyTable,
}
