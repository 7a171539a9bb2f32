use std::fmt;

use reqwest::{Client, StatusCode};

use crate::{
    config,
    types::{Playlist, PlaylistDetail, PlaylistTrackItem, PlaylistsPage, RawTrack, TracksPage},
    warning,
};

/// Hard remote cap on the playlists-list page size.
pub const PLAYLIST_PAGE_LIMIT: u64 = 50;

/// Errors produced while fetching playlist data.
///
/// Any non-success HTTP response aborts the whole operation; there are no
/// partial results and no retries.
#[derive(Debug)]
pub enum FetchError {
    RemoteFailure(StatusCode),
    Transport(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::RemoteFailure(status) => {
                write!(f, "Spotify API responded with status {}", status)
            }
            FetchError::Transport(err) => write!(f, "Spotify API unreachable: {}", err),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

/// Retrieves all playlists of the authenticated user.
///
/// Pages through `/me/playlists` with limit/offset parameters, requesting
/// the remote maximum of 50 items per page, until the declared total has
/// been collected.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Playlist>)` - All playlists owned or followed by the user
/// - `Err(FetchError)` - Non-success HTTP response or network failure
pub async fn list_playlists(token: &str) -> Result<Vec<Playlist>, FetchError> {
    let client = Client::new();
    let mut playlists: Vec<Playlist> = Vec::new();
    let mut offset: u64 = 0;

    loop {
        let api_url = format!(
            "{uri}/me/playlists?limit={limit}&offset={offset}",
            uri = &config::spotify_apiurl(),
            limit = PLAYLIST_PAGE_LIMIT,
            offset = offset
        );

        let response = client.get(&api_url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::RemoteFailure(response.status()));
        }

        let page = response.json::<PlaylistsPage>().await?;
        let received = page.items.len() as u64;
        playlists.extend(page.items);
        offset += received;

        if received == 0 || offset >= page.total {
            break;
        }
    }

    Ok(playlists)
}

/// Fully materializes a playlist's track list despite server-side pagination.
///
/// Requests the playlist by id. The first response nests the track page
/// under a `tracks` field and also carries the playlist's display name and a
/// declared total. Every server-supplied next-page URL after that returns
/// the page object directly, without the playlist envelope, and is consumed
/// as such.
///
/// The accumulated item count is checked against the declared total when
/// pagination terminates; a mismatch is logged as a warning, not an error,
/// since the remote is the source of truth.
///
/// # Arguments
///
/// * `playlist_id` - Spotify ID of the playlist
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok((Vec<RawTrack>, String, u64))` - The projected tracks in playlist
///   order, the playlist's display name (captured from the first page), and
///   the declared total
/// - `Err(FetchError)` - Any HTTP failure; the playlist is either retrieved
///   whole or not at all
///
/// # Example
///
/// ```
/// let (tracks, name, total) = fetch_all_tracks("37i9dQZF1DXcBWIGoYBM5M", &token).await?;
/// println!("{} has {} tracks", name, total);
/// ```
pub async fn fetch_all_tracks(
    playlist_id: &str,
    token: &str,
) -> Result<(Vec<RawTrack>, String, u64), FetchError> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let response = client.get(&api_url).bearer_auth(token).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::RemoteFailure(response.status()));
    }

    let detail = response.json::<PlaylistDetail>().await?;
    let playlist_name = detail.name;
    let declared_total = detail.tracks.total;

    let mut received = detail.tracks.items.len() as u64;
    let mut tracks = project_items(detail.tracks.items);
    let mut next_url = detail.tracks.next;

    // Later pages arrive as the bare track page, not wrapped in the
    // playlist envelope.
    while let Some(url) = next_url {
        let response = client.get(&url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::RemoteFailure(response.status()));
        }

        let page = response.json::<TracksPage>().await?;
        received += page.items.len() as u64;
        tracks.extend(project_items(page.items));
        next_url = page.next;
    }

    if received != declared_total {
        warning!(
            "Playlist {} declared {} tracks but {} were received",
            playlist_id,
            declared_total,
            received
        );
    }

    Ok((tracks, playlist_name, declared_total))
}

/// Projects a page of playlist items onto [`RawTrack`]s, dropping items
/// whose track object is absent (removed or unavailable entries).
pub fn project_items(items: Vec<PlaylistTrackItem>) -> Vec<RawTrack> {
    items.into_iter().filter_map(project_item).collect()
}

/// Reduces one playlist item to the fields the aggregation cares about.
///
/// Local files carry no catalog artist id, so their lead artist id is None
/// and they are later skipped for genre counting.
pub fn project_item(item: PlaylistTrackItem) -> Option<RawTrack> {
    let track = item.track?;

    let lead_artist_id = if track.is_local {
        None
    } else {
        track.artists.first().and_then(|artist| artist.id.clone())
    };

    Some(RawTrack {
        track_id: track.id.unwrap_or_default(),
        track_name: track.name,
        album_name: track.album.name,
        artist_names: track.artists.into_iter().map(|artist| artist.name).collect(),
        lead_artist_id,
    })
}
