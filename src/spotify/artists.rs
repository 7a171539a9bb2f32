use reqwest::{Client, StatusCode, header::CONTENT_TYPE};

use crate::{config, types::ArtistDetail};

/// Retrieves the genre list of a single artist.
///
/// Issues one artist-detail request. The endpoint is known to answer with
/// HTTP 204 or a non-JSON body for some catalog entries; both are treated
/// as "no genres available" rather than as failures.
///
/// # Arguments
///
/// * `artist_id` - Spotify ID of the artist
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Some(genres))` - The artist's genre list (possibly empty)
/// - `Ok(None)` - The remote had no genre data for this artist (204,
///   non-JSON body, or a non-success status)
/// - `Err(reqwest::Error)` - Network failure or an unparseable JSON body
///
/// Callers absorb the error per artist: a failed lookup leaves that artist
/// without genre attribution but does not abort the aggregation run.
pub async fn get_artist_genres(
    artist_id: &str,
    token: &str,
) -> Result<Option<Vec<String>>, reqwest::Error> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/artists/{id}",
        uri = &config::spotify_apiurl(),
        id = artist_id
    );

    let response = client.get(&api_url).bearer_auth(token).send().await?;

    if response.status() == StatusCode::NO_CONTENT || !response.status().is_success() {
        return Ok(None);
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("application/json"))
        .unwrap_or(false);
    if !is_json {
        return Ok(None);
    }

    let detail = response.json::<ArtistDetail>().await?;
    Ok(Some(detail.genres))
}
