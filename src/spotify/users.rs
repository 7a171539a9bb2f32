use reqwest::Client;

use crate::{config, spotify::playlists::FetchError, types::UserProfile};

/// Resolves the authenticated user's opaque id from the profile endpoint.
///
/// The id is stable across logins and keys the session store.
pub async fn get_user_id(token: &str) -> Result<String, FetchError> {
    let client = Client::new();
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let response = client.get(&api_url).bearer_auth(token).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::RemoteFailure(response.status()));
    }

    let profile = response.json::<UserProfile>().await?;
    Ok(profile.id)
}
