use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    response::{Html, Redirect},
};

use crate::{
    analysis::{self, sanitize},
    management::SessionError,
    server::AppState,
    spotify,
    types::{FrequencyTable, PlaylistAnalysis},
    warning,
};

/// Lists the authenticated user's playlists, one analyze link per playlist.
pub async fn playlists(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Html<String>, Redirect> {
    let Some(user_id) = params.get("user") else {
        return Err(Redirect::temporary("/login"));
    };
    let token = bearer_or_login(&state, user_id).await?;

    let playlists = match spotify::playlists::list_playlists(&token).await {
        Ok(playlists) => playlists,
        Err(e) => {
            warning!("Failed to list playlists for {}: {}", user_id, e);
            return Err(Redirect::temporary("/login"));
        }
    };

    let mut items = String::new();
    for playlist in &playlists {
        items.push_str(&format!(
            "<li>{name} ({count} tracks) <a href=\"/analyze?user={user}&playlist={id}\">analyze</a></li>",
            name = playlist.name,
            count = playlist.tracks.total,
            user = urlencoding::encode(user_id),
            id = playlist.id,
        ));
    }

    Ok(Html(format!(
        "<h2>Your playlists</h2>\
         <ul>{items}</ul>\
         <p><a href=\"/logout?user={user}\">Log out</a></p>",
        items = items,
        user = urlencoding::encode(user_id),
    )))
}

/// Runs the aggregation pipeline for one playlist.
///
/// On success the browser is redirected to the results page with the three
/// frequency tables (keys escaped for transport) and the playlist metadata
/// encoded into the query string as JSON. A fetch failure aborts the whole
/// analysis; no partial chart is shown.
pub async fn analyze(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AppState>>,
) -> Redirect {
    let Some(user_id) = params.get("user") else {
        return Redirect::temporary("/login");
    };
    let Some(playlist_id) = params.get("playlist") else {
        return Redirect::temporary(&format!("/playlists?user={}", urlencoding::encode(user_id)));
    };

    let token = match bearer_or_login(&state, user_id).await {
        Ok(token) => token,
        Err(redirect) => return redirect,
    };

    let analysis = match analysis::analyze_playlist(playlist_id, &token, &state.genres).await {
        Ok(analysis) => analysis,
        Err(e) => {
            warning!("Analysis of playlist {} failed: {}", playlist_id, e);
            return Redirect::temporary(&format!(
                "/playlists?user={}",
                urlencoding::encode(user_id)
            ));
        }
    };

    let transported = PlaylistAnalysis {
        artists: sanitize::escape_for_transport(&analysis.artists),
        albums: sanitize::escape_for_transport(&analysis.albums),
        genres: sanitize::escape_for_transport(&analysis.genres),
        ..analysis
    };

    let payload = match serde_json::to_string(&transported) {
        Ok(payload) => payload,
        Err(e) => {
            warning!("Failed to encode analysis payload: {}", e);
            return Redirect::temporary(&format!(
                "/playlists?user={}",
                urlencoding::encode(user_id)
            ));
        }
    };

    Redirect::temporary(&format!(
        "/results?user={user}&data={data}",
        user = urlencoding::encode(user_id),
        data = urlencoding::encode(&payload),
    ))
}

/// Renders the frequency tables carried through the redirect.
pub async fn results(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, Redirect> {
    let Some(data) = params.get("data") else {
        return Err(Redirect::temporary("/"));
    };

    // Query extraction already reversed the outer percent-encoding, so
    // `data` is the JSON text itself.
    let analysis: PlaylistAnalysis = match serde_json::from_str(data) {
        Ok(analysis) => analysis,
        Err(e) => {
            warning!("Results payload is unreadable: {}", e);
            return Err(Redirect::temporary("/"));
        }
    };

    let artists = sanitize::unescape_after_transport(&analysis.artists);
    let albums = sanitize::unescape_after_transport(&analysis.albums);
    let genres = sanitize::unescape_after_transport(&analysis.genres);

    let back = params
        .get("user")
        .map(|user| {
            format!(
                "<p><a href=\"/playlists?user={}\">Back to playlists</a></p>",
                urlencoding::encode(user)
            )
        })
        .unwrap_or_default();

    Ok(Html(format!(
        "<h2>{name}</h2>\
         <p>{total} tracks, {artist_count} artists, {album_count} albums, {genre_count} genres</p>\
         <h3>Tracks per artist</h3><ul>{artists}</ul>\
         <h3>Tracks per album</h3><ul>{albums}</ul>\
         <h3>Tracks per genre</h3><ul>{genres}</ul>\
         {back}",
        name = analysis.playlist_name,
        total = analysis.total_tracks,
        artist_count = analysis.artist_count,
        album_count = analysis.album_count,
        genre_count = analysis.genre_count,
        artists = render_table(&artists),
        albums = render_table(&albums),
        genres = render_table(&genres),
        back = back,
    )))
}

fn render_table(table: &FrequencyTable) -> String {
    table
        .iter()
        .map(|(key, count)| format!("<li>{}: {}</li>", key, count))
        .collect()
}

/// Resolves a usable bearer token for the user, refreshing an expired
/// session first; anything short of that sends the user back into the
/// authorization flow.
async fn bearer_or_login(state: &AppState, user_id: &str) -> Result<String, Redirect> {
    if let Err(e) = state.sessions.refresh_if_needed(user_id, &state.oauth).await {
        match e {
            SessionError::ReauthorizationRequired => {}
            other => warning!("Session refresh for {} failed: {}", user_id, other),
        }
        return Err(Redirect::temporary("/login"));
    }

    match state.sessions.bearer_token(user_id).await {
        Some(token) => Ok(token),
        None => Err(Redirect::temporary("/login")),
    }
}
