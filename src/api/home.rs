use axum::response::Html;

pub async fn home() -> Html<&'static str> {
    Html(
        "<h2>Playlist Charts</h2>\
         <p>Count the tracks of your Spotify playlists by artist, album and genre.</p>\
         <p><a href=\"/login\">Log in with Spotify</a></p>",
    )
}
