use std::collections::HashMap;

use crate::{
    types::{FrequencyTable, RawTrack},
    warning,
};

/// Substitute key for tracks whose album name is empty or whitespace-only.
pub const NO_ALBUM_NAME: &str = "Album Unknown";

/// Substitute key for empty or whitespace-only genre strings.
pub const NO_GENRE_NAME: &str = "Other Genre";

/// A distinct lead artist encountered during the counting pass, with the
/// number of tracks attributed to them.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadArtist {
    pub name: String,
    pub track_count: u64,
    pub artist_id: Option<String>,
}

/// Output of the counting pass over a track sequence.
#[derive(Debug, Default)]
pub struct TrackCounts {
    pub artists: FrequencyTable,
    pub albums: FrequencyTable,
    pub leads: Vec<LeadArtist>,
}

/// Scans a track sequence once and counts tracks per artist and per album.
///
/// Each track is attributed to its lead artist, the first entry of its
/// artist list; featured artists are not separately counted. Tracks without
/// an empty artist list each increment exactly one artist bucket, so the
/// artist table's counts sum to the number of tracks processed. An empty or
/// whitespace-only album name is counted under [`NO_ALBUM_NAME`].
///
/// The distinct lead artists are collected alongside the tables so genre
/// resolution can run once per artist instead of once per track.
pub fn count_tracks(tracks: &[RawTrack]) -> TrackCounts {
    let mut artists = FrequencyTable::new();
    let mut albums = FrequencyTable::new();
    let mut leads: Vec<LeadArtist> = Vec::new();

    for track in tracks {
        let Some(lead_name) = track.artist_names.first() else {
            warning!("Track '{}' carries no artists, not counted", track.track_name);
            continue;
        };

        *artists.entry(lead_name.clone()).or_insert(0) += 1;

        let album_name = if track.album_name.trim().is_empty() {
            NO_ALBUM_NAME.to_string()
        } else {
            track.album_name.clone()
        };
        *albums.entry(album_name).or_insert(0) += 1;

        match leads.iter_mut().find(|lead| lead.name == *lead_name) {
            Some(lead) => {
                lead.track_count += 1;
                if lead.artist_id.is_none() {
                    lead.artist_id = track.lead_artist_id.clone();
                }
            }
            None => leads.push(LeadArtist {
                name: lead_name.clone(),
                track_count: 1,
                artist_id: track.lead_artist_id.clone(),
            }),
        }
    }

    TrackCounts {
        artists,
        albums,
        leads,
    }
}

/// How each distinct lead artist gets its genres.
#[derive(Debug, Default)]
pub struct GenreLookupPlan {
    /// Resolved from the persisted cache; costs zero remote calls.
    pub cached: Vec<(LeadArtist, Vec<String>)>,
    /// Needs exactly one remote lookup each.
    pub pending: Vec<LeadArtist>,
    /// No catalog id (local files); contributes no genre counts.
    pub skipped: Vec<String>,
}

/// Partitions the distinct lead artists against the persisted genre cache.
///
/// The cache is read-only during one aggregation run; results of the
/// pending lookups are merged back only after the full pass.
pub fn plan_genre_lookups(
    leads: &[LeadArtist],
    cache: &HashMap<String, Vec<String>>,
) -> GenreLookupPlan {
    let mut plan = GenreLookupPlan::default();

    for lead in leads {
        if let Some(genres) = cache.get(&lead.name) {
            plan.cached.push((lead.clone(), genres.clone()));
        } else if lead.artist_id.is_some() {
            plan.pending.push(lead.clone());
        } else {
            plan.skipped.push(lead.name.clone());
        }
    }

    plan
}

/// Builds the genre frequency table from the resolved artists.
///
/// Every genre of an artist receives that artist's full track count, so
/// multi-genre artists contribute to multiple buckets. Empty or
/// whitespace-only genre strings are counted under [`NO_GENRE_NAME`].
pub fn tally_genres(resolved: &[(LeadArtist, Vec<String>)]) -> FrequencyTable {
    let mut genres = FrequencyTable::new();

    for (lead, artist_genres) in resolved {
        for genre in artist_genres {
            let key = if genre.trim().is_empty() {
                NO_GENRE_NAME.to_string()
            } else {
                genre.clone()
            };
            *genres.entry(key).or_insert(0) += lead.track_count;
        }
    }

    genres
}
