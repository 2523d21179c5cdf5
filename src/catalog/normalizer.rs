//! Raw catalog record -> [`Track`] conversion.
//!
//! Records follow the shape of streaming-service track objects but any
//! field may be missing or carry the wrong type. Nothing here fails: a
//! record that cannot be read degrades to a track with no genres and zero
//! popularity. Whether such a track is usable is decided by the pool.

use super::models::{clamp_popularity, SourceBucket, Track};
use serde_json::Value;
use std::collections::BTreeSet;

/// Normalize one raw record taken from `source_bucket`.
///
/// Recently-played entries wrap the track as `{"track": {...}}` and are
/// unwrapped first. Genres are read from `mapped_genres`, `genres` and any
/// `artists[].genres`, lowercased and deduplicated.
pub fn normalize(raw: &Value, source_bucket: SourceBucket) -> Track {
    let record = match raw.get("track") {
        Some(inner) if inner.is_object() => inner,
        _ => raw,
    };

    let mut track = Track::new(read_id(record.get("id")), source_bucket);
    track.genres = read_genres(record);
    track.popularity = record
        .get("popularity")
        .and_then(Value::as_f64)
        .map(clamp_popularity)
        .unwrap_or(0.0);
    track.name = read_string(record.get("name"));
    track.uri = read_string(record.get("uri"));
    track.preview_url = read_string(record.get("preview_url"));
    track.is_local = record
        .get("is_local")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    track.artists = record
        .get("artists")
        .and_then(Value::as_array)
        .map(|artists| {
            artists
                .iter()
                .filter_map(|a| read_string(a.get("name")))
                .collect()
        })
        .unwrap_or_default();

    track
}

fn read_id(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn read_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn read_genres(record: &Value) -> BTreeSet<String> {
    let mut genres = BTreeSet::new();

    for key in ["mapped_genres", "genres"] {
        collect_genre_list(record.get(key), &mut genres);
    }

    if let Some(artists) = record.get("artists").and_then(Value::as_array) {
        for artist in artists {
            collect_genre_list(artist.get("genres"), &mut genres);
        }
    }

    genres
}

fn collect_genre_list(value: Option<&Value>, out: &mut BTreeSet<String>) {
    let Some(list) = value.and_then(Value::as_array) else {
        return;
    };
    for genre in list.iter().filter_map(Value::as_str) {
        let genre = genre.trim().to_lowercase();
        if !genre.is_empty() {
            out.insert(genre);
        }
    }
}
