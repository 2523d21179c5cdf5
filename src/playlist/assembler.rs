use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Ordered, duplicate-free track ids produced for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Playlist {
    track_ids: Vec<String>,
}

impl Playlist {
    pub fn track_ids(&self) -> &[String] {
        &self.track_ids
    }

    pub fn len(&self) -> usize {
        self.track_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.track_ids.is_empty()
    }
}

impl IntoIterator for Playlist {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.track_ids.into_iter()
    }
}

/// Build the final playlist from sampler output.
///
/// Keeps the first occurrence of each id, stops at `max_size` and never
/// reorders: the draw order is the playlist order.
pub fn assemble<I, S>(sampled_ids: I, max_size: usize) -> Playlist
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut track_ids = Vec::new();

    for id in sampled_ids {
        if track_ids.len() >= max_size {
            break;
        }
        let id = id.into();
        if seen.insert(id.clone()) {
            track_ids.push(id);
        }
    }

    debug!(size = track_ids.len(), max_size, "Assembled playlist");
    Playlist { track_ids }
}
