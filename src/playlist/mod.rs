//! Playlist assembly and persistence.

mod assembler;
mod sink;

pub use assembler::{assemble, Playlist};
pub use sink::{
    persist_playlist, playlist_name, prepare_track_uris, JsonFilePlaylistSink, PlaylistDraft,
    PlaylistSink, SavedPlaylist, StoredPlaylist, UPLOAD_BATCH_SIZE,
};

#[cfg(feature = "mock")]
pub use sink::MockPlaylistSink;
