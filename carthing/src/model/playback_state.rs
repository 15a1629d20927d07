use super::{PlaybackSnapshot, RepeatMode, TrackId};

/// Local view of the remote session.
///
/// Values are never patched field by field across ticks: every poll and every
/// command produces a new `PlaybackState` that replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub track_id: Option<TrackId>,
    pub is_playing: bool,
    pub shuffle_on: bool,
    pub repeat_mode: RepeatMode,
    pub album_art_url: Option<String>,
    pub liked: bool,
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl PlaybackState {
    /// Full state for a poll tick. `liked` must come from a lookup keyed on
    /// this snapshot's track id.
    pub fn from_snapshot(snapshot: &PlaybackSnapshot, liked: bool) -> Self {
        Self {
            track_id: snapshot.track_id().cloned(),
            is_playing: snapshot.is_playing,
            shuffle_on: snapshot.shuffle_state,
            repeat_mode: snapshot.repeat_state,
            album_art_url: snapshot.album_art_url().map(str::to_string),
            liked,
            title: snapshot.title().map(str::to_string),
            artist: snapshot.artist().map(str::to_string),
        }
    }

    /// Copy of this state with only the transport flags taken from `snapshot`
    pub fn with_transport(&self, snapshot: &PlaybackSnapshot) -> Self {
        Self {
            is_playing: snapshot.is_playing,
            shuffle_on: snapshot.shuffle_state,
            repeat_mode: snapshot.repeat_state,
            ..self.clone()
        }
    }
}
