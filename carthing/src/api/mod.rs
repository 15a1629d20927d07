mod web_api;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use web_api::WebApi;

use crate::error::Result;
use crate::model::{PlaybackSnapshot, RepeatMode, TrackId};

/// Capabilities of the remote playback service consumed by the panel
pub trait Remote {
    /// `Ok(None)` when the account has no active session
    fn current_playback(&self) -> Result<Option<PlaybackSnapshot>>;

    fn pause(&self) -> Result<()>;

    /// Start or resume playback on the active device
    fn resume(&self) -> Result<()>;

    fn next_track(&self) -> Result<()>;

    fn previous_track(&self) -> Result<()>;

    fn set_shuffle(&self, enabled: bool) -> Result<()>;

    fn set_repeat(&self, mode: RepeatMode) -> Result<()>;

    /// Whether the track is in the user's saved library
    fn is_saved(&self, track_id: &TrackId) -> Result<bool>;

    fn add_saved(&self, track_id: &TrackId) -> Result<()>;

    fn remove_saved(&self, track_id: &TrackId) -> Result<()>;

    /// Raw bytes of an album art image
    fn fetch_artwork(&self, url: &str) -> Result<Vec<u8>>;
}
