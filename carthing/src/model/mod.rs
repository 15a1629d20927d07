mod playback_state;
mod repeat_mode;
mod snapshot;
mod track_id;

pub use playback_state::PlaybackState;
pub use repeat_mode::RepeatMode;
pub use snapshot::{Album, AlbumImage, Artist, PlaybackSnapshot, PlayingItem};
pub use track_id::TrackId;
