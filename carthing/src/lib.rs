pub mod api;
pub mod artwork;
pub mod color;
pub mod controller;
pub mod error;
pub mod icons;
pub mod model;
pub mod poller;
pub mod transport;

// Re-export key types for easier access
pub use api::{Remote, WebApi};
pub use artwork::{AlbumArtSample, ArtworkStore};
pub use color::{BackgroundColor, BackgroundFade};
pub use controller::Controller;
pub use error::{CarThingError, Result};
pub use icons::{Icon, IconSet, PanelIcons};
pub use model::{PlaybackSnapshot, PlaybackState, RepeatMode, TrackId};
pub use poller::{Poller, TickOutcome};
