use crate::api::Remote;
use crate::artwork::{AlbumArtSample, ArtworkStore};
use crate::color::BackgroundColor;
use crate::error::{CarThingError, Result};
use crate::icons::PanelIcons;
use crate::model::{PlaybackState, RepeatMode};

/// Reconciles the local panel state with the remote session.
///
/// All methods run on the host's event loop: a poll tick and a button press
/// never interleave, so no locking is needed here.
pub struct Controller<R: Remote> {
    remote: R,
    artwork: ArtworkStore,
    state: PlaybackState,
    icons: PanelIcons,
    background: Option<BackgroundColor>,
}

impl<R: Remote> Controller<R> {
    pub fn new(remote: R, artwork: ArtworkStore) -> Self {
        Self {
            remote,
            artwork,
            state: PlaybackState::default(),
            icons: PanelIcons::default(),
            background: None,
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn icons(&self) -> &PanelIcons {
        &self.icons
    }

    /// Color extracted from the most recent artwork, if any was decoded yet
    pub fn background(&self) -> Option<BackgroundColor> {
        self.background
    }

    fn commit(&mut self, state: PlaybackState) {
        self.icons = PanelIcons::render(&state);
        self.state = state;
    }

    /// Apply only the shuffle, repeat and playing flags of the current session
    pub fn sync_transport(&mut self) -> Result<()> {
        let snapshot = self
            .remote
            .current_playback()?
            .ok_or(CarThingError::NoActiveSession)?;

        let next = self.state.with_transport(&snapshot);
        self.commit(next);
        Ok(())
    }

    /// One poll tick.
    ///
    /// The new state is committed only once every remote query of the tick
    /// succeeded. Artwork is downloaded on every tick, changed track or not.
    pub fn poll(&mut self) -> Result<()> {
        let snapshot = self
            .remote
            .current_playback()?
            .ok_or(CarThingError::NoActiveSession)?;

        let liked = match snapshot.track_id() {
            Some(track_id) => self.remote.is_saved(track_id)?,
            None => false,
        };

        let next = PlaybackState::from_snapshot(&snapshot, liked);
        if next.track_id != self.state.track_id {
            log::info!(
                "Now playing: {} - {}",
                next.title.as_deref().unwrap_or("Unknown title"),
                next.artist.as_deref().unwrap_or("Unknown artist")
            );
        }
        self.commit(next);

        if let Some(url) = self.state.album_art_url.clone() {
            match self.refresh_artwork(&url) {
                Ok(sample) => self.background = Some(sample.color),
                Err(e) => log::warn!("Failed to refresh album art from {}: {}", url, e),
            }
        }

        Ok(())
    }

    fn refresh_artwork(&self, url: &str) -> Result<AlbumArtSample> {
        let bytes = self.remote.fetch_artwork(url)?;
        self.artwork.sample(&bytes)
    }

    /// Pause when the session reports playing, otherwise start playback.
    ///
    /// The session can change between the query and the command; the remote
    /// API offers no conditional pause, so the queried value wins.
    pub fn toggle_playback(&mut self) -> Result<()> {
        let playing = self
            .remote
            .current_playback()?
            .map(|snapshot| snapshot.is_playing)
            .unwrap_or(false);

        if playing {
            log::info!("Pausing playback");
            self.remote.pause()?;
        } else {
            log::info!("Starting playback");
            self.remote.resume()?;
        }

        self.commit(PlaybackState {
            is_playing: !playing,
            ..self.state.clone()
        });
        Ok(())
    }

    pub fn next_track(&mut self) -> Result<()> {
        log::info!("Skipping to next track");
        self.remote.next_track()
    }

    pub fn previous_track(&mut self) -> Result<()> {
        log::info!("Skipping to previous track");
        self.remote.previous_track()
    }

    /// off -> context -> track -> off, one remote call per step
    pub fn cycle_repeat_state(&mut self) -> Result<RepeatMode> {
        let next = self.state.repeat_mode.next();
        log::info!("Setting repeat mode to {}", next);
        self.remote.set_repeat(next)?;

        self.commit(PlaybackState {
            repeat_mode: next,
            ..self.state.clone()
        });
        Ok(next)
    }

    /// Inverts the shuffle flag reported by a fresh query. No session is a no-op.
    pub fn toggle_shuffle(&mut self) -> Result<()> {
        let Some(snapshot) = self.remote.current_playback()? else {
            log::debug!("Shuffle toggle ignored, no active session");
            return Ok(());
        };

        let enabled = !snapshot.shuffle_state;
        log::info!("Setting shuffle to {}", enabled);
        self.remote.set_shuffle(enabled)?;

        self.commit(PlaybackState {
            shuffle_on: enabled,
            ..self.state.clone()
        });
        Ok(())
    }

    /// Two-phase like toggle: flip based on a fresh lookup, then confirm.
    ///
    /// Returns the confirmed liked status.
    pub fn toggle_like(&mut self) -> Result<bool> {
        let track_id = self
            .state
            .track_id
            .clone()
            .ok_or(CarThingError::NoActiveSession)?;

        let liked = self.remote.is_saved(&track_id)?;
        if liked {
            log::info!("Removing {} from saved tracks", track_id);
            self.remote.remove_saved(&track_id)?;
        } else {
            log::info!("Adding {} to saved tracks", track_id);
            self.remote.add_saved(&track_id)?;
        }
        self.commit(PlaybackState {
            liked: !liked,
            ..self.state.clone()
        });

        let confirmed = self.remote.is_saved(&track_id)?;
        if confirmed == liked {
            log::warn!("Saved status of {} did not change after toggle", track_id);
        }
        self.commit(PlaybackState {
            liked: confirmed,
            ..self.state.clone()
        });
        Ok(confirmed)
    }
}
