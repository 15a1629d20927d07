use mockall::mock;

use super::Remote;
use crate::error::Result;
use crate::model::{Album, AlbumImage, Artist, PlaybackSnapshot, PlayingItem, RepeatMode, TrackId};

mock! {
    pub Remote {}

    impl Remote for Remote {
        fn current_playback(&self) -> Result<Option<PlaybackSnapshot>>;
        fn pause(&self) -> Result<()>;
        fn resume(&self) -> Result<()>;
        fn next_track(&self) -> Result<()>;
        fn previous_track(&self) -> Result<()>;
        fn set_shuffle(&self, enabled: bool) -> Result<()>;
        fn set_repeat(&self, mode: RepeatMode) -> Result<()>;
        fn is_saved(&self, track_id: &TrackId) -> Result<bool>;
        fn add_saved(&self, track_id: &TrackId) -> Result<()>;
        fn remove_saved(&self, track_id: &TrackId) -> Result<()>;
        fn fetch_artwork(&self, url: &str) -> Result<Vec<u8>>;
    }
}

/// Builds `PlaybackSnapshot` values without going through JSON
pub struct SnapshotBuilder {
    track_id: Option<String>,
    title: String,
    artist: String,
    art_url: Option<String>,
    is_playing: bool,
    shuffle: bool,
    repeat: RepeatMode,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            track_id: Some("4uLU6hMCjMI75M1A2tKUQC".into()),
            title: "Never Gonna Give You Up".into(),
            artist: "Rick Astley".into(),
            art_url: Some("https://i.scdn.co/image/ab67616d0000b273".into()),
            is_playing: true,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }

    pub fn track_id(mut self, track_id: impl Into<String>) -> Self {
        self.track_id = Some(track_id.into());
        self
    }

    pub fn without_track_id(mut self) -> Self {
        self.track_id = None;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    pub fn art_url(mut self, url: impl Into<String>) -> Self {
        self.art_url = Some(url.into());
        self
    }

    pub fn without_art(mut self) -> Self {
        self.art_url = None;
        self
    }

    pub fn playing(mut self, is_playing: bool) -> Self {
        self.is_playing = is_playing;
        self
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn repeat(mut self, repeat: RepeatMode) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn build(self) -> PlaybackSnapshot {
        let images = self
            .art_url
            .map(|url| {
                vec![AlbumImage {
                    url,
                    width: Some(640),
                    height: Some(640),
                }]
            })
            .unwrap_or_default();

        PlaybackSnapshot {
            is_playing: self.is_playing,
            shuffle_state: self.shuffle,
            repeat_state: self.repeat,
            item: Some(PlayingItem {
                id: self.track_id.map(TrackId::new),
                name: self.title,
                artists: vec![Artist { name: self.artist }],
                album: Some(Album { images }),
            }),
        }
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A `MockRemote` where every capability succeeds.
///
/// Each method gets exactly one catch-all expectation, so tests that need a
/// specific call sequence should start from `MockRemote::new()` instead.
pub struct MockRemoteBuilder {
    playback: Option<PlaybackSnapshot>,
    saved: bool,
    artwork: Vec<u8>,
}

impl MockRemoteBuilder {
    pub fn new() -> Self {
        Self {
            playback: Some(SnapshotBuilder::new().build()),
            saved: false,
            artwork: Vec::new(),
        }
    }

    pub fn playback(mut self, playback: PlaybackSnapshot) -> Self {
        self.playback = Some(playback);
        self
    }

    pub fn no_session(mut self) -> Self {
        self.playback = None;
        self
    }

    pub fn saved(mut self, saved: bool) -> Self {
        self.saved = saved;
        self
    }

    pub fn artwork(mut self, bytes: Vec<u8>) -> Self {
        self.artwork = bytes;
        self
    }

    pub fn build(self) -> MockRemote {
        let mut remote = MockRemote::new();
        let playback = self.playback;
        let saved = self.saved;
        let artwork = self.artwork;

        remote
            .expect_current_playback()
            .returning(move || Ok(playback.clone()));
        remote.expect_pause().returning(|| Ok(()));
        remote.expect_resume().returning(|| Ok(()));
        remote.expect_next_track().returning(|| Ok(()));
        remote.expect_previous_track().returning(|| Ok(()));
        remote.expect_set_shuffle().returning(|_| Ok(()));
        remote.expect_set_repeat().returning(|_| Ok(()));
        remote.expect_is_saved().returning(move |_| Ok(saved));
        remote.expect_add_saved().returning(|_| Ok(()));
        remote.expect_remove_saved().returning(|_| Ok(()));
        remote
            .expect_fetch_artwork()
            .returning(move |_| Ok(artwork.clone()));

        remote
    }
}

impl Default for MockRemoteBuilder {
    fn default() -> Self {
        Self::new()
    }
}
