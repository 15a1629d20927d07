use serde::Deserialize;

use super::{RepeatMode, TrackId};
use crate::error::Result;

/// Current playback as returned by `GET /me/player`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    #[serde(default)]
    pub shuffle_state: bool,
    #[serde(default)]
    pub repeat_state: RepeatMode,
    #[serde(default)]
    pub item: Option<PlayingItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayingItem {
    /// Local files have no id
    #[serde(default)]
    pub id: Option<TrackId>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// Episodes carry no album
    #[serde(default)]
    pub album: Option<Album>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<AlbumImage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlbumImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl PlaybackSnapshot {
    /// Parse a player response body. An empty body (204 No Content) means no session.
    pub fn from_json(body: &str) -> Result<Option<Self>> {
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(body)?))
    }

    pub fn track_id(&self) -> Option<&TrackId> {
        self.item.as_ref().and_then(|item| item.id.as_ref())
    }

    pub fn title(&self) -> Option<&str> {
        self.item.as_ref().map(|item| item.name.as_str())
    }

    /// First listed artist
    pub fn artist(&self) -> Option<&str> {
        self.item
            .as_ref()
            .and_then(|item| item.artists.first())
            .map(|artist| artist.name.as_str())
    }

    /// The API lists album images widest first, the first one is used
    pub fn album_art_url(&self) -> Option<&str> {
        self.item
            .as_ref()
            .and_then(|item| item.album.as_ref())
            .and_then(|album| album.images.first())
            .map(|image| image.url.as_str())
    }
}
