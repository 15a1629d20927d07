use std::fs;
use std::path::PathBuf;

use crate::color::{self, BackgroundColor};
use crate::error::Result;

/// Default artwork file, relative to the working directory
pub const DEFAULT_ARTWORK_PATH: &str = "album_art.jpg";

/// Downloaded album art and the color derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumArtSample {
    pub path: PathBuf,
    pub color: BackgroundColor,
}

/// Writes album art to a single fixed file.
///
/// Every sample overwrites the previous file. Nothing is cached between
/// samples, so the same artwork is written and decoded again on each call.
#[derive(Debug, Clone)]
pub struct ArtworkStore {
    path: PathBuf,
}

impl Default for ArtworkStore {
    fn default() -> Self {
        Self::new(DEFAULT_ARTWORK_PATH)
    }
}

impl ArtworkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn sample(&self, bytes: &[u8]) -> Result<AlbumArtSample> {
        fs::write(&self.path, bytes)?;
        let color = color::extract_from_path(&self.path)?;
        Ok(AlbumArtSample {
            path: self.path.clone(),
            color,
        })
    }
}
