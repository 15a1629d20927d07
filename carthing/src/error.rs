use std::path::PathBuf;

/// Errors raised by the playback core
#[derive(Debug, thiserror::Error)]
pub enum CarThingError {
    /// The account has no device playing anything right now
    #[error("No active playback session")]
    NoActiveSession,

    #[error("Remote call failed with status {status}: {message}")]
    RemoteCallFailed { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Icon asset missing: {}", .0.display())]
    AssetMissing(PathBuf),

    #[error("Artwork error: {0}")]
    Artwork(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CarThingError {
    /// Benign errors mean "nothing to update", not "something broke"
    pub fn is_benign(&self) -> bool {
        matches!(self, CarThingError::NoActiveSession)
    }
}

impl From<reqwest::Error> for CarThingError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => CarThingError::RemoteCallFailed {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None => CarThingError::Http(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for CarThingError {
    fn from(error: serde_json::Error) -> Self {
        CarThingError::Decode(error.to_string())
    }
}

impl From<image::ImageError> for CarThingError {
    fn from(error: image::ImageError) -> Self {
        CarThingError::Artwork(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CarThingError>;
