use serde::{Deserialize, Serialize};

/// Base-62 track id as the player API reports it in `item.id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  /// Returns the ID as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for TrackId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for TrackId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}
