use std::time::Duration;

use reqwest::Method;

use super::Remote;
use crate::error::{CarThingError, Result};
use crate::model::{PlaybackSnapshot, RepeatMode, TrackId};
use crate::transport::{ApiRequest, HttpClient};

/// `Remote` backed by the streaming provider's Web API
pub struct WebApi {
    client: HttpClient,
}

impl WebApi {
    pub fn new(base_url: &str, access_token: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base_url, access_token, timeout)?,
        })
    }

    fn send(&self, request: ApiRequest) -> Result<()> {
        self.client.call(request).map(|_| ())
    }

    fn library_request(method: Method, track_id: &TrackId) -> ApiRequest {
        ApiRequest::new(method, "/me/tracks").query("ids", track_id.as_str())
    }

    fn parse_contains(body: &str) -> Result<bool> {
        let flags: Vec<bool> = serde_json::from_str(body)?;
        flags
            .first()
            .copied()
            .ok_or_else(|| CarThingError::Decode("empty saved-tracks response".to_string()))
    }
}

impl Remote for WebApi {
    fn current_playback(&self) -> Result<Option<PlaybackSnapshot>> {
        let response = self.client.call(ApiRequest::new(Method::GET, "/me/player"))?;
        if response.status == 204 {
            return Ok(None);
        }
        PlaybackSnapshot::from_json(&response.body)
    }

    fn pause(&self) -> Result<()> {
        self.send(ApiRequest::new(Method::PUT, "/me/player/pause"))
    }

    fn resume(&self) -> Result<()> {
        self.send(ApiRequest::new(Method::PUT, "/me/player/play"))
    }

    fn next_track(&self) -> Result<()> {
        self.send(ApiRequest::new(Method::POST, "/me/player/next"))
    }

    fn previous_track(&self) -> Result<()> {
        self.send(ApiRequest::new(Method::POST, "/me/player/previous"))
    }

    fn set_shuffle(&self, enabled: bool) -> Result<()> {
        self.send(ApiRequest::new(Method::PUT, "/me/player/shuffle").query("state", enabled.to_string()))
    }

    fn set_repeat(&self, mode: RepeatMode) -> Result<()> {
        self.send(ApiRequest::new(Method::PUT, "/me/player/repeat").query("state", mode.as_str()))
    }

    fn is_saved(&self, track_id: &TrackId) -> Result<bool> {
        let request = ApiRequest::new(Method::GET, "/me/tracks/contains").query("ids", track_id.as_str());
        let response = self.client.call(request)?;
        Self::parse_contains(&response.body)
    }

    fn add_saved(&self, track_id: &TrackId) -> Result<()> {
        self.send(Self::library_request(Method::PUT, track_id))
    }

    fn remove_saved(&self, track_id: &TrackId) -> Result<()> {
        self.send(Self::library_request(Method::DELETE, track_id))
    }

    fn fetch_artwork(&self, url: &str) -> Result<Vec<u8>> {
        self.client.fetch_bytes(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contains() {
        assert!(WebApi::parse_contains("[true]").unwrap());
        assert!(!WebApi::parse_contains("[false]").unwrap());
    }

    #[test]
    fn test_parse_contains_rejects_empty_list() {
        assert!(matches!(WebApi::parse_contains("[]"), Err(CarThingError::Decode(_))));
        assert!(matches!(WebApi::parse_contains("{}"), Err(CarThingError::Decode(_))));
    }

    #[test]
    fn test_library_request() {
        let request = WebApi::library_request(Method::DELETE, &TrackId::new("abc"));

        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "/me/tracks");
        assert_eq!(request.query, vec![("ids".to_string(), "abc".to_string())]);
    }
}
