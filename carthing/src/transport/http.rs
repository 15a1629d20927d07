use std::time::Duration;

use reqwest::header::CONTENT_LENGTH;
use reqwest::Method;
use serde::Deserialize;

use crate::error::{CarThingError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";

pub struct ApiRequest {
  pub method: Method,
  pub path: String,
  pub query: Vec<(String, String)>,
}

impl ApiRequest {
  pub fn new(method: Method, path: impl Into<String>) -> Self {
    Self {
      method,
      path: path.into(),
      query: Vec::new(),
    }
  }

  pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
    self.query.push((key.to_string(), value.into()));
    self
  }
}

pub struct ApiResponse {
  pub status: u16,
  pub body: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
  error: ErrorObject,
}

#[derive(Deserialize)]
struct ErrorObject {
  message: String,
}

/// Blocking REST client with bearer authentication
pub struct HttpClient {
  http_client: reqwest::blocking::Client,
  base_url: String,
  access_token: String,
}

impl HttpClient {
  pub fn new(base_url: &str, access_token: &str, timeout: Duration) -> Result<Self> {
    let http_client = reqwest::blocking::Client::builder()
      .timeout(timeout)
      .build()?;

    Ok(Self {
      http_client,
      base_url: base_url.trim_end_matches('/').to_string(),
      access_token: access_token.to_string(),
    })
  }

  pub fn call(&self, request: ApiRequest) -> Result<ApiResponse> {
    let url = self.url_for(&request.path);
    log::debug!("{} {} {:?}", request.method, url, request.query);

    let mut builder = self
      .http_client
      .request(request.method.clone(), &url)
      .bearer_auth(&self.access_token)
      .query(&request.query);

    // Player commands carry no body but the API still wants a length
    if request.method != Method::GET {
      builder = builder.header(CONTENT_LENGTH, "0");
    }

    let response = builder.send()?;
    let status = response.status();
    let body = response.text()?;

    if !status.is_success() {
      let message = Self::extract_error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
      return Err(CarThingError::RemoteCallFailed {
        status: status.as_u16(),
        message,
      });
    }

    Ok(ApiResponse {
      status: status.as_u16(),
      body,
    })
  }

  /// Unauthenticated download, used for album art hosted outside the API
  pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
    let response = self.http_client.get(url).send()?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
  }

  fn url_for(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
      .ok()
      .map(|envelope| envelope.error.message)
  }
}
