//! Raw HTTP responses as returned by the client's verb methods.

use std::borrow::Cow;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{GhError, Result};
use crate::validate::parse_as;

/// Status code and body of one HTTP round trip, uninterpreted
#[derive(Debug, Clone)]
pub struct ApiResponse {
  pub status: StatusCode,
  /// Final request URL, for diagnostics
  pub url: String,
  pub body: Vec<u8>,
}

impl ApiResponse {
  pub fn status_code(&self) -> u16 {
    self.status.as_u16()
  }

  pub fn is_success(&self) -> bool {
    self.status.is_success()
  }

  pub fn text(&self) -> Cow<'_, str> {
    String::from_utf8_lossy(&self.body)
  }

  /// Turn a 4xx/5xx response into [`GhError::Api`], keeping the API's own
  /// `message` when the body carries one.
  pub fn error_for_status(self) -> Result<Self> {
    if self.status.is_client_error() || self.status.is_server_error() {
      let message = self.error_message();
      warn!("GitHub API error from {}: HTTP {} - {}", self.url, self.status, message);
      return Err(GhError::Api {
        status: self.status.as_u16(),
        message,
      });
    }
    Ok(self)
  }

  /// Validate the body into a model
  pub fn parse<T>(&self) -> Result<T>
  where
    T: DeserializeOwned,
  {
    parse_as(&self.body)
  }

  fn error_message(&self) -> String {
    if let Ok(error_json) = serde_json::from_slice::<serde_json::Value>(&self.body)
      && let Some(message) = error_json.get("message").and_then(|m| m.as_str())
    {
      return message.to_string();
    }

    let text = self.text();
    let text = text.trim();
    if text.is_empty() {
      self.status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
      text.to_string()
    }
  }
}
