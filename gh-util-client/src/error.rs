//! # Client Errors
//!
//! The error kinds a caller of this crate can observe. Transport failures,
//! HTTP error statuses and payload validation failures are kept apart so that
//! callers can match on them instead of parsing messages.

use thiserror::Error;

/// Result alias used throughout the client
pub type Result<T, E = GhError> = std::result::Result<T, E>;

/// Errors returned by the GitHub client
#[derive(Debug, Error)]
pub enum GhError {
  /// The client could not be configured (bad config file, invalid base URL,
  /// unusable token)
  #[error("Configuration error: {0}")]
  Configuration(String),

  /// The request never produced an HTTP response, or its body could not be
  /// read
  #[error("{context}: {source}")]
  Transport {
    context: String,
    #[source]
    source: reqwest::Error,
  },

  /// The API answered with a status code of 400 or above
  #[error("GitHub API error: HTTP {status} - {message}")]
  Api { status: u16, message: String },

  /// The payload did not match the expected model
  #[error("Invalid {model} at `{field}`: {reason}")]
  Validation {
    model: String,
    field: String,
    reason: String,
  },
}

impl GhError {
  /// HTTP status code carried by an API error
  pub const fn status(&self) -> Option<u16> {
    match self {
      Self::Api { status, .. } => Some(*status),
      _ => None,
    }
  }

  pub const fn is_not_found(&self) -> bool {
    matches!(self, Self::Api { status: 404, .. })
  }

  pub(crate) fn invalid_argument(field: &str, reason: impl Into<String>) -> Self {
    Self::Validation {
      model: "argument".to_string(),
      field: field.to_string(),
      reason: reason.into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_api_error_exposes_status() {
    let error = GhError::Api {
      status: 404,
      message: "Not Found".to_string(),
    };

    assert_eq!(error.status(), Some(404));
    assert!(error.is_not_found());
    assert_eq!(error.to_string(), "GitHub API error: HTTP 404 - Not Found");
  }

  #[test]
  fn test_validation_error_names_field() {
    let error = GhError::Validation {
      model: "User".to_string(),
      field: "id".to_string(),
      reason: "missing field `id`".to_string(),
    };

    assert_eq!(error.status(), None);
    assert_eq!(error.to_string(), "Invalid User at `id`: missing field `id`");
  }
}
