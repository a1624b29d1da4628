//! # GitHub API Endpoints
//!
//! Fetch operations grouped by resource type. Each operation builds its path,
//! performs its requests one after another, rejects error statuses and
//! validates the body into a model.

pub mod comments;
pub mod events;
pub mod issues;
pub mod labels;
pub mod pulls;
pub mod releases;
pub mod users;

use std::sync::LazyLock;

use url::Url;

use crate::error::{GhError, Result};

static PATH_BASE: LazyLock<Url> =
  LazyLock::new(|| Url::parse("http://localhost/").expect("Failed to parse placeholder base URL"));

/// Join `segments` into an absolute path, percent-encoding each one.
///
/// `.` and `..` are rejected: URL parsing resolves them as dot-segments, so no
/// encoding survives the trip to the server and the request would hit a
/// different endpoint.
pub(crate) fn encode_path(segments: &[&str]) -> Result<String> {
  for segment in segments {
    require_path_segment("path", segment)?;
  }

  let mut url = PATH_BASE.clone();
  if let Ok(mut path) = url.path_segments_mut() {
    path.clear().extend(segments);
  }
  Ok(url.path().to_string())
}

/// `/repos/{owner}/{repo}/...` with argument checks on owner and repo
pub(crate) fn repo_path(owner: &str, repo: &str, rest: &[&str]) -> Result<String> {
  let owner = path_argument("owner", owner)?;
  let repo = path_argument("repo", repo)?;

  let mut segments = vec!["repos", owner, repo];
  segments.extend_from_slice(rest);
  encode_path(&segments)
}

/// Trimmed `value`, checked to be usable as a single path segment
pub(crate) fn path_argument<'a>(field: &str, value: &'a str) -> Result<&'a str> {
  let value = value.trim();
  require_non_empty(field, value)?;
  require_path_segment(field, value)?;
  Ok(value)
}

pub(crate) fn require_path_segment(field: &str, value: &str) -> Result<()> {
  if matches!(value, "." | "..") {
    return Err(GhError::invalid_argument(
      field,
      format!("'{value}' cannot be used as a path segment"),
    ));
  }
  Ok(())
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(GhError::invalid_argument(field, "must be a non-empty string"));
  }
  Ok(())
}

pub(crate) fn require_positive(field: &str, value: u64) -> Result<()> {
  if value == 0 {
    return Err(GhError::invalid_argument(field, "must be a positive integer"));
  }
  Ok(())
}
