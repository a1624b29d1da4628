//! # GitHub Utility Functions
//!
//! Helpers for turning the different ways people name a repository into an
//! `(owner, repo)` pair.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GhError, Result};

static GITHUB_REPO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"github\.com[/:]([^/]+)/([^/]+?)(?:\.git)?(?:[/#?].*)?$").expect("Failed to compile GitHub repo regex")
});

static REPO_SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^([A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)/([A-Za-z0-9._-]+)$").expect("Failed to compile repo slug regex")
});

/// Extract owner and repo from `owner/repo` or a GitHub URL.
///
/// Accepted forms:
/// - `owner/repo`
/// - `https://github.com/owner/repo` (with or without `.git` or a trailing
///   path such as `/issues/723`)
/// - `git@github.com:owner/repo.git`
pub fn parse_repo_slug(input: &str) -> Result<(String, String)> {
  let input = input.trim().trim_end_matches('/');

  let captures = REPO_SLUG_REGEX
    .captures(input)
    .or_else(|| GITHUB_REPO_REGEX.captures(input))
    .ok_or_else(|| GhError::invalid_argument("repository", format!("could not extract owner and repo from '{input}'")))?;

  match (captures.get(1), captures.get(2)) {
    (Some(owner), Some(repo)) => Ok((owner.as_str().to_string(), repo.as_str().to_string())),
    _ => Err(GhError::invalid_argument(
      "repository",
      format!("could not extract owner and repo from '{input}'"),
    )),
  }
}
