//! # GitHub Pull Request Endpoints
//!
//! Fetching a single pull request (optionally with its conversation comments)
//! and opening new ones.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::client::GitHubClient;
use crate::endpoints::{repo_path, require_non_empty, require_positive};
use crate::error::{GhError, Result};
use crate::models::PullRequest;

/// Parameters for opening a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPullRequestParams {
  /// Branch to merge from
  pub head: String,
  /// Branch to merge into; the configured default base when `None`
  pub base: Option<String>,
  pub title: String,
  /// Generated from head and base when `None`
  pub body: Option<String>,
  pub draft: bool,
  /// Return an already open pull request for the same head and base instead
  /// of creating a second one
  pub check_for_existing: bool,
}

impl OpenPullRequestParams {
  pub fn new(head: impl Into<String>, title: impl Into<String>) -> Self {
    Self {
      head: head.into(),
      base: None,
      title: title.into(),
      body: None,
      draft: false,
      check_for_existing: true,
    }
  }
}

/// Request body for `POST /repos/{owner}/{repo}/pulls`
#[derive(Debug, Serialize)]
struct NewPullRequest<'a> {
  title: &'a str,
  head: &'a str,
  base: &'a str,
  body: &'a str,
  draft: bool,
}

impl GitHubClient {
  /// Get a specific pull request, optionally with its conversation comments
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_repo_pull_request(
    &self,
    owner: &str,
    repo: &str,
    number: u64,
    include_comments: bool,
  ) -> Result<PullRequest> {
    require_positive("number", number)?;
    info!("Fetching pull request #{} for {}/{}", number, owner, repo);

    let path = repo_path(owner, repo, &["pulls", &number.to_string()])?;
    let response = self.get(&path, None).await?.error_for_status()?;
    let mut pr: PullRequest = response.parse()?;
    debug!("Fetched pull request #{}: {:?}", pr.number, pr.title);

    if include_comments {
      let comments = self.fetch_issue_comments(owner, repo, number).await?;
      pr.attach_comments(comments);
    }

    Ok(pr)
  }

  /// Open a pull request from `params.head` into its base branch.
  ///
  /// When `check_for_existing` is set and an open pull request already exists
  /// for the same head and base, that one is returned and nothing is created.
  #[instrument(skip(self), level = "debug")]
  pub async fn open_pull_request(
    &self,
    owner: &str,
    repo: &str,
    params: &OpenPullRequestParams,
  ) -> Result<PullRequest> {
    require_non_empty("head", &params.head)?;
    let base = params.base.as_deref().unwrap_or(&self.config.default_base);
    require_non_empty("base", base)?;
    let path = repo_path(owner, repo, &["pulls"])?;

    if params.check_for_existing {
      let query = [
        ("head", format!("{owner}:{}", params.head)),
        ("base", base.to_string()),
        ("state", "open".to_string()),
      ];
      let response = self.get(&path, Some(&query)).await?;
      if response.is_success() {
        let existing: Vec<PullRequest> = response.parse()?;
        if let Some(pr) = existing.into_iter().next() {
          warn!(
            "Pull request #{} already exists for {}:{} -> {}",
            pr.number, owner, params.head, base
          );
          return Ok(pr);
        }
      }
    }

    let default_body = format!("Pull request from {} to {base}", params.head);
    let new_pr = NewPullRequest {
      title: &params.title,
      head: &params.head,
      base,
      body: params.body.as_deref().unwrap_or(&default_body),
      draft: params.draft,
    };
    let payload = serde_json::to_value(&new_pr).map_err(|e| GhError::Validation {
      model: "NewPullRequest".to_string(),
      field: ".".to_string(),
      reason: e.to_string(),
    })?;

    let response = self.post(&path, Some(&payload)).await?.error_for_status()?;
    let pr: PullRequest = response.parse()?;
    info!("Opened pull request #{} ({} -> {})", pr.number, params.head, base);
    Ok(pr)
  }
}
