//! # One-shot Fetch Functions
//!
//! Free-function counterparts of the [`GitHubClient`] methods. Each builds its
//! own client from the config file and environment, performs the operation and
//! drops the client before returning, so nothing is shared between calls.
//! Callers making several requests should build one [`GitHubClient`] and use
//! its methods instead.

use std::collections::{BTreeMap, BTreeSet};

use crate::client::GitHubClient;
use crate::endpoints::events::ContributorDataParams;
use crate::endpoints::issues::IssueListParams;
use crate::endpoints::pulls::OpenPullRequestParams;
use crate::error::Result;
use crate::models::{Comment, ContributorActivity, Event, Issue, Label, PullRequest, Release, User};

/// Fetch an issue or pull request, optionally with its comments
pub async fn fetch_repo_issue(owner: &str, repo: &str, number: u64, include_comments: bool) -> Result<Issue> {
  let client = GitHubClient::from_env()?;
  client.fetch_repo_issue(owner, repo, number, include_comments).await
}

pub async fn fetch_issue_comments(owner: &str, repo: &str, number: u64) -> Result<Vec<Comment>> {
  let client = GitHubClient::from_env()?;
  client.fetch_issue_comments(owner, repo, number).await
}

/// Fetch one page of issues and pull requests
pub async fn fetch_repo_issues(owner: &str, repo: &str, params: &IssueListParams) -> Result<Vec<Issue>> {
  let client = GitHubClient::from_env()?;
  client.fetch_repo_issues(owner, repo, params).await
}

pub async fn fetch_repo_pull_request(
  owner: &str,
  repo: &str,
  number: u64,
  include_comments: bool,
) -> Result<PullRequest> {
  let client = GitHubClient::from_env()?;
  client.fetch_repo_pull_request(owner, repo, number, include_comments).await
}

pub async fn open_pull_request(owner: &str, repo: &str, params: &OpenPullRequestParams) -> Result<PullRequest> {
  let client = GitHubClient::from_env()?;
  client.open_pull_request(owner, repo, params).await
}

pub async fn fetch_repo_labels(owner: &str, repo: &str) -> Result<BTreeSet<Label>> {
  let client = GitHubClient::from_env()?;
  client.fetch_repo_labels(owner, repo).await
}

pub async fn fetch_issue_labels(owner: &str, repo: &str, number: u64) -> Result<BTreeSet<Label>> {
  let client = GitHubClient::from_env()?;
  client.fetch_issue_labels(owner, repo, number).await
}

/// Add labels missing from an issue; `false` if all were already there
pub async fn add_labels_to_issue<I, S>(owner: &str, repo: &str, number: u64, labels: I) -> Result<bool>
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
  let client = GitHubClient::from_env()?;
  client.add_labels_to_issue(owner, repo, number, labels).await
}

/// Replace an issue's labels with exactly `labels`
pub async fn update_labels_on_issue(owner: &str, repo: &str, number: u64, labels: &BTreeSet<String>) -> Result<bool> {
  let client = GitHubClient::from_env()?;
  client.update_labels_on_issue(owner, repo, number, labels).await
}

pub async fn fetch_latest_release(owner: &str, repo: &str) -> Result<Release> {
  let client = GitHubClient::from_env()?;
  client.fetch_latest_release(owner, repo).await
}

pub async fn fetch_user(login: &str) -> Result<User> {
  let client = GitHubClient::from_env()?;
  client.fetch_user(login).await
}

pub async fn fetch_authenticated_user() -> Result<User> {
  let client = GitHubClient::from_env()?;
  client.fetch_authenticated_user().await
}

pub async fn fetch_repo_events(owner: &str, repo: &str, per_page: u8) -> Result<Vec<Event>> {
  let client = GitHubClient::from_env()?;
  client.fetch_repo_events(owner, repo, per_page).await
}

/// Recent activity in a repository grouped by contributor login
pub async fn fetch_contributor_data(
  owner: &str,
  repo: &str,
  params: &ContributorDataParams,
) -> Result<BTreeMap<String, ContributorActivity>> {
  let client = GitHubClient::from_env()?;
  client.fetch_contributor_data(owner, repo, params).await
}
