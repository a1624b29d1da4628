//! # GitHub Resource Models
//!
//! Typed representations of the REST resources this crate reads. Every model
//! is built only from API JSON through [`crate::validate::parse_as`]; unknown
//! fields are ignored, URLs and timestamps are parsed, identifiers must be
//! positive and enum fields reject values they do not know.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::validate::{null_as_default, positive, positive_opt};

/// Kind of account behind a [`User`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
  #[default]
  User,
  Organization,
  Bot,
}

/// Represents a GitHub user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
  pub login: String,
  #[serde(deserialize_with = "positive")]
  pub id: u64,
  /// API URL of the profile
  pub url: Url,
  pub html_url: Option<Url>,
  #[serde(rename = "type", default)]
  pub user_type: UserType,
  pub node_id: Option<String>,
  pub avatar_url: Option<Url>,
  pub gravatar_id: Option<String>,
  pub display_login: Option<String>,
  #[serde(default)]
  pub site_admin: bool,
  pub name: Option<String>,
  pub company: Option<String>,
  pub blog: Option<String>,
  pub location: Option<String>,
  pub email: Option<String>,
  pub hireable: Option<bool>,
  pub bio: Option<String>,
  pub twitter_username: Option<String>,
  pub public_repos: Option<u64>,
  pub public_gists: Option<u64>,
  pub followers: Option<u64>,
  pub following: Option<u64>,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}

impl User {
  /// Bots are identified by the account `type`, not by their login
  pub fn is_bot(&self) -> bool {
    self.user_type == UserType::Bot
  }
}

impl fmt::Display for User {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.id, self.login)
  }
}

/// Represents a GitHub label.
///
/// Labels are identified by name: equality, ordering and hashing ignore every
/// other field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
  pub name: String,
  pub color: String,
  pub description: Option<String>,
  #[serde(default, deserialize_with = "positive_opt")]
  pub id: Option<u64>,
  pub url: Option<Url>,
  #[serde(default)]
  pub default: bool,
}

impl PartialEq for Label {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name
  }
}

impl Eq for Label {}

impl PartialOrd for Label {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Label {
  fn cmp(&self, other: &Self) -> Ordering {
    self.name.cmp(&other.name)
  }
}

impl Hash for Label {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.name.hash(state);
  }
}

/// Open/closed state shared by issues and pull requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
  Open,
  Closed,
}

impl IssueState {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Open => "open",
      Self::Closed => "closed",
    }
  }
}

/// Present on issues that are really pull requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestLink {
  pub url: Option<Url>,
  pub html_url: Option<Url>,
  pub merged_at: Option<DateTime<Utc>>,
}

/// Reaction counters attached to comments and releases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
  pub url: Url,
  pub total_count: u64,
  #[serde(rename = "+1")]
  pub thumbs_up: u64,
  #[serde(rename = "-1")]
  pub thumbs_down: u64,
  pub laugh: u64,
  pub hooray: u64,
  pub confused: u64,
  pub heart: u64,
  pub rocket: u64,
  pub eyes: u64,
}

/// Represents a comment on an issue or pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  #[serde(deserialize_with = "positive")]
  pub id: u64,
  pub body: String,
  pub user: User,
  pub url: Url,
  pub html_url: Option<Url>,
  /// The issue or pull request this comment belongs to
  pub issue_url: Option<Url>,
  pub author_association: Option<String>,
  pub reactions: Option<Reactions>,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
  pub fn is_from_bot(&self) -> bool {
    self.user.is_bot()
  }
}

/// Comments authored by non-bot accounts, in their original order
pub fn user_authored(comments: &[Comment]) -> Vec<Comment> {
  comments.iter().filter(|c| !c.is_from_bot()).cloned().collect()
}

/// Represents a GitHub issue (pull requests are also returned as issues)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
  #[serde(deserialize_with = "positive")]
  pub number: u64,
  pub title: String,
  pub body: Option<String>,
  pub state: IssueState,
  pub state_reason: Option<String>,
  pub user: User,
  #[serde(default, deserialize_with = "null_as_default")]
  pub labels: BTreeSet<Label>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub assignees: Vec<User>,
  /// Comment count reported by the API
  #[serde(rename = "comments", default)]
  pub comment_count: u64,
  #[serde(default)]
  pub locked: bool,
  pub url: Url,
  pub html_url: Option<Url>,
  pub comments_url: Option<Url>,
  pub pull_request: Option<PullRequestLink>,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
  pub closed_at: Option<DateTime<Utc>>,
  /// Every fetched comment; empty unless comments were requested
  #[serde(rename = "fetched_comments", skip_deserializing)]
  pub comments: Vec<Comment>,
  /// Fetched comments written by people rather than bots
  #[serde(skip_deserializing)]
  pub user_comments: Vec<Comment>,
}

impl Issue {
  pub const fn is_pull_request(&self) -> bool {
    self.pull_request.is_some()
  }

  pub fn label_names(&self) -> BTreeSet<&str> {
    self.labels.iter().map(|l| l.name.as_str()).collect()
  }

  /// Attach fetched comments, splitting out the human-authored ones
  pub fn attach_comments(&mut self, comments: Vec<Comment>) {
    self.user_comments = user_authored(&comments);
    self.comments = comments;
  }
}

/// Represents a repository as embedded in branch refs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
  #[serde(deserialize_with = "positive")]
  pub id: u64,
  pub name: String,
  pub full_name: String,
  pub url: Url,
  pub html_url: Option<Url>,
  pub description: Option<String>,
  pub owner: Option<User>,
  #[serde(default)]
  pub private: bool,
  pub default_branch: Option<String>,
}

/// Represents a pull request reference (head or base)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
  pub label: String,
  #[serde(rename = "ref")]
  pub ref_name: String,
  pub sha: String,
  pub user: Option<User>,
  /// `null` when the source fork has been deleted
  pub repo: Option<Repository>,
}

/// Represents a GitHub pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
  #[serde(deserialize_with = "positive")]
  pub number: u64,
  pub title: String,
  pub body: Option<String>,
  pub state: IssueState,
  pub user: User,
  #[serde(default, deserialize_with = "null_as_default")]
  pub labels: BTreeSet<Label>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub assignees: Vec<User>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub requested_reviewers: Vec<User>,
  pub url: Url,
  pub html_url: Option<Url>,
  pub diff_url: Option<Url>,
  pub comments_url: Option<Url>,
  pub head: Branch,
  pub base: Branch,
  #[serde(default)]
  pub draft: bool,
  #[serde(default)]
  pub merged: bool,
  pub mergeable: Option<bool>,
  pub mergeable_state: Option<String>,
  pub merge_commit_sha: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
  pub closed_at: Option<DateTime<Utc>>,
  pub merged_at: Option<DateTime<Utc>>,
  #[serde(rename = "fetched_comments", skip_deserializing)]
  pub comments: Vec<Comment>,
  #[serde(skip_deserializing)]
  pub user_comments: Vec<Comment>,
}

impl PullRequest {
  /// List endpoints omit `merged`, so fall back to `merged_at`
  pub const fn is_merged(&self) -> bool {
    self.merged || self.merged_at.is_some()
  }

  pub fn attach_comments(&mut self, comments: Vec<Comment>) {
    self.user_comments = user_authored(&comments);
    self.comments = comments;
  }
}

/// Represents a GitHub release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
  #[serde(default, deserialize_with = "positive_opt")]
  pub id: Option<u64>,
  pub tag_name: String,
  pub name: Option<String>,
  pub body: Option<String>,
  pub url: Option<Url>,
  pub html_url: Url,
  pub author: User,
  #[serde(default)]
  pub draft: bool,
  #[serde(default)]
  pub prerelease: bool,
  pub created_at: Option<DateTime<Utc>>,
  /// `null` for drafts
  pub published_at: Option<DateTime<Utc>>,
  pub reactions: Option<Reactions>,
  pub mentions_count: Option<u64>,
}

/// Organization an event happened under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Org {
  #[serde(deserialize_with = "positive")]
  pub id: u64,
  pub login: String,
  pub gravatar_id: Option<String>,
  pub url: Url,
  pub avatar_url: Option<Url>,
}

/// The short repository reference embedded in events; `name` is `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRepo {
  #[serde(deserialize_with = "positive")]
  pub id: u64,
  pub name: String,
  pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
  pub name: Option<String>,
  pub email: Option<String>,
}

/// A commit as listed in a push event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
  pub sha: Option<String>,
  pub message: String,
  pub url: Url,
  pub author: Option<CommitAuthor>,
  #[serde(default)]
  pub distinct: bool,
}

impl Commit {
  pub fn is_merge(&self) -> bool {
    self.message.contains("Merge")
  }
}

/// Event-specific data; which fields are present depends on the event type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
  pub action: Option<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub commits: Vec<Commit>,
  pub issue: Option<Issue>,
  pub pull_request: Option<PullRequest>,
}

/// Represents an entry of a repository's public event stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub id: String,
  /// Event type such as `PushEvent` or `IssuesEvent`
  #[serde(rename = "type")]
  pub event_type: String,
  pub actor: User,
  pub repo: EventRepo,
  pub payload: EventPayload,
  #[serde(default)]
  pub public: bool,
  pub created_at: DateTime<Utc>,
  pub org: Option<Org>,
}

impl Event {
  pub fn is_opened(&self, event_type: &str) -> bool {
    self.event_type == event_type && self.payload.action.as_deref() == Some("opened")
  }
}

/// What one contributor did in a repository's recent event stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorActivity {
  pub user: User,
  pub created_issues: Vec<Issue>,
  pub created_pull_requests: Vec<PullRequest>,
  /// Pushed commits, excluding merge commits
  pub merged_commits: Vec<Commit>,
}

impl ContributorActivity {
  pub const fn new(user: User) -> Self {
    Self {
      user,
      created_issues: Vec::new(),
      created_pull_requests: Vec::new(),
      merged_commits: Vec::new(),
    }
  }

  /// Fold one event into the activity
  pub fn record(&mut self, event: Event) {
    if event.is_opened("IssuesEvent") {
      self.created_issues.extend(event.payload.issue);
    } else if event.is_opened("PullRequestEvent") {
      self.created_pull_requests.extend(event.payload.pull_request);
    } else if event.event_type == "PushEvent" {
      self
        .merged_commits
        .extend(event.payload.commits.into_iter().filter(|c| !c.is_merge()));
    }
  }

  pub fn is_empty(&self) -> bool {
    self.created_issues.is_empty() && self.created_pull_requests.is_empty() && self.merged_commits.is_empty()
  }
}
