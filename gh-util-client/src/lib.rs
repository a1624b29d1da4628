//! # GitHub API Client
//!
//! Typed access to the GitHub REST API: resolve a token, build a client, fetch
//! a resource and get back a validated model or a precise error.
//!
//! ```no_run
//! # async fn run() -> gh_util_client::Result<()> {
//! use gh_util_client::GitHubClient;
//!
//! let client = GitHubClient::from_env()?;
//! let issue = client.fetch_repo_issue("prefecthq", "marvin", 723, true).await?;
//! for comment in &issue.user_comments {
//!   println!("{}: {}", comment.user.login, comment.body);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod functions;
pub mod models;
pub mod response;
pub mod utils;
pub mod validate;

// Re-export the client
pub use auth::{Token, resolve_token, resolve_token_with};
pub use client::GitHubClient;
pub use config::ClientConfig;
// Re-export endpoint parameter structs
pub use endpoints::events::ContributorDataParams;
pub use endpoints::issues::{FetchType, IssueListParams, StateFilter};
pub use endpoints::pulls::OpenPullRequestParams;
pub use error::{GhError, Result};
// Re-export models
pub use models::{
  Branch, Comment, Commit, CommitAuthor, ContributorActivity, Event, EventPayload, EventRepo, Issue, IssueState, Label,
  Org, PullRequest, PullRequestLink, Reactions, Release, Repository, User, UserType,
};
pub use response::ApiResponse;
pub use utils::parse_repo_slug;
pub use validate::{parse_as, parse_value};
