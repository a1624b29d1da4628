//! GitHub Issues API endpoint implementations.

use tracing::{debug, info, instrument, trace};

use crate::client::GitHubClient;
use crate::consts::MAX_PER_PAGE;
use crate::endpoints::{repo_path, require_positive};
use crate::error::Result;
use crate::models::Issue;

/// Which issues a listing should return, by state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StateFilter {
  #[default]
  Open,
  Closed,
  All,
}

impl StateFilter {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Open => "open",
      Self::Closed => "closed",
      Self::All => "all",
    }
  }
}

/// The issues endpoint also returns pull requests; this picks which to keep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchType {
  Issues,
  Pulls,
  #[default]
  All,
}

impl FetchType {
  pub const fn includes(self, issue: &Issue) -> bool {
    match self {
      Self::Issues => !issue.is_pull_request(),
      Self::Pulls => issue.is_pull_request(),
      Self::All => true,
    }
  }
}

/// Parameters for listing one page of issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueListParams {
  pub state: StateFilter,
  /// Clamped to 1..=100
  pub per_page: u8,
  pub page: u32,
  pub fetch_type: FetchType,
  pub include_comments: bool,
}

impl Default for IssueListParams {
  fn default() -> Self {
    Self {
      state: StateFilter::Open,
      per_page: 30,
      page: 1,
      fetch_type: FetchType::All,
      include_comments: false,
    }
  }
}

impl GitHubClient {
  /// Get a specific issue by number, optionally with its comments.
  ///
  /// With `include_comments` a second request fetches the comments; they are
  /// attached to the issue along with the subset written by non-bot users.
  ///
  /// # Errors
  ///
  /// Returns [`crate::GhError::Api`] for an error status from either request
  /// and [`crate::GhError::Validation`] when a payload does not match the
  /// models.
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_repo_issue(&self, owner: &str, repo: &str, number: u64, include_comments: bool) -> Result<Issue> {
    require_positive("number", number)?;
    info!("Fetching issue #{} for {}/{}", number, owner, repo);

    let path = repo_path(owner, repo, &["issues", &number.to_string()])?;
    let response = self.get(&path, None).await?.error_for_status()?;
    let mut issue: Issue = response.parse()?;
    debug!("Fetched issue #{}: {:?}", issue.number, issue.title);

    if include_comments {
      let comments = self.fetch_issue_comments(owner, repo, number).await?;
      issue.attach_comments(comments);
      debug!(
        "Attached {} comments ({} from users)",
        issue.comments.len(),
        issue.user_comments.len()
      );
    }

    trace!("Issue: {:?}", issue);
    Ok(issue)
  }

  /// Get a single page of issues and pull requests for a repository.
  ///
  /// Only the requested page is fetched. Items not matching
  /// `params.fetch_type` are dropped, so the result may be shorter than
  /// `per_page`.
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_repo_issues(&self, owner: &str, repo: &str, params: &IssueListParams) -> Result<Vec<Issue>> {
    let path = repo_path(owner, repo, &["issues"])?;
    let per_page = params.per_page.clamp(1, MAX_PER_PAGE);
    let query = [
      ("state", params.state.as_str().to_string()),
      ("per_page", per_page.to_string()),
      ("page", params.page.max(1).to_string()),
    ];
    info!("Fetching {} issues for {}/{}", params.state.as_str(), owner, repo);

    let response = self.get(&path, Some(&query)).await?.error_for_status()?;
    let listed: Vec<Issue> = response.parse()?;
    debug!("Received {} items", listed.len());

    let mut issues = Vec::with_capacity(listed.len());
    for mut issue in listed {
      if !params.fetch_type.includes(&issue) {
        trace!("Skipping #{} as not of type {:?}", issue.number, params.fetch_type);
        continue;
      }
      if params.include_comments {
        let comments = self.fetch_issue_comments(owner, repo, issue.number).await?;
        issue.attach_comments(comments);
      }
      issues.push(issue);
    }

    Ok(issues)
  }
}
