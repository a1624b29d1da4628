//! GitHub issue comment endpoints.

use tracing::{debug, info, instrument};

use crate::client::GitHubClient;
use crate::endpoints::{repo_path, require_positive};
use crate::error::Result;
use crate::models::Comment;

impl GitHubClient {
  /// Get the comments on an issue or pull request.
  ///
  /// Pull request conversation comments live under the issue of the same
  /// number, so this serves both.
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_issue_comments(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<Comment>> {
    require_positive("number", number)?;
    info!("Fetching comments for #{} in {}/{}", number, owner, repo);

    let path = repo_path(owner, repo, &["issues", &number.to_string(), "comments"])?;
    let response = self.get(&path, None).await?.error_for_status()?;
    let comments: Vec<Comment> = response.parse()?;

    debug!("Retrieved {} comments", comments.len());
    Ok(comments)
  }
}

#[cfg(test)]
mod tests {
  use gh_util_test_utils::fixtures;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::GitHubClient;
  use crate::config::ClientConfig;
  use crate::error::GhError;

  #[tokio::test]
  async fn test_fetch_issue_comments() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = GitHubClient::new(ClientConfig::default().with_base_url(mock_server.uri()))?;

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/7/comments"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
        fixtures::comment_json(1, "First!", fixtures::user_json("alice", 11)),
        fixtures::comment_json(2, "Second", fixtures::bot_json("ci-bot[bot]", 12)),
      ])))
      .mount(&mock_server)
      .await;

    let comments = client.fetch_issue_comments("owner", "repo", 7).await?;

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].body, "First!");
    assert!(comments[1].is_from_bot());

    Ok(())
  }

  #[tokio::test]
  async fn test_fetch_issue_comments_invalid_element() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = GitHubClient::new(ClientConfig::default().with_base_url(mock_server.uri()))?;

    let mut broken = fixtures::comment_json(2, "no author id", fixtures::user_json("bob", 12));
    if let Some(user) = broken["user"].as_object_mut() {
      user.remove("id");
    }

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/7/comments"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
        fixtures::comment_json(1, "fine", fixtures::user_json("alice", 11)),
        broken,
      ])))
      .mount(&mock_server)
      .await;

    let err = client.fetch_issue_comments("owner", "repo", 7).await.unwrap_err();
    match err {
      GhError::Validation { field, .. } => assert!(field.ends_with("user.id"), "unexpected field {field}"),
      other => panic!("unexpected error: {other}"),
    }

    Ok(())
  }
}
