//! GitHub label endpoints: reading repository and issue labels and keeping an
//! issue's labels in line with a desired set.

use std::collections::BTreeSet;

use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::client::GitHubClient;
use crate::endpoints::{repo_path, require_path_segment, require_positive};
use crate::error::Result;
use crate::models::Label;

impl GitHubClient {
  /// Get every label defined on a repository (first page only)
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_repo_labels(&self, owner: &str, repo: &str) -> Result<BTreeSet<Label>> {
    let path = repo_path(owner, repo, &["labels"])?;
    let response = self.get(&path, None).await?.error_for_status()?;
    let labels: BTreeSet<Label> = response.parse()?;
    debug!(
      "Fetched labels: {}",
      labels.iter().map(|l| l.name.as_str()).collect::<Vec<_>>().join(" | ")
    );
    Ok(labels)
  }

  /// Get the labels currently on an issue or pull request
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_issue_labels(&self, owner: &str, repo: &str, number: u64) -> Result<BTreeSet<Label>> {
    require_positive("number", number)?;
    let path = repo_path(owner, repo, &["issues", &number.to_string(), "labels"])?;
    let response = self.get(&path, None).await?.error_for_status()?;
    response.parse()
  }

  /// Add labels to an issue, skipping any it already carries.
  ///
  /// Returns `true` if a request adding labels was made, `false` if every
  /// label was already present.
  #[instrument(skip(self, labels), level = "debug")]
  pub async fn add_labels_to_issue<I, S>(&self, owner: &str, repo: &str, number: u64, labels: I) -> Result<bool>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let wanted: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
    let current = self.fetch_issue_labels(owner, repo, number).await?;
    let current_names: BTreeSet<&str> = current.iter().map(|l| l.name.as_str()).collect();

    let to_add: Vec<&String> = wanted.iter().filter(|name| !current_names.contains(name.as_str())).collect();
    if to_add.is_empty() {
      warn!("Selected labels already exist on #{} in {}/{}", number, owner, repo);
      return Ok(false);
    }

    let path = repo_path(owner, repo, &["issues", &number.to_string(), "labels"])?;
    self
      .post(&path, Some(&json!({ "labels": to_add })))
      .await?
      .error_for_status()?;

    info!("Added labels {:?} to #{} in {}/{}", to_add, number, owner, repo);
    Ok(true)
  }

  /// Make an issue's labels match `labels`: labels not in the set are removed
  /// one by one, then missing ones are added.
  ///
  /// Every removal path is built before the first request, so a label name
  /// that cannot be addressed fails the call without touching the issue.
  #[instrument(skip(self), level = "debug")]
  pub async fn update_labels_on_issue(
    &self,
    owner: &str,
    repo: &str,
    number: u64,
    labels: &BTreeSet<String>,
  ) -> Result<bool> {
    let issue = self.fetch_repo_issue(owner, repo, number, false).await?;

    let number_segment = number.to_string();
    let removals = issue
      .labels
      .iter()
      .filter(|l| !labels.contains(&l.name))
      .map(|l| -> Result<(String, String)> {
        require_path_segment("label", &l.name)?;
        let path = repo_path(owner, repo, &["issues", &number_segment, "labels", &l.name])?;
        Ok((l.name.clone(), path))
      })
      .collect::<Result<Vec<_>>>()?;

    for (name, path) in removals {
      self.delete(&path).await?.error_for_status()?;
      info!("Removed label {:?} from #{}", name, number);
    }

    self.add_labels_to_issue(owner, repo, number, labels.iter().cloned()).await?;
    Ok(true)
  }
}

#[cfg(test)]
mod tests {
  use gh_util_test_utils::fixtures;
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::config::ClientConfig;

  fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::new(ClientConfig::default().with_base_url(server.uri())).unwrap()
  }

  #[tokio::test]
  async fn test_fetch_repo_labels() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/labels"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        fixtures::label_json("enhancement", "a2eeef"),
        fixtures::label_json("bug", "d73a4a"),
      ])))
      .mount(&mock_server)
      .await;

    let labels = client.fetch_repo_labels("owner", "repo").await?;
    let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();

    assert_eq!(names, vec!["bug", "enhancement"]);

    Ok(())
  }

  #[tokio::test]
  async fn test_add_labels_posts_only_missing() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/1/labels"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([fixtures::label_json("bug", "d73a4a")])))
      .mount(&mock_server)
      .await;
    Mock::given(method("POST"))
      .and(path("/repos/owner/repo/issues/1/labels"))
      .and(body_json(json!({ "labels": ["triage"] })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        fixtures::label_json("bug", "d73a4a"),
        fixtures::label_json("triage", "ededed"),
      ])))
      .expect(1)
      .mount(&mock_server)
      .await;

    let added = client.add_labels_to_issue("owner", "repo", 1, ["bug", "triage"]).await?;
    assert!(added);

    Ok(())
  }

  #[tokio::test]
  async fn test_add_labels_noop_when_present() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/1/labels"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([fixtures::label_json("bug", "d73a4a")])))
      .mount(&mock_server)
      .await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200))
      .expect(0)
      .mount(&mock_server)
      .await;

    let added = client.add_labels_to_issue("owner", "repo", 1, vec!["bug".to_string()]).await?;
    assert!(!added);

    Ok(())
  }

  #[tokio::test]
  async fn test_update_labels_removes_stale_labels() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let mut issue = fixtures::issue_json("owner", "repo", 3, "Relabel me", fixtures::user_json("alice", 10));
    issue["labels"] = json!([
      fixtures::label_json("bug", "d73a4a"),
      fixtures::label_json("good first issue", "7057ff"),
    ]);

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/3"))
      .respond_with(ResponseTemplate::new(200).set_body_json(issue))
      .mount(&mock_server)
      .await;
    Mock::given(method("DELETE"))
      .and(path("/repos/owner/repo/issues/3/labels/good%20first%20issue"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/3/labels"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([fixtures::label_json("bug", "d73a4a")])))
      .mount(&mock_server)
      .await;
    Mock::given(method("POST"))
      .and(path("/repos/owner/repo/issues/3/labels"))
      .and(body_json(json!({ "labels": ["enhancement"] })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .expect(1)
      .mount(&mock_server)
      .await;

    let wanted = BTreeSet::from(["bug".to_string(), "enhancement".to_string()]);
    assert!(client.update_labels_on_issue("owner", "repo", 3, &wanted).await?);

    Ok(())
  }

  #[tokio::test]
  async fn test_update_labels_rejects_dot_label_before_any_change() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let mut issue = fixtures::issue_json("owner", "repo", 3, "Relabel me", fixtures::user_json("alice", 10));
    issue["labels"] = json!([fixtures::label_json(".", "ededed"), fixtures::label_json("bug", "d73a4a")]);

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/3"))
      .respond_with(ResponseTemplate::new(200).set_body_json(issue))
      .mount(&mock_server)
      .await;
    Mock::given(method("DELETE"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .expect(0)
      .mount(&mock_server)
      .await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .expect(0)
      .mount(&mock_server)
      .await;

    let wanted = BTreeSet::from(["bug".to_string()]);
    let err = client
      .update_labels_on_issue("owner", "repo", 3, &wanted)
      .await
      .unwrap_err();

    assert!(matches!(err, crate::GhError::Validation { ref field, .. } if field == "label"));

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.iter().all(|r| r.method == wiremock::http::Method::GET));

    Ok(())
  }
}
