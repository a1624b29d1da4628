//! Repository event stream and the per-contributor activity built from it.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, instrument, trace};

use crate::client::GitHubClient;
use crate::consts::{DEFAULT_ACTIVITY_WINDOW_HOURS, MAX_PER_PAGE};
use crate::endpoints::repo_path;
use crate::error::Result;
use crate::models::{ContributorActivity, Event};

/// Parameters for [`GitHubClient::fetch_contributor_data`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorDataParams {
  /// Events older than this are ignored; the last 24 hours when `None`
  pub since: Option<DateTime<Utc>>,
  /// Number of events to read, clamped to 1..=100
  pub max_events: u8,
  /// Logins whose events are ignored
  pub excluded_users: BTreeSet<String>,
}

impl Default for ContributorDataParams {
  fn default() -> Self {
    Self {
      since: None,
      max_events: MAX_PER_PAGE,
      excluded_users: BTreeSet::new(),
    }
  }
}

impl GitHubClient {
  /// Get the most recent public events of a repository (one page)
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_repo_events(&self, owner: &str, repo: &str, per_page: u8) -> Result<Vec<Event>> {
    let path = repo_path(owner, repo, &["events"])?;
    let query = [("per_page", per_page.clamp(1, MAX_PER_PAGE).to_string())];

    let response = self.get(&path, Some(&query)).await?.error_for_status()?;
    let events: Vec<Event> = response.parse()?;
    debug!("Received {} events for {}/{}", events.len(), owner, repo);
    Ok(events)
  }

  /// Group a repository's recent events by the contributor who caused them.
  ///
  /// Every actor with at least one event since `params.since` gets an entry,
  /// keyed by login. Opened issues, opened pull requests and pushed non-merge
  /// commits are collected; other events only register the actor.
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_contributor_data(
    &self,
    owner: &str,
    repo: &str,
    params: &ContributorDataParams,
  ) -> Result<BTreeMap<String, ContributorActivity>> {
    let since = params
      .since
      .unwrap_or_else(|| Utc::now() - TimeDelta::hours(DEFAULT_ACTIVITY_WINDOW_HOURS));
    info!("Fetching contributor activity for {}/{} since {}", owner, repo, since);

    let events = self.fetch_repo_events(owner, repo, params.max_events).await?;

    let mut activity: BTreeMap<String, ContributorActivity> = BTreeMap::new();
    for event in events {
      if params.excluded_users.contains(&event.actor.login) || event.created_at < since {
        trace!("Skipping event {} by {}", event.id, event.actor.login);
        continue;
      }
      activity
        .entry(event.actor.login.clone())
        .or_insert_with(|| ContributorActivity::new(event.actor.clone()))
        .record(event);
    }

    debug!("Found activity for {} contributors", activity.len());
    Ok(activity)
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use gh_util_test_utils::fixtures;
  use serde_json::json;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::config::ClientConfig;
  use crate::error::GhError;

  fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::new(ClientConfig::default().with_base_url(server.uri())).unwrap()
  }

  fn since() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()
  }

  #[tokio::test]
  async fn test_fetch_contributor_data_groups_by_actor() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let alice = fixtures::user_json("alice", 10);
    let bob = fixtures::user_json("bob", 11);
    let carol = fixtures::user_json("carol", 12);
    let issue = fixtures::issue_json("owner", "repo", 7, "Crash on start", alice.clone());
    let pr = fixtures::pull_request_json("owner", "repo", 8, "fix-crash", "main", bob.clone());
    let push = json!({ "commits": [
      fixtures::commit_json("a1", "Handle missing config"),
      fixtures::commit_json("a2", "Merge branch 'main' into fix"),
    ] });

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/events"))
      .and(query_param("per_page", "100"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        fixtures::event_json(
          "1",
          "IssuesEvent",
          alice.clone(),
          json!({ "action": "opened", "issue": issue }),
          "2024-01-06T10:00:00Z",
        ),
        fixtures::event_json(
          "2",
          "PullRequestEvent",
          bob,
          json!({ "action": "opened", "pull_request": pr }),
          "2024-01-06T11:00:00Z",
        ),
        fixtures::event_json("3", "PushEvent", alice, push, "2024-01-06T12:00:00Z"),
        fixtures::event_json("4", "WatchEvent", carol, json!({ "action": "started" }), "2024-01-06T13:00:00Z"),
      ])))
      .expect(1)
      .mount(&mock_server)
      .await;

    let params = ContributorDataParams {
      since: Some(since()),
      ..ContributorDataParams::default()
    };
    let activity = client.fetch_contributor_data("owner", "repo", &params).await?;

    assert_eq!(activity.keys().collect::<Vec<_>>(), vec!["alice", "bob", "carol"]);

    let alice_activity = &activity["alice"];
    assert_eq!(alice_activity.created_issues.len(), 1);
    assert_eq!(alice_activity.created_issues[0].number, 7);
    assert_eq!(alice_activity.merged_commits.len(), 1);
    assert_eq!(alice_activity.merged_commits[0].message, "Handle missing config");

    assert_eq!(activity["bob"].created_pull_requests[0].number, 8);
    assert!(activity["carol"].is_empty());

    Ok(())
  }

  #[tokio::test]
  async fn test_fetch_contributor_data_filters_old_and_excluded() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let alice = fixtures::user_json("alice", 10);
    let bot = fixtures::bot_json("github-actions[bot]", 41898282);
    let bot_push = json!({ "commits": [fixtures::commit_json("b1", "Release")] });
    let old_push = json!({ "commits": [fixtures::commit_json("a1", "Old work")] });

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/events"))
      .and(query_param("per_page", "20"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        fixtures::event_json("1", "PushEvent", bot, bot_push, "2024-01-06T10:00:00Z"),
        fixtures::event_json("2", "PushEvent", alice, old_push, "2024-01-04T10:00:00Z"),
      ])))
      .mount(&mock_server)
      .await;

    let params = ContributorDataParams {
      since: Some(since()),
      max_events: 20,
      excluded_users: BTreeSet::from(["github-actions[bot]".to_string()]),
    };
    let activity = client.fetch_contributor_data("owner", "repo", &params).await?;

    assert!(activity.is_empty());

    Ok(())
  }

  #[tokio::test]
  async fn test_fetch_repo_events_clamps_page_size() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/events"))
      .and(query_param("per_page", "1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .expect(1)
      .mount(&mock_server)
      .await;

    let events = client.fetch_repo_events("owner", "repo", 0).await?;
    assert!(events.is_empty());

    Ok(())
  }

  #[tokio::test]
  async fn test_invalid_event_is_validation_error() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let alice = fixtures::user_json("alice", 10);
    let mut event = fixtures::event_json("1", "PushEvent", alice, json!({}), "2024-01-06T10:00:00Z");
    event["actor"]["id"] = json!(0);

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/events"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([event])))
      .mount(&mock_server)
      .await;

    let err = client
      .fetch_contributor_data("owner", "repo", &ContributorDataParams::default())
      .await
      .unwrap_err();

    assert!(matches!(err, GhError::Validation { ref field, .. } if field.ends_with("actor.id")));

    Ok(())
  }
}
