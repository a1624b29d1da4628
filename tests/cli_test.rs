use assert_cmd::cargo::cargo_bin_cmd;
use gh_util_test_utils::fixtures;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `gh-util` with the given args, talking to `base_url` anonymously and without a config file
fn run_against(base_url: String, temp_dir: &TempDir, args: &[&str]) -> assert_cmd::assert::Assert {
  let config_path = temp_dir.path().join("absent.toml");
  let mut cmd = cargo_bin_cmd!("gh-util");
  cmd
    .env("GH_UTIL_BASE_URL", base_url)
    .env("GH_UTIL_CONFIG", config_path)
    .env_remove("GH_UTIL_TOKEN")
    .env_remove("GITHUB_TOKEN")
    .env_remove("GH_UTIL_API_VERSION")
    .args(args);
  cmd.assert()
}

#[test]
fn help_output_lists_subcommands() {
  cargo_bin_cmd!("gh-util")
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("issue"))
    .stdout(predicate::str::contains("labels"))
    .stdout(predicate::str::contains("release"))
    .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn invalid_repository_is_rejected() {
  let temp_dir = TempDir::new().unwrap();
  run_against("http://127.0.0.1:9".to_string(), &temp_dir, &["issue", "not a repo", "1"])
    .failure()
    .stderr(predicate::str::contains("could not extract owner and repo"));
}

#[test]
fn zero_issue_number_is_rejected() {
  let temp_dir = TempDir::new().unwrap();
  run_against("http://127.0.0.1:9".to_string(), &temp_dir, &["issue", "prefecthq/marvin", "0"])
    .failure()
    .stderr(predicate::str::contains("number"));
}

#[tokio::test(flavor = "multi_thread")]
async fn issue_is_printed_as_json() {
  let mock_server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/repos/prefecthq/marvin/issues/723"))
    .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::issue_json(
      "prefecthq",
      "marvin",
      723,
      "Add streaming support",
      fixtures::user_json("octocat", 1),
    )))
    .expect(1)
    .mount(&mock_server)
    .await;

  let base_url = mock_server.uri();
  let output = tokio::task::spawn_blocking(move || {
    let temp_dir = TempDir::new().unwrap();
    run_against(
      base_url,
      &temp_dir,
      &["issue", "https://github.com/prefecthq/marvin", "723"],
    )
    .success()
    .get_output()
    .stdout
    .clone()
  })
  .await
  .unwrap();

  let issue: Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(issue["number"], 723);
  assert_eq!(issue["title"], "Add streaming support");
  assert_eq!(issue["user"]["login"], "octocat");
}

#[tokio::test(flavor = "multi_thread")]
async fn api_error_is_reported_with_status() {
  let mock_server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/repos/prefecthq/marvin/releases/latest"))
    .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "Not Found" })))
    .mount(&mock_server)
    .await;

  let base_url = mock_server.uri();
  tokio::task::spawn_blocking(move || {
    let temp_dir = TempDir::new().unwrap();
    run_against(base_url, &temp_dir, &["release", "prefecthq/marvin"])
      .failure()
      .stderr(predicate::str::contains("404"))
      .stderr(predicate::str::contains("Not Found"));
  })
  .await
  .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn activity_is_grouped_by_login() {
  let mock_server = MockServer::start().await;
  let push = serde_json::json!({ "commits": [fixtures::commit_json("a1", "Add streaming support")] });
  Mock::given(method("GET"))
    .and(path("/repos/prefecthq/marvin/events"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([fixtures::event_json(
      "1",
      "PushEvent",
      fixtures::user_json("octocat", 1),
      push,
      "2024-01-06T10:00:00Z",
    )])))
    .expect(1)
    .mount(&mock_server)
    .await;

  let base_url = mock_server.uri();
  let output = tokio::task::spawn_blocking(move || {
    let temp_dir = TempDir::new().unwrap();
    run_against(
      base_url,
      &temp_dir,
      &["activity", "prefecthq/marvin", "--since", "2024-01-05T00:00:00Z"],
    )
    .success()
    .get_output()
    .stdout
    .clone()
  })
  .await
  .unwrap();

  let activity: Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(activity["octocat"]["merged_commits"][0]["message"], "Add streaming support");
}
