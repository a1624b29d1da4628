//! JSON payloads shaped like GitHub REST API responses.
//!
//! Only the fields the models need plus a few realistic extras; tests tweak
//! the returned values when they need something specific.

use serde_json::{Value, json};

const API: &str = "https://api.github.com";
const WEB: &str = "https://github.com";

/// A regular user account
pub fn user_json(login: &str, id: u64) -> Value {
  account_json(login, id, "User")
}

/// A bot account (GitHub Apps, dependabot and friends)
pub fn bot_json(login: &str, id: u64) -> Value {
  account_json(login, id, "Bot")
}

fn account_json(login: &str, id: u64, account_type: &str) -> Value {
  json!({
    "login": login,
    "id": id,
    "node_id": format!("MDQ6VXNlcj{id}"),
    "avatar_url": format!("https://avatars.githubusercontent.com/u/{id}?v=4"),
    "gravatar_id": "",
    "url": format!("{API}/users/{login}"),
    "html_url": format!("{WEB}/{login}"),
    "type": account_type,
    "site_admin": false
  })
}

pub fn label_json(name: &str, color: &str) -> Value {
  json!({
    "id": 208045946,
    "node_id": "MDU6TGFiZWwyMDgwNDU5NDY=",
    "url": format!("{API}/repos/owner/repo/labels/{}", name.replace(' ', "%20")),
    "name": name,
    "color": color,
    "default": false,
    "description": null
  })
}

pub fn comment_json(id: u64, body: &str, user: Value) -> Value {
  json!({
    "id": id,
    "node_id": format!("IC_kwDO{id}"),
    "url": format!("{API}/repos/owner/repo/issues/comments/{id}"),
    "html_url": format!("{WEB}/owner/repo/issues/1#issuecomment-{id}"),
    "issue_url": format!("{API}/repos/owner/repo/issues/1"),
    "body": body,
    "user": user,
    "author_association": "CONTRIBUTOR",
    "created_at": "2024-01-05T12:00:00Z",
    "updated_at": "2024-01-05T12:00:00Z"
  })
}

pub fn issue_json(owner: &str, repo: &str, number: u64, title: &str, user: Value) -> Value {
  json!({
    "id": 2000000 + number,
    "node_id": "I_kwDOABCD",
    "number": number,
    "title": title,
    "body": "Something is not right.",
    "state": "open",
    "state_reason": null,
    "locked": false,
    "user": user,
    "labels": [],
    "assignees": [],
    "comments": 0,
    "url": format!("{API}/repos/{owner}/{repo}/issues/{number}"),
    "html_url": format!("{WEB}/{owner}/{repo}/issues/{number}"),
    "comments_url": format!("{API}/repos/{owner}/{repo}/issues/{number}/comments"),
    "created_at": "2024-01-05T10:00:00Z",
    "updated_at": "2024-01-06T10:00:00Z",
    "closed_at": null,
    "author_association": "NONE"
  })
}

pub fn pull_request_json(owner: &str, repo: &str, number: u64, head: &str, base: &str, user: Value) -> Value {
  json!({
    "id": 3000000 + number,
    "number": number,
    "title": format!("Merge {head} into {base}"),
    "body": null,
    "state": "open",
    "user": user.clone(),
    "labels": [],
    "assignees": [],
    "requested_reviewers": [],
    "url": format!("{API}/repos/{owner}/{repo}/pulls/{number}"),
    "html_url": format!("{WEB}/{owner}/{repo}/pull/{number}"),
    "diff_url": format!("{WEB}/{owner}/{repo}/pull/{number}.diff"),
    "comments_url": format!("{API}/repos/{owner}/{repo}/issues/{number}/comments"),
    "head": branch_json(owner, repo, head, user.clone()),
    "base": branch_json(owner, repo, base, user),
    "draft": false,
    "merged": false,
    "mergeable": true,
    "mergeable_state": "clean",
    "merge_commit_sha": null,
    "created_at": "2024-01-05T10:00:00Z",
    "updated_at": "2024-01-05T10:00:00Z",
    "closed_at": null,
    "merged_at": null
  })
}

fn branch_json(owner: &str, repo: &str, branch: &str, user: Value) -> Value {
  json!({
    "label": format!("{owner}:{branch}"),
    "ref": branch,
    "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
    "user": user.clone(),
    "repo": {
      "id": 1296269,
      "name": repo,
      "full_name": format!("{owner}/{repo}"),
      "url": format!("{API}/repos/{owner}/{repo}"),
      "html_url": format!("{WEB}/{owner}/{repo}"),
      "description": null,
      "owner": user,
      "private": false,
      "default_branch": "main"
    }
  })
}

pub fn release_json(tag: &str, author: Value) -> Value {
  json!({
    "id": 1,
    "tag_name": tag,
    "name": tag,
    "body": "## What's Changed",
    "url": format!("{API}/repos/owner/repo/releases/1"),
    "html_url": format!("{WEB}/owner/repo/releases/tag/{tag}"),
    "author": author,
    "draft": false,
    "prerelease": false,
    "created_at": "2024-02-01T00:00:00Z",
    "published_at": "2024-02-01T00:00:00Z"
  })
}

/// A repository event; `payload` carries the type-specific data
pub fn event_json(id: &str, event_type: &str, actor: Value, payload: Value, created_at: &str) -> Value {
  json!({
    "id": id,
    "type": event_type,
    "actor": actor,
    "repo": {
      "id": 1296269,
      "name": "owner/repo",
      "url": format!("{API}/repos/owner/repo")
    },
    "payload": payload,
    "public": true,
    "created_at": created_at
  })
}

pub fn commit_json(sha: &str, message: &str) -> Value {
  json!({
    "sha": sha,
    "author": { "email": "dev@example.com", "name": "Dev" },
    "message": message,
    "distinct": true,
    "url": format!("{API}/repos/owner/repo/commits/{sha}")
  })
}
