use tracing::instrument;

use crate::client::GitHubClient;
use crate::endpoints::{encode_path, path_argument};
use crate::error::Result;
use crate::models::User;

impl GitHubClient {
  /// Get a user's public profile
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_user(&self, login: &str) -> Result<User> {
    let login = path_argument("login", login)?;
    let path = encode_path(&["users", login])?;
    self.get(&path, None).await?.error_for_status()?.parse()
  }

  /// Get the user the configured token belongs to
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_authenticated_user(&self) -> Result<User> {
    self.get("/user", None).await?.error_for_status()?.parse()
  }
}
