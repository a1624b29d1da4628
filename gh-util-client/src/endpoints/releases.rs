use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::endpoints::repo_path;
use crate::error::Result;
use crate::models::Release;

impl GitHubClient {
  /// Get the latest published, non-prerelease release of a repository
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_latest_release(&self, owner: &str, repo: &str) -> Result<Release> {
    let path = repo_path(owner, repo, &["releases", "latest"])?;
    let response = self.get(&path, None).await?.error_for_status()?;
    let release: Release = response.parse()?;
    info!("Latest release of {}/{} is {}", owner, repo, release.tag_name);
    Ok(release)
  }
}
