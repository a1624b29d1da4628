//! # Client Configuration
//!
//! Everything the client needs is collected into a [`ClientConfig`] before the
//! client is built, so nothing downstream reads global state.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults
//! 2. `config.toml` in the gh-util config directory (or `$GH_UTIL_CONFIG`)
//! 3. `GH_UTIL_*` environment variables
//! 4. explicit `with_*` calls
//!
//! Tokens only ever come from the environment, see [`crate::auth`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::auth::{Token, resolve_token_with};
use crate::consts::{
  API_BASE_URL, API_VERSION, API_VERSION_ENV_VAR, BASE_URL_ENV_VAR, CONFIG_PATH_ENV_VAR, DEFAULT_BASE_BRANCH,
  DEFAULT_BASE_ENV_VAR, USER_AGENT,
};
use crate::error::{GhError, Result};

/// Settings used to build a [`crate::GitHubClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
  /// REST root, without a trailing slash
  pub base_url: String,
  pub api_version: String,
  pub user_agent: String,
  /// Branch new pull requests target when no base is given
  pub default_base: String,
  pub token: Option<Token>,
}

/// On-disk configuration file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
  base_url: Option<String>,
  api_version: Option<String>,
  user_agent: Option<String>,
  default_base: Option<String>,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: API_BASE_URL.to_string(),
      api_version: API_VERSION.to_string(),
      user_agent: USER_AGENT.to_string(),
      default_base: DEFAULT_BASE_BRANCH.to_string(),
      token: None,
    }
  }
}

impl ClientConfig {
  /// Load configuration from the config file and the process environment.
  pub fn from_env() -> Result<Self> {
    Self::load_with(|name| std::env::var(name).ok())
  }

  /// Load configuration reading variables through `lookup`.
  pub fn load_with<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();

    if let Some(path) = config_file_path(&lookup)
      && let Some(file) = read_config_file(&path)?
    {
      config.apply_file(file);
    }

    if let Some(base_url) = non_empty(lookup(BASE_URL_ENV_VAR)) {
      config = config.with_base_url(base_url);
    }
    if let Some(api_version) = non_empty(lookup(API_VERSION_ENV_VAR)) {
      config.api_version = api_version;
    }
    if let Some(default_base) = non_empty(lookup(DEFAULT_BASE_ENV_VAR)) {
      config.default_base = default_base;
    }

    config.token = resolve_token_with(&lookup);

    debug!(
      "Loaded client config: base_url={}, api_version={}, authenticated={}",
      config.base_url,
      config.api_version,
      config.token.is_some()
    );
    Ok(config)
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into().trim_end_matches('/').to_string();
    self
  }

  pub fn with_token(mut self, token: Option<Token>) -> Self {
    self.token = token;
    self
  }

  pub fn with_default_base(mut self, default_base: impl Into<String>) -> Self {
    self.default_base = default_base.into();
    self
  }

  fn apply_file(&mut self, file: FileConfig) {
    if let Some(base_url) = file.base_url {
      self.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(api_version) = file.api_version {
      self.api_version = api_version;
    }
    if let Some(user_agent) = file.user_agent {
      self.user_agent = user_agent;
    }
    if let Some(default_base) = file.default_base {
      self.default_base = default_base;
    }
  }
}

/// `$GH_UTIL_CONFIG`, else `config.toml` in the platform config directory.
fn config_file_path<F>(lookup: &F) -> Option<PathBuf>
where
  F: Fn(&str) -> Option<String>,
{
  non_empty(lookup(CONFIG_PATH_ENV_VAR))
    .map(PathBuf::from)
    .or_else(|| ProjectDirs::from("", "", "gh-util").map(|dirs| dirs.config_dir().join("config.toml")))
}

fn read_config_file(path: &Path) -> Result<Option<FileConfig>> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) if e.kind() == ErrorKind::NotFound => {
      trace!("No config file at {}", path.display());
      return Ok(None);
    }
    Err(e) => {
      return Err(GhError::Configuration(format!(
        "Failed to read config from {}: {e}",
        path.display()
      )));
    }
  };

  let file = toml::from_str::<FileConfig>(&content)
    .map_err(|e| GhError::Configuration(format!("Failed to parse config from {}: {e}", path.display())))?;
  debug!("Read config file {}", path.display());
  Ok(Some(file))
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
