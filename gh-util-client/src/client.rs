//! # GitHub HTTP Client
//!
//! Thin wrapper over [`reqwest::Client`] that fixes the REST root, sends the
//! standard GitHub headers and authenticates with a bearer token when one is
//! configured.
//!
//! The verb methods perform exactly one round trip each and hand back the raw
//! [`ApiResponse`]; interpreting status codes is left to the caller. Dropping
//! the client releases its connection pool, so a client scoped to a block or a
//! function is cleaned up on every exit path, errors included.

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::config::ClientConfig;
use crate::consts::{ACCEPT, API_VERSION_HEADER};
use crate::error::{GhError, Result};
use crate::response::ApiResponse;

/// Query string pairs for GET requests
pub type Query<'a> = [(&'a str, String)];

/// Represents a GitHub API client
#[derive(Debug, Clone)]
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) config: ClientConfig,
}

impl GitHubClient {
  /// Create a new GitHub client from explicit configuration
  pub fn new(config: ClientConfig) -> Result<Self> {
    let base = Url::parse(&config.base_url)
      .map_err(|e| GhError::Configuration(format!("Invalid base URL '{}': {e}", config.base_url)))?;
    if !matches!(base.scheme(), "http" | "https") {
      return Err(GhError::Configuration(format!(
        "Base URL must be http(s), got '{}'",
        config.base_url
      )));
    }

    let client = Client::builder()
      .default_headers(default_headers(&config)?)
      .user_agent(config.user_agent.as_str())
      .build()
      .map_err(|e| GhError::Configuration(format!("Failed to build HTTP client: {e}")))?;

    debug!(
      "Created GitHub client for {} (authenticated: {})",
      config.base_url,
      config.token.is_some()
    );

    Ok(Self { client, config })
  }

  /// Create a client from the config file and environment
  pub fn from_env() -> Result<Self> {
    Self::new(ClientConfig::from_env()?)
  }

  pub const fn config(&self) -> &ClientConfig {
    &self.config
  }

  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }

  pub const fn is_authenticated(&self) -> bool {
    self.config.token.is_some()
  }

  pub async fn get(&self, path: &str, query: Option<&Query<'_>>) -> Result<ApiResponse> {
    self.send(Method::GET, path, query, None).await
  }

  pub async fn post(&self, path: &str, json: Option<&Value>) -> Result<ApiResponse> {
    self.send(Method::POST, path, None, json).await
  }

  pub async fn patch(&self, path: &str, json: Option<&Value>) -> Result<ApiResponse> {
    self.send(Method::PATCH, path, None, json).await
  }

  pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
    self.send(Method::DELETE, path, None, None).await
  }

  async fn send(
    &self,
    method: Method,
    path: &str,
    query: Option<&Query<'_>>,
    json: Option<&Value>,
  ) -> Result<ApiResponse> {
    let url = self.url_for(path);
    trace!("GitHub API request: {} {}", method, url);

    let mut request = self.client.request(method.clone(), &url);
    if let Some(query) = query {
      request = request.query(query);
    }
    if let Some(json) = json {
      request = request.json(json);
    }

    let response = request.send().await.map_err(|source| GhError::Transport {
      context: format!("{method} {url} failed"),
      source,
    })?;

    let status = response.status();
    let final_url = response.url().to_string();
    debug!("GitHub API response status: {} for {} {}", status, method, final_url);

    let body = response.bytes().await.map_err(|source| GhError::Transport {
      context: format!("Failed to read response body from {final_url}"),
      source,
    })?;
    trace!("GitHub API response body: {} bytes", body.len());

    Ok(ApiResponse {
      status,
      url: final_url,
      body: body.to_vec(),
    })
  }

  /// Relative paths are joined to the base URL; absolute URLs (such as a
  /// `comments_url` taken from a payload) are used unchanged.
  pub(crate) fn url_for(&self, path: &str) -> String {
    if path.starts_with("https://") || path.starts_with("http://") {
      return path.to_string();
    }
    let base = self.config.base_url.trim_end_matches('/');
    match path.strip_prefix('/') {
      Some(rest) => format!("{base}/{rest}"),
      None => format!("{base}/{path}"),
    }
  }
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
  let mut headers = HeaderMap::new();
  headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));

  let api_version = HeaderValue::from_str(&config.api_version)
    .map_err(|e| GhError::Configuration(format!("Invalid API version '{}': {e}", config.api_version)))?;
  let api_version_header = HeaderName::from_bytes(API_VERSION_HEADER.as_bytes())
    .map_err(|e| GhError::Configuration(format!("Invalid header name '{API_VERSION_HEADER}': {e}")))?;
  headers.insert(api_version_header, api_version);

  if let Some(token) = &config.token {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
      .map_err(|e| GhError::Configuration(format!("Token is not a valid header value: {e}")))?;
    auth.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, auth);
  }

  Ok(headers)
}
