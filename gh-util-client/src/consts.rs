//! Constants for the gh-util client

/// Base URL for the official SaaS GitHub REST API
pub const API_BASE_URL: &str = "https://api.github.com";

/// REST API version sent with every request
pub const API_VERSION: &str = "2022-11-28";

/// Header carrying the REST API version
pub const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github+json";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!("gh-util/", env!("CARGO_PKG_VERSION"));

/// Base branch used when opening a pull request without an explicit base
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Application-specific token variable, checked first
pub const TOKEN_ENV_VAR: &str = "GH_UTIL_TOKEN";

/// Generic token variable shared with other GitHub tooling
pub const FALLBACK_TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

pub const BASE_URL_ENV_VAR: &str = "GH_UTIL_BASE_URL";
pub const API_VERSION_ENV_VAR: &str = "GH_UTIL_API_VERSION";
pub const DEFAULT_BASE_ENV_VAR: &str = "GH_UTIL_DEFAULT_BASE";
pub const CONFIG_PATH_ENV_VAR: &str = "GH_UTIL_CONFIG";

/// Largest page size the REST API accepts
pub const MAX_PER_PAGE: u8 = 100;

/// How far back contributor activity looks when no start time is given
pub const DEFAULT_ACTIVITY_WINDOW_HOURS: i64 = 24;
