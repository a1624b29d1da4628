//! Credential discovery for the GitHub client.
//!
//! Tokens come from an ordered list of environment variables. The lookup is
//! passed in as a function so the resolution order can be exercised without
//! touching the process environment; [`resolve_token`] is the thin wrapper that
//! reads the real one.

use std::fmt;

use tracing::debug;

use crate::consts::{FALLBACK_TOKEN_ENV_VAR, TOKEN_ENV_VAR};

/// Environment variables consulted for a token, highest priority first
pub const TOKEN_ENV_VARS: [&str; 2] = [TOKEN_ENV_VAR, FALLBACK_TOKEN_ENV_VAR];

/// A bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
  pub fn new(token: impl Into<String>) -> Self {
    Self(token.into())
  }

  /// The raw secret, for building the Authorization header
  pub fn expose(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Token(<redacted>)")
  }
}

/// Resolve a token from the process environment.
pub fn resolve_token() -> Option<Token> {
  resolve_token_with(|name| std::env::var(name).ok())
}

/// Resolve a token using `lookup` to read variables.
///
/// The first variable in [`TOKEN_ENV_VARS`] holding a non-blank value wins.
/// Returns `None` when nothing is set; requests then go out unauthenticated.
pub fn resolve_token_with<F>(lookup: F) -> Option<Token>
where
  F: Fn(&str) -> Option<String>,
{
  for name in TOKEN_ENV_VARS {
    if let Some(value) = lookup(name) {
      let value = value.trim();
      if !value.is_empty() {
        debug!("Using GitHub token from {}", name);
        return Some(Token::new(value));
      }
    }
  }

  debug!("No GitHub token found; requests will be unauthenticated");
  None
}
