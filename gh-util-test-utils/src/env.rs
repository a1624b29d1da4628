//! Environment variable management for testing
//!
//! Guards that change process environment variables for the duration of a
//! test and put the original values back when dropped. The environment is
//! process-wide, so tests using these guards must not run concurrently with
//! each other (mark them `#[serial]`).

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// Sets and removes environment variables, restoring the originals on drop
#[derive(Default)]
pub struct EnvVarGuard {
  /// Variables touched by this guard with their values before the first change
  originals: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set `name` to `value`
  pub fn set(&mut self, name: &str, value: impl AsRef<str>) -> &mut Self {
    self.remember(name);
    // SAFETY: tests using this guard are serialized, so no other thread reads
    // the environment concurrently.
    unsafe {
      env::set_var(name, value.as_ref());
    }
    self
  }

  /// Make sure `name` is unset
  pub fn remove(&mut self, name: &str) -> &mut Self {
    self.remember(name);
    // SAFETY: see `set`.
    unsafe {
      env::remove_var(name);
    }
    self
  }

  fn remember(&mut self, name: &str) {
    if !self.originals.iter().any(|(n, _)| n == name) {
      self.originals.push((name.to_string(), env::var(name).ok()));
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    for (name, original) in self.originals.iter().rev() {
      match original {
        // SAFETY: see `EnvVarGuard::set`.
        Some(val) => unsafe {
          env::set_var(name, val);
        },
        // SAFETY: see `EnvVarGuard::set`.
        None => unsafe {
          env::remove_var(name);
        },
      }
    }
  }
}

/// Points `XDG_CONFIG_HOME` at a per-test temporary directory
pub struct XdgConfigGuard {
  /// The temporary directory standing in for the XDG config home
  pub temp_dir: TempDir,
  env: EnvVarGuard,
}

impl Default for XdgConfigGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl XdgConfigGuard {
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";

  /// Create a new test environment with an empty XDG config home
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let config_home = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_home).expect("Failed to create config directory");

    let mut env = EnvVarGuard::new();
    env.set(Self::XDG_CONFIG_HOME, config_home.to_string_lossy());

    Self { temp_dir, env }
  }

  /// Path of the XDG config home
  pub fn config_home(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  /// Directory the application named `app` reads its config from
  pub fn app_config_dir(&self, app: &str) -> PathBuf {
    self.config_home().join(app)
  }

  /// Write `content` to `<config home>/<app>/config.toml`
  pub fn write_app_config(&self, app: &str, content: &str) -> PathBuf {
    let dir = self.app_config_dir(app);
    std::fs::create_dir_all(&dir).expect("Failed to create app config directory");
    let path = dir.join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config file");
    path
  }
}
