//! Test utilities shared across the gh-util workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - XDG config directory isolation ([`XdgConfigGuard`])
//! - JSON payloads shaped like GitHub API responses ([`fixtures`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

// Re-export commonly used items
pub use env::{EnvVarGuard, XdgConfigGuard};
