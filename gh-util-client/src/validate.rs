//! # Payload Validation
//!
//! Turns raw JSON from the API into typed models. Structure checks come from
//! the serde derives on the models; the helpers below add the constraints serde
//! cannot express on its own. Failures are reported with the path of the
//! offending field.

use std::any::type_name;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::{self, DeserializeOwned, Unexpected};
use serde::{Deserialize, Deserializer};

use crate::error::{GhError, Result};

static MODULE_PATH_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\b[a-z_][a-z0-9_]*::").expect("Failed to compile module path regex"));

static POSITION_SUFFIX_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r" at line \d+ column \d+$").expect("Failed to compile error position regex"));

static MISSING_FIELD_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^missing field `([^`]+)`").expect("Failed to compile missing field regex"));

/// Validate a JSON document into `T`.
///
/// Unknown fields are ignored. On failure the error names the model, the path
/// of the field that failed (`.` for the document root) and the reason.
pub fn parse_as<T>(bytes: &[u8]) -> Result<T>
where
  T: DeserializeOwned,
{
  let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
  serde_path_to_error::deserialize(deserializer).map_err(|e| {
    let path = e.path().to_string();
    let reason = POSITION_SUFFIX_REGEX.replace(&e.inner().to_string(), "").into_owned();
    GhError::Validation {
      model: model_name::<T>(),
      field: field_path(&path, &reason),
      reason,
    }
  })
}

/// Validate an already decoded JSON value into `T`.
pub fn parse_value<T>(value: serde_json::Value) -> Result<T>
where
  T: DeserializeOwned,
{
  let bytes = serde_json::to_vec(&value).map_err(|e| GhError::Validation {
    model: model_name::<T>(),
    field: ".".to_string(),
    reason: e.to_string(),
  })?;
  parse_as(&bytes)
}

/// A missing field is reported at its parent; fold its name into the path.
fn field_path(path: &str, reason: &str) -> String {
  match MISSING_FIELD_REGEX.captures(reason).and_then(|c| c.get(1)) {
    Some(missing) if path == "." => missing.as_str().to_string(),
    Some(missing) => format!("{path}.{}", missing.as_str()),
    None => path.to_string(),
  }
}

/// `gh_util_client::models::Issue` -> `Issue`, `alloc::vec::Vec<...::Comment>`
/// -> `Vec<Comment>`
fn model_name<T>() -> String {
  MODULE_PATH_REGEX.replace_all(type_name::<T>(), "").into_owned()
}

/// Identifiers and issue numbers must be strictly positive.
pub(crate) fn positive<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  let value = u64::deserialize(deserializer)?;
  if value == 0 {
    return Err(de::Error::invalid_value(Unexpected::Unsigned(0), &"a positive integer"));
  }
  Ok(value)
}

/// Like [`positive`], for fields that may be absent or `null`.
pub(crate) fn positive_opt<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<u64>::deserialize(deserializer)? {
    Some(0) => Err(de::Error::invalid_value(Unexpected::Unsigned(0), &"a positive integer")),
    other => Ok(other),
  }
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
  use serde::Deserialize;
  use serde_json::json;

  use super::*;

  #[derive(Debug, Deserialize)]
  struct Inner {
    #[serde(deserialize_with = "positive")]
    id: u64,
  }

  #[derive(Debug, Deserialize)]
  struct Outer {
    name: String,
    inner: Inner,
    #[serde(default, deserialize_with = "null_as_default")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "positive_opt")]
    count: Option<u64>,
  }

  fn bytes(value: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
  }

  #[test]
  fn test_valid_payload_with_unknown_fields() {
    let outer: Outer = parse_as(&bytes(json!({
      "name": "x",
      "inner": { "id": 3, "extra": true },
      "tags": null,
      "unexpected": [1, 2, 3]
    })))
    .unwrap();

    assert_eq!(outer.name, "x");
    assert_eq!(outer.inner.id, 3);
    assert!(outer.tags.is_empty());
    assert_eq!(outer.count, None);
  }

  #[test]
  fn test_missing_root_field_is_named() {
    let err = parse_as::<Outer>(&bytes(json!({ "inner": { "id": 1 } }))).unwrap_err();

    match err {
      GhError::Validation { model, field, reason } => {
        assert_eq!(model, "Outer");
        assert_eq!(field, "name");
        assert!(reason.contains("missing field `name`"));
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_nested_failure_reports_path() {
    let err = parse_as::<Outer>(&bytes(json!({ "name": "x", "inner": { "id": 0 } }))).unwrap_err();

    match err {
      GhError::Validation { field, reason, .. } => {
        assert_eq!(field, "inner.id");
        assert!(reason.contains("a positive integer"));
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_missing_nested_field_joins_path() {
    let err = parse_as::<Outer>(&bytes(json!({ "name": "x", "inner": {} }))).unwrap_err();

    match err {
      GhError::Validation { field, .. } => assert_eq!(field, "inner.id"),
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_zero_optional_count_rejected() {
    let err = parse_as::<Outer>(&bytes(json!({ "name": "x", "inner": { "id": 1 }, "count": 0 }))).unwrap_err();

    match err {
      GhError::Validation { field, .. } => assert_eq!(field, "count"),
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_non_json_body() {
    let err = parse_as::<Outer>(b"<html>oops</html>").unwrap_err();
    assert!(matches!(err, GhError::Validation { ref field, .. } if field == "."));
  }

  #[test]
  fn test_model_name_for_collections() {
    assert_eq!(model_name::<Vec<Inner>>(), "Vec<Inner>");
  }
}
