//! Ordered GN generator flags.
//!
//! GN reads `--args` left to right and a later definition of a key replaces
//! an earlier one. `FlagSet` mirrors that: setting an existing key drops the
//! old entry and appends the new one, so the rendered string never carries
//! two conflicting definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A typed GN value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
  Bool(bool),
  Int(i64),
  Str(String),
}

impl fmt::Display for FlagValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FlagValue::Bool(b) => write!(f, "{}", b),
      FlagValue::Int(i) => write!(f, "{}", i),
      FlagValue::Str(s) => write!(f, "\"{}\"", s),
    }
  }
}

impl From<bool> for FlagValue {
  fn from(value: bool) -> Self {
    FlagValue::Bool(value)
  }
}

impl From<i64> for FlagValue {
  fn from(value: i64) -> Self {
    FlagValue::Int(value)
  }
}

impl From<i32> for FlagValue {
  fn from(value: i32) -> Self {
    FlagValue::Int(i64::from(value))
  }
}

impl From<&str> for FlagValue {
  fn from(value: &str) -> Self {
    FlagValue::Str(value.to_string())
  }
}

impl From<String> for FlagValue {
  fn from(value: String) -> Self {
    FlagValue::Str(value)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flag {
  pub key: String,
  pub value: FlagValue,
}

impl fmt::Display for Flag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}={}", self.key, self.value)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet {
  flags: Vec<Flag>,
}

impl FlagSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set `key`, replacing and moving to the end any earlier definition.
  pub fn set(&mut self, key: &str, value: impl Into<FlagValue>) -> &mut Self {
    self.flags.retain(|f| f.key != key);
    self.flags.push(Flag {
      key: key.to_string(),
      value: value.into(),
    });
    self
  }

  pub fn get(&self, key: &str) -> Option<&FlagValue> {
    self.flags.iter().find(|f| f.key == key).map(|f| &f.value)
  }

  pub fn contains(&self, key: &str) -> bool {
    self.get(key).is_some()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Flag> {
    self.flags.iter()
  }

  pub fn len(&self) -> usize {
    self.flags.len()
  }

  pub fn is_empty(&self) -> bool {
    self.flags.is_empty()
  }

  /// Renders the flags as a single `--args` value, e.g.
  /// `is_debug=false target_cpu="arm64"`.
  pub fn to_args(&self) -> String {
    self.flags.iter().map(Flag::to_string).collect::<Vec<_>>().join(" ")
  }
}

impl fmt::Display for FlagSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_args())
  }
}

impl<'a> IntoIterator for &'a FlagSet {
  type Item = &'a Flag;
  type IntoIter = std::slice::Iter<'a, Flag>;

  fn into_iter(self) -> Self::IntoIter {
    self.flags.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_typed_values() {
    let mut flags = FlagSet::new();
    flags
      .set("is_debug", false)
      .set("symbol_level", 1)
      .set("target_cpu", "arm64");

    assert_eq!(flags.to_args(), r#"is_debug=false symbol_level=1 target_cpu="arm64""#);
  }

  #[test]
  fn last_definition_wins_and_moves_to_end() {
    let mut flags = FlagSet::new();
    flags.set("a", true).set("b", true).set("a", false);

    assert_eq!(flags.len(), 2);
    assert_eq!(flags.get("a"), Some(&FlagValue::Bool(false)));
    assert_eq!(flags.to_args(), "b=true a=false");
  }

  #[test]
  fn empty_set_renders_empty_string() {
    let flags = FlagSet::new();
    assert!(flags.is_empty());
    assert_eq!(flags.to_args(), "");
  }

  #[test]
  fn serializes_as_ordered_list() {
    let mut flags = FlagSet::new();
    flags.set("use_rtti", true).set("ffmpeg_branding", "Chrome");

    let json = serde_json::to_value(&flags).unwrap();
    assert_eq!(
      json,
      serde_json::json!([
        { "key": "use_rtti", "value": true },
        { "key": "ffmpeg_branding", "value": "Chrome" }
      ])
    );
  }
}
