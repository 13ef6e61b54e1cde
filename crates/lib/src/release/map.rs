//! Ordered codename to version mapping.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Release codename → version, in presentation order.
///
/// Serializes as a JSON object whose key order is the map order, so the
/// descending order chosen at resolution time survives a save/load cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseMap {
  entries: Vec<(String, String)>,
}

impl ReleaseMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert or replace a release. A replaced release keeps its position.
  pub fn insert(&mut self, codename: impl Into<String>, version: impl Into<String>) -> Option<String> {
    let codename = codename.into();
    let version = version.into();
    match self.entries.iter_mut().find(|(name, _)| *name == codename) {
      Some((_, existing)) => Some(std::mem::replace(existing, version)),
      None => {
        self.entries.push((codename, version));
        None
      }
    }
  }

  pub fn get(&self, codename: &str) -> Option<&str> {
    self
      .entries
      .iter()
      .find(|(name, _)| name == codename)
      .map(|(_, version)| version.as_str())
  }

  pub fn contains(&self, codename: &str) -> bool {
    self.get(codename).is_some()
  }

  pub fn codenames(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(name, _)| name.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.entries.iter().map(|(name, version)| (name.as_str(), version.as_str()))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReleaseMap {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut map = ReleaseMap::new();
    for (codename, version) in iter {
      map.insert(codename, version);
    }
    map
  }
}

impl Serialize for ReleaseMap {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (codename, version) in &self.entries {
      map.serialize_entry(codename, version)?;
    }
    map.end()
  }
}

struct ReleaseMapVisitor;

impl<'de> Visitor<'de> for ReleaseMapVisitor {
  type Value = ReleaseMap;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("a map of release codenames to version strings")
  }

  fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
    let mut map = ReleaseMap::new();
    while let Some((codename, version)) = access.next_entry::<String, String>()? {
      if map.contains(&codename) {
        return Err(serde::de::Error::custom(format!("duplicate release '{}'", codename)));
      }
      map.entries.push((codename, version));
    }
    Ok(map)
  }
}

impl<'de> Deserialize<'de> for ReleaseMap {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_map(ReleaseMapVisitor)
  }
}
