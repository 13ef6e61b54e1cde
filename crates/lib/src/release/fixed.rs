use std::collections::BTreeMap;

use super::{ReleaseProvider, ResolveError};

/// Releases served when no live metadata service is used.
const KNOWN_RELEASES: &[(&str, &str)] = &[
  ("jammy", "22.04"),
  ("noble", "24.04"),
  ("oracular", "24.10"),
  ("plucky", "25.04"),
  ("questing", "25.10"),
];

/// Provider backed by a fixed table, for offline use and tests.
#[derive(Debug, Clone)]
pub struct FixedReleases {
  table: BTreeMap<String, String>,
}

impl FixedReleases {
  pub fn new<K, V>(table: impl IntoIterator<Item = (K, V)>) -> Self
  where
    K: Into<String>,
    V: Into<String>,
  {
    Self {
      table: table.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
  }
}

impl Default for FixedReleases {
  fn default() -> Self {
    Self::new(KNOWN_RELEASES.iter().copied())
  }
}

impl ReleaseProvider for FixedReleases {
  fn lookup(&self, codenames: &[String]) -> Result<BTreeMap<String, String>, ResolveError> {
    let mut found = BTreeMap::new();
    for name in codenames {
      let version = self
        .table
        .get(name)
        .ok_or_else(|| ResolveError::ReleaseNotFound(name.clone()))?;
      found.insert(name.clone(), version.clone());
    }
    Ok(found)
  }
}
