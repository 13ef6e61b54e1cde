//! Release codename resolution.
//!
//! A [`ReleaseProvider`] knows which versions exist; the [`ReleaseResolver`]
//! validates a requested set against it and fixes the presentation order.

mod fixed;
mod launchpad;
mod map;
mod version;

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

pub use fixed::FixedReleases;
pub use launchpad::{LAUNCHPAD_SERIES_URL, LaunchpadReleases};
pub use map::ReleaseMap;
pub use version::compare_versions;

#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("release '{0}' not found")]
  ReleaseNotFound(String),

  #[error("no release codenames given")]
  Empty,

  #[error("release lookup failed: {0}")]
  Lookup(String),
}

/// Source of release metadata.
///
/// Implementations return the version of every codename they know among
/// `codenames` and fail with [`ResolveError::ReleaseNotFound`] naming the first
/// one they do not.
pub trait ReleaseProvider {
  fn lookup(&self, codenames: &[String]) -> Result<BTreeMap<String, String>, ResolveError>;
}

pub struct ReleaseResolver<'a> {
  provider: &'a dyn ReleaseProvider,
}

impl<'a> ReleaseResolver<'a> {
  pub fn new(provider: &'a dyn ReleaseProvider) -> Self {
    Self { provider }
  }

  /// Resolve codenames to versions, newest first.
  ///
  /// Duplicates keep their first position. Releases with equal versions keep
  /// input order. Nothing is returned unless every codename resolves.
  pub fn resolve(&self, codenames: &[String]) -> Result<ReleaseMap, ResolveError> {
    let mut unique: Vec<String> = Vec::with_capacity(codenames.len());
    for name in codenames {
      if !unique.contains(name) {
        unique.push(name.clone());
      }
    }

    if unique.is_empty() {
      return Err(ResolveError::Empty);
    }

    let found = self.provider.lookup(&unique)?;

    let mut entries = Vec::with_capacity(unique.len());
    for name in unique {
      match found.get(&name) {
        Some(version) => {
          let version = version.clone();
          entries.push((name, version));
        }
        None => return Err(ResolveError::ReleaseNotFound(name)),
      }
    }

    entries.sort_by(|(_, a), (_, b)| compare_versions(b, a));

    debug!(releases = ?entries, "resolved releases");
    Ok(entries.into_iter().collect())
  }
}
