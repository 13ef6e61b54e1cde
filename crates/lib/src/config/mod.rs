//! The desired-state document and its persistence.

mod spec;
mod store;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_ARCH, DEFAULT_ARCHIVE, DEFAULT_REPOS, DEFAULT_SITE};
use crate::platform::Layout;
use crate::release::{ReleaseMap, ResolveError};

pub use spec::parse_release_spec;
pub use store::{ConfigStore, read_config};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid releases spec: {reason}")]
  InvalidSpec {
    reason: String,
    #[source]
    source: Option<ResolveError>,
  },

  #[error("configuration unavailable at {}: {message}", path.display())]
  Unavailable { path: PathBuf, message: String },

  #[error("failed to serialize configuration: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("failed to write configuration to {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

/// Everything the update unit and the search view need to know about the mirror.
///
/// Persisted keys are read by external scripts and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseConfiguration {
  /// Base URL the mirror is reachable at.
  pub site: String,
  /// Upstream package archive.
  pub archive: String,
  #[serde(rename = "debdir")]
  pub content_root: PathBuf,
  #[serde(rename = "public_html_dir")]
  pub web_root: PathBuf,
  /// Configured releases, newest first.
  pub releases: ReleaseMap,
  #[serde(rename = "repos")]
  pub repositories: Vec<String>,
  #[serde(rename = "arch")]
  pub architecture: String,
}

impl ReleaseConfiguration {
  /// Configuration for `releases` with every other field at its default.
  pub fn new(layout: &Layout, site: impl Into<String>, releases: ReleaseMap) -> Self {
    Self {
      site: site.into(),
      archive: DEFAULT_ARCHIVE.to_string(),
      content_root: layout.deb_dir(),
      web_root: layout.www_dir(),
      releases,
      repositories: DEFAULT_REPOS.iter().map(|r| r.to_string()).collect(),
      architecture: DEFAULT_ARCH.to_string(),
    }
  }

  pub fn with_default_site(layout: &Layout, releases: ReleaseMap) -> Self {
    Self::new(layout, DEFAULT_SITE, releases)
  }
}
