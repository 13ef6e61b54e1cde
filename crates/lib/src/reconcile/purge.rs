//! Removal of release trees that are no longer configured.
//!
//! Every pass recomputes the difference between the directories under the
//! manpages root and the configured releases, so running it again without a
//! configuration change removes nothing.

use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::release::ReleaseMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurgeFailure {
  pub path: PathBuf,
  pub message: String,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct PurgeReport {
  /// Release directories found under the manpages root.
  pub scanned: usize,
  /// Configured releases that were left in place.
  pub kept: Vec<String>,
  pub removed: Vec<PathBuf>,
  /// Directories that could not be removed. The pass carries on past them.
  pub failed: Vec<PurgeFailure>,
}

impl PurgeReport {
  pub fn is_clean(&self) -> bool {
    self.failed.is_empty()
  }
}

/// Delete every directory directly under `manpages_dir` that is not a key of `releases`.
///
/// A missing root means there is nothing to purge. Directories that vanish
/// before they are removed are skipped. Names that are not valid UTF-8 can
/// never be configured and are removed.
pub fn purge_stale_releases(manpages_dir: &Path, releases: &ReleaseMap) -> io::Result<PurgeReport> {
  purge_with(manpages_dir, releases, |path| fs::remove_dir_all(path))
}

fn purge_with<F>(manpages_dir: &Path, releases: &ReleaseMap, remove: F) -> io::Result<PurgeReport>
where
  F: Fn(&Path) -> io::Result<()>,
{
  let mut report = PurgeReport::default();

  let entries = match fs::read_dir(manpages_dir) {
    Ok(entries) => entries,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!(path = %manpages_dir.display(), "manpages directory does not exist, nothing to purge");
      return Ok(report);
    }
    Err(e) => return Err(e),
  };

  let mut candidates: Vec<PathBuf> = Vec::new();
  for entry in entries {
    match entry {
      Ok(entry) => {
        let path = entry.path();
        if path.is_dir() {
          candidates.push(path);
        }
      }
      Err(e) => {
        warn!(path = %manpages_dir.display(), error = %e, "failed to read manpages directory entry");
        report.failed.push(PurgeFailure {
          path: manpages_dir.to_path_buf(),
          message: e.to_string(),
        });
      }
    }
  }
  candidates.sort();

  for path in candidates {
    report.scanned += 1;

    let configured = path
      .file_name()
      .and_then(|name| name.to_str())
      .filter(|name| releases.contains(name));
    if let Some(name) = configured {
      report.kept.push(name.to_string());
      continue;
    }

    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    info!(release = %name, "purging manpages");
    match remove(&path) {
      Ok(()) => report.removed.push(path),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = %path.display(), "release directory already gone");
      }
      Err(e) => {
        warn!(path = %path.display(), error = %e, "failed to purge release directory");
        report.failed.push(PurgeFailure {
          path,
          message: e.to_string(),
        });
      }
    }
  }

  info!(
    scanned = report.scanned,
    removed = report.removed.len(),
    failed = report.failed.len(),
    "purge complete"
  );
  Ok(report)
}
