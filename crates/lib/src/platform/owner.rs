//! Ownership of the managed tree.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum OwnerError {
  #[error("user not found: {0}")]
  UnknownUser(String),

  #[error("failed to look up user {user}: {message}")]
  Lookup { user: String, message: String },

  #[error("failed to change ownership of {}: {message}", path.display())]
  Chown { path: PathBuf, message: String },

  #[error("failed to walk {}: {message}", path.display())]
  Walk { path: PathBuf, message: String },
}

/// Hand every directory and file under `root` to `user`.
///
/// Directories must succeed. Files that disappear while walking are skipped.
/// Returns the number of entries changed.
#[cfg(unix)]
pub fn chown_tree(root: &Path, user: &str) -> Result<usize, OwnerError> {
  use nix::errno::Errno;
  use nix::unistd::{User, chown};

  let uid = match User::from_name(user) {
    Ok(Some(u)) => u.uid,
    Ok(None) => return Err(OwnerError::UnknownUser(user.to_string())),
    Err(e) => {
      return Err(OwnerError::Lookup {
        user: user.to_string(),
        message: e.to_string(),
      });
    }
  };

  let mut changed = 0;
  for entry in WalkDir::new(root) {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) if e.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::NotFound) => {
        debug!(error = %e, "entry vanished while walking");
        continue;
      }
      Err(e) => {
        return Err(OwnerError::Walk {
          path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
          message: e.to_string(),
        });
      }
    };

    let path = entry.path();
    match chown(path, Some(uid), None) {
      Ok(()) => changed += 1,
      Err(Errno::ENOENT) if !entry.file_type().is_dir() => {
        debug!(path = %path.display(), "failed to change ownership, file is gone");
      }
      Err(e) => {
        return Err(OwnerError::Chown {
          path: path.to_path_buf(),
          message: e.to_string(),
        });
      }
    }
  }

  debug!(root = %root.display(), user, changed, "ownership updated");
  Ok(changed)
}

#[cfg(not(unix))]
pub fn chown_tree(root: &Path, user: &str) -> Result<usize, OwnerError> {
  debug!(root = %root.display(), user, "ownership is not managed on this platform");
  Ok(0)
}
