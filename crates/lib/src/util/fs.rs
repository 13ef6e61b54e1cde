use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

/// Copy the contents of `src` into `dst`, merging with what is already there.
///
/// Existing files are overwritten. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<usize> {
  let mut copied = 0;

  for entry in WalkDir::new(src) {
    let entry = entry.map_err(io::Error::other)?;
    let relative = entry
      .path()
      .strip_prefix(src)
      .map_err(io::Error::other)?;
    let target = dst.join(relative);

    if entry.file_type().is_dir() {
      std::fs::create_dir_all(&target)?;
    } else {
      if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
      }
      std::fs::copy(entry.path(), &target)?;
      copied += 1;
    }
  }

  debug!(src = %src.display(), dst = %dst.display(), copied, "copied tree");
  Ok(copied)
}
