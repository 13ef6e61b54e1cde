use thiserror::Error;
use tracing::{debug, info};

use super::command::run;

#[derive(Debug, Error)]
pub enum PackageError {
  #[error("failed to update package cache: {0}")]
  CacheUpdate(String),

  #[error("package {0} not found in any configured source")]
  NotFound(String),

  #[error("failed to install {package}: {message}")]
  InstallFailed { package: String, message: String },
}

pub trait PackageManager {
  /// Refresh the package index.
  fn refresh(&self) -> Result<(), PackageError>;

  /// Install `package` unless it is already present.
  fn ensure_installed(&self, package: &str) -> Result<(), PackageError>;
}

/// Debian/Ubuntu package manager.
#[derive(Debug, Default, Clone, Copy)]
pub struct Apt;

const NONINTERACTIVE: &[(&str, &str)] = &[("DEBIAN_FRONTEND", "noninteractive")];

impl Apt {
  fn is_installed(&self, package: &str) -> bool {
    match run("dpkg-query", &["-W", "-f=${Status}", package], &[]) {
      Ok(out) => out.success() && out.stdout.ends_with("install ok installed"),
      Err(_) => false,
    }
  }

  fn is_available(&self, package: &str) -> bool {
    matches!(run("apt-cache", &["show", package], &[]), Ok(out) if out.success() && !out.stdout.is_empty())
  }
}

impl PackageManager for Apt {
  fn refresh(&self) -> Result<(), PackageError> {
    let out = run("apt-get", &["update", "-q"], NONINTERACTIVE).map_err(|e| PackageError::CacheUpdate(e.to_string()))?;
    if !out.success() {
      return Err(PackageError::CacheUpdate(out.stderr));
    }
    debug!("package cache updated");
    Ok(())
  }

  fn ensure_installed(&self, package: &str) -> Result<(), PackageError> {
    if self.is_installed(package) {
      debug!(package, "package already installed");
      return Ok(());
    }

    if !self.is_available(package) {
      return Err(PackageError::NotFound(package.to_string()));
    }

    let out = run("apt-get", &["install", "-y", "-q", package], NONINTERACTIVE).map_err(|e| {
      PackageError::InstallFailed {
        package: package.to_string(),
        message: e.to_string(),
      }
    })?;
    if !out.success() {
      return Err(PackageError::InstallFailed {
        package: package.to_string(),
        message: out.stderr,
      });
    }

    info!(package, "package installed");
    Ok(())
  }
}
