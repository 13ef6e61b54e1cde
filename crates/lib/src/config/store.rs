//! Loading and saving the release configuration.
//!
//! The file is replaced atomically: it is written to `<name>.tmp` next to the
//! target and renamed over it, so readers never see a partial document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use super::{ConfigError, ReleaseConfiguration, parse_release_spec};
use crate::platform::Layout;
use crate::release::{ReleaseProvider, ReleaseResolver};

/// Read a persisted configuration.
pub fn read_config(path: &Path) -> Result<ReleaseConfiguration, ConfigError> {
  let content = fs::read_to_string(path).map_err(|e| ConfigError::Unavailable {
    path: path.to_path_buf(),
    message: if e.kind() == io::ErrorKind::NotFound {
      "file not found".to_string()
    } else {
      e.to_string()
    },
  })?;

  serde_json::from_str(&content).map_err(|e| ConfigError::Unavailable {
    path: path.to_path_buf(),
    message: format!("malformed configuration: {}", e),
  })
}

pub struct ConfigStore<'a> {
  layout: Layout,
  resolver: ReleaseResolver<'a>,
}

impl<'a> ConfigStore<'a> {
  pub fn new(layout: Layout, provider: &'a dyn ReleaseProvider) -> Self {
    Self {
      layout,
      resolver: ReleaseResolver::new(provider),
    }
  }

  pub fn path(&self) -> &Path {
    &self.layout.config_path
  }

  /// Build a configuration from a release spec and the mirror's external URL.
  pub fn build(&self, raw_spec: &str, external_url: &str) -> Result<ReleaseConfiguration, ConfigError> {
    let codenames = parse_release_spec(raw_spec);
    if codenames.is_empty() {
      return Err(ConfigError::InvalidSpec {
        reason: format!("no release codenames found in '{}'", raw_spec),
        source: None,
      });
    }

    let releases = self.resolver.resolve(&codenames).map_err(|e| ConfigError::InvalidSpec {
      reason: e.to_string(),
      source: Some(e),
    })?;

    Ok(ReleaseConfiguration::new(&self.layout, external_url, releases))
  }

  /// Persist `cfg`, replacing the previous document.
  pub fn save(&self, cfg: &ReleaseConfiguration) -> Result<(), ConfigError> {
    let path = self.path();
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
        path: parent.to_path_buf(),
        source: e,
      })?;
    }

    let content = serde_json::to_string_pretty(cfg).map_err(ConfigError::Serialize)?;
    let temp_path = temp_path_for(path);

    if let Err(e) = fs::write(&temp_path, &content).and_then(|_| fs::rename(&temp_path, path)) {
      let _ = fs::remove_file(&temp_path);
      return Err(ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
      });
    }

    debug!(path = %path.display(), releases = cfg.releases.len(), "configuration saved");
    Ok(())
  }

  pub fn load(&self) -> Result<ReleaseConfiguration, ConfigError> {
    read_config(self.path())
  }

  /// Build and save. The stored document is left alone if the build fails.
  pub fn configure(&self, raw_spec: &str, external_url: &str) -> Result<ReleaseConfiguration, ConfigError> {
    let cfg = self.build(raw_spec, external_url).inspect_err(|e| {
      error!(error = %e, "failed to build manpages configuration");
    })?;
    self.save(&cfg)?;

    info!(
      site = %cfg.site,
      releases = ?cfg.releases.codenames().collect::<Vec<_>>(),
      "configuration updated"
    );
    Ok(cfg)
  }
}

fn temp_path_for(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(".tmp");
  path.with_file_name(name)
}
