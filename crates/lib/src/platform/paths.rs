//! Filesystem layout managed by manmirror.
//!
//! ```text
//! {app}/
//! ├── ubuntu/              # downloaded packages (content root)
//! ├── bin/                 # maintenance scripts run by the update unit
//! └── www/                 # published web root
//!     ├── config.json      # persisted release configuration
//!     ├── cgi-bin/search   # search wrapper
//!     └── manpages/<release>/...
//! {etc}/
//! ├── nginx/conf.d/manpages.conf
//! ├── nginx/sites-enabled/default   # removed on install
//! └── systemd/system/update-manpages.service
//! ```

use std::path::{Path, PathBuf};

use crate::consts::UPDATE_SERVICE;

/// Overrides the application root (default `/app`).
pub const APP_DIR_ENV: &str = "MANMIRROR_APP_DIR";

/// Overrides the system configuration root (default `/etc`).
pub const ETC_DIR_ENV: &str = "MANMIRROR_ETC_DIR";

/// Overrides the configuration file location. Shared with the search view.
pub const CONFIG_FILE_ENV: &str = "MANPAGES_CONFIG_FILE";

const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
  pub app_dir: PathBuf,
  pub etc_dir: PathBuf,
  pub config_path: PathBuf,
}

impl Layout {
  /// Layout rooted at the given application and system configuration directories.
  pub fn new(app_dir: impl Into<PathBuf>, etc_dir: impl Into<PathBuf>) -> Self {
    let app_dir = app_dir.into();
    let config_path = app_dir.join("www").join(CONFIG_FILENAME);
    Self {
      app_dir,
      etc_dir: etc_dir.into(),
      config_path,
    }
  }

  /// Layout used when everything lives under a single directory, e.g. in tests.
  pub fn rooted(root: &Path) -> Self {
    Self::new(root.join("app"), root.join("etc"))
  }

  /// Layout from the environment, falling back to `/app` and `/etc`.
  pub fn from_env() -> Self {
    let app_dir = std::env::var(APP_DIR_ENV)
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from("/app"));
    let etc_dir = std::env::var(ETC_DIR_ENV)
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from("/etc"));

    let mut layout = Self::new(app_dir, etc_dir);
    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
      layout.config_path = PathBuf::from(path);
    }
    layout
  }

  /// Where downloaded package content is kept.
  pub fn deb_dir(&self) -> PathBuf {
    self.app_dir.join("ubuntu")
  }

  /// Published web root.
  pub fn www_dir(&self) -> PathBuf {
    self.app_dir.join("www")
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.app_dir.join("bin")
  }

  /// CGI entry point nginx hands search requests to.
  pub fn search_cgi_path(&self) -> PathBuf {
    self.www_dir().join("cgi-bin").join("search")
  }

  /// Root of the per-release manpage trees.
  pub fn manpages_dir(&self) -> PathBuf {
    self.www_dir().join("manpages")
  }

  pub fn update_service_path(&self) -> PathBuf {
    self
      .etc_dir
      .join("systemd")
      .join("system")
      .join(format!("{}.service", UPDATE_SERVICE))
  }

  pub fn nginx_site_config_path(&self) -> PathBuf {
    self.etc_dir.join("nginx").join("conf.d").join("manpages.conf")
  }

  pub fn nginx_default_site_path(&self) -> PathBuf {
    self.etc_dir.join("nginx").join("sites-enabled").join("default")
  }
}

impl Default for Layout {
  fn default() -> Self {
    Self::new("/app", "/etc")
  }
}
