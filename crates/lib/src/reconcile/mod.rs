//! Reconciliation of the host against the desired release configuration.
//!
//! The [`Reconciler`] exposes one method per lifecycle phase. Phases never
//! chain on their own; the caller decides when each runs and serializes them.
//!
//! | Phase          | Fails with                                      |
//! |----------------|-------------------------------------------------|
//! | install        | `PackageOperation`, `Layout`, `Ownership`        |
//! | configure      | `InvalidSpec`, `SaveConfig`                      |
//! | update_content | `ConfigUnavailable`, `ContentUpdateTrigger`      |
//! | purge          | `ConfigUnavailable`, `PurgeScan`                 |
//! | start          | `ServiceStart`                                  |

mod purge;
pub mod templates;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{ConfigError, ConfigStore, ReleaseConfiguration};
use crate::consts::{PACKAGES, UPDATE_SERVICE, WEB_SERVICES};
use crate::platform::Layout;
use crate::platform::owner::{OwnerError, chown_tree};
use crate::release::ReleaseProvider;
use crate::status::StatusProbe;
use crate::system::{PackageError, PackageManager, ServiceError, ServiceManager};
use crate::util::fs::copy_tree;

pub use purge::{PurgeFailure, PurgeReport, purge_stale_releases};

#[derive(Debug, Error)]
pub enum ReconcileError {
  #[error("package operation failed: {0}")]
  PackageOperation(#[from] PackageError),

  #[error("failed to prepare {}: {source}", path.display())]
  Layout { path: PathBuf, source: io::Error },

  #[error("failed to set ownership: {0}")]
  Ownership(#[from] OwnerError),

  #[error(transparent)]
  InvalidSpec(ConfigError),

  #[error("failed to save configuration: {0}")]
  SaveConfig(ConfigError),

  #[error(transparent)]
  ConfigUnavailable(ConfigError),

  #[error("failed to trigger content update: {0}")]
  ContentUpdateTrigger(#[source] ServiceError),

  #[error("failed to read {}: {source}", path.display())]
  PurgeScan { path: PathBuf, source: io::Error },

  #[error("failed to start {service}: {source}")]
  ServiceStart { service: String, source: ServiceError },
}

/// Result of triggering a content update.
#[derive(Debug)]
pub struct UpdateOutcome {
  pub config: ReleaseConfiguration,
  /// Report of the purge that follows the trigger, `None` if it could not run.
  pub purge: Option<PurgeReport>,
}

pub struct Reconciler<'a> {
  layout: Layout,
  packages: &'a dyn PackageManager,
  services: &'a dyn ServiceManager,
  releases: &'a dyn ReleaseProvider,
  assets_dir: Option<PathBuf>,
  service_user: Option<String>,
  search_binary: Option<PathBuf>,
}

impl<'a> Reconciler<'a> {
  pub fn new(
    layout: Layout,
    packages: &'a dyn PackageManager,
    services: &'a dyn ServiceManager,
    releases: &'a dyn ReleaseProvider,
  ) -> Self {
    Self {
      layout,
      packages,
      services,
      releases,
      assets_dir: None,
      service_user: None,
      search_binary: None,
    }
  }

  /// Directory holding `www/` and `bin/` trees copied on install.
  pub fn with_assets(mut self, dir: impl Into<PathBuf>) -> Self {
    self.assets_dir = Some(dir.into());
    self
  }

  /// Owner of the app tree. Ownership is left alone when unset.
  pub fn with_service_user(mut self, user: impl Into<String>) -> Self {
    self.service_user = Some(user.into());
    self
  }

  /// Binary the search CGI wrapper executes. No wrapper is written when unset.
  pub fn with_search_binary(mut self, binary: impl Into<PathBuf>) -> Self {
    self.search_binary = Some(binary.into());
    self
  }

  pub fn layout(&self) -> &Layout {
    &self.layout
  }

  pub fn store(&self) -> ConfigStore<'a> {
    ConfigStore::new(self.layout.clone(), self.releases)
  }

  pub fn probe(&self) -> StatusProbe<'a> {
    StatusProbe::new(self.services)
  }

  /// Install packages, the directory layout and the service configuration.
  ///
  /// Safe to run repeatedly. Nothing on disk changes until every package is present.
  pub fn install(&self) -> Result<(), ReconcileError> {
    self.packages.refresh().inspect_err(|e| error!(error = %e, "failed to update package cache"))?;

    for package in PACKAGES {
      self.packages.ensure_installed(package).inspect_err(|e| match e {
        PackageError::NotFound(_) => error!(package, "failed to find package in package cache"),
        _ => error!(package, error = %e, "failed to install package"),
      })?;
    }

    for dir in [
      self.layout.app_dir.clone(),
      self.layout.manpages_dir(),
      self.layout.bin_dir(),
      self.layout.deb_dir(),
    ] {
      create_dir(&dir)?;
    }

    if let Some(assets) = &self.assets_dir {
      self.install_assets(assets)?;
    }

    write_file(&self.layout.nginx_site_config_path(), &templates::render_nginx_site(&self.layout))?;
    write_file(
      &self.layout.update_service_path(),
      &templates::render_update_unit(&self.layout, self.service_user.as_deref()),
    )?;

    if let Some(binary) = &self.search_binary {
      let cgi = self.layout.search_cgi_path();
      write_file(&cgi, &templates::render_search_cgi(binary))?;
      make_executable(&cgi)?;
    }

    let default_site = self.layout.nginx_default_site_path();
    match fs::remove_file(&default_site) {
      Ok(()) => info!(path = %default_site.display(), "removed default nginx site"),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => return Err(ReconcileError::Layout { path: default_site, source: e }),
    }

    if let Some(user) = &self.service_user {
      chown_tree(&self.layout.app_dir, user)?;
    }

    info!(app_dir = %self.layout.app_dir.display(), "install complete");
    Ok(())
  }

  fn install_assets(&self, assets: &Path) -> Result<(), ReconcileError> {
    for (name, target) in [("www", self.layout.www_dir()), ("bin", self.layout.bin_dir())] {
      let source = assets.join(name);
      if !source.is_dir() {
        warn!(path = %source.display(), "asset directory missing, skipping");
        continue;
      }
      copy_tree(&source, &target).map_err(|e| ReconcileError::Layout { path: target, source: e })?;
    }
    Ok(())
  }

  /// Resolve `raw_spec` and persist the resulting configuration.
  ///
  /// The previous configuration stays in place when the release list is invalid.
  pub fn configure(&self, raw_spec: &str, external_url: &str) -> Result<ReleaseConfiguration, ReconcileError> {
    self.store().configure(raw_spec, external_url).map_err(|e| match e {
      ConfigError::InvalidSpec { .. } => ReconcileError::InvalidSpec(e),
      other => ReconcileError::SaveConfig(other),
    })
  }

  /// Kick off the update unit, then purge releases that are no longer configured.
  ///
  /// Returns as soon as the unit is queued. Purge problems are logged, not returned.
  pub fn update_content(&self) -> Result<UpdateOutcome, ReconcileError> {
    let config = self.store().load().map_err(ReconcileError::ConfigUnavailable)?;

    self
      .services
      .restart_no_block(UPDATE_SERVICE)
      .map_err(ReconcileError::ContentUpdateTrigger)
      .inspect_err(|e| error!(error = %e, "failed to update manpages"))?;
    info!(service = UPDATE_SERVICE, "content update triggered");

    let purge = match purge_stale_releases(&self.layout.manpages_dir(), &config.releases) {
      Ok(report) => {
        for failure in &report.failed {
          warn!(path = %failure.path.display(), error = %failure.message, "stale release left behind");
        }
        Some(report)
      }
      Err(e) => {
        warn!(error = %e, "failed to purge unused manpages");
        None
      }
    };

    Ok(UpdateOutcome { config, purge })
  }

  /// Remove release directories absent from the persisted configuration.
  pub fn purge(&self) -> Result<PurgeReport, ReconcileError> {
    let config = self.store().load().map_err(ReconcileError::ConfigUnavailable)?;
    let root = self.layout.manpages_dir();
    purge_stale_releases(&root, &config.releases).map_err(|e| ReconcileError::PurgeScan { path: root, source: e })
  }

  /// Restart the web services, in order.
  pub fn start(&self) -> Result<(), ReconcileError> {
    for service in WEB_SERVICES {
      self.services.restart(service).map_err(|e| {
        error!(service, error = %e, "failed to restart manpages services");
        ReconcileError::ServiceStart {
          service: service.to_string(),
          source: e,
        }
      })?;
    }
    info!("web services restarted");
    Ok(())
  }
}

fn create_dir(path: &Path) -> Result<(), ReconcileError> {
  fs::create_dir_all(path).map_err(|e| ReconcileError::Layout {
    path: path.to_path_buf(),
    source: e,
  })
}

fn write_file(path: &Path, content: &str) -> Result<(), ReconcileError> {
  if let Some(parent) = path.parent() {
    create_dir(parent)?;
  }
  fs::write(path, content).map_err(|e| ReconcileError::Layout {
    path: path.to_path_buf(),
    source: e,
  })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), ReconcileError> {
  use std::os::unix::fs::PermissionsExt;
  fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| ReconcileError::Layout {
    path: path.to_path_buf(),
    source: e,
  })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), ReconcileError> {
  Ok(())
}
