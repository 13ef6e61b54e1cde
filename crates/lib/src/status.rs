//! Update progress and the lifecycle status reported to operators.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::consts::UPDATE_SERVICE;
use crate::system::{ServiceError, ServiceManager};

/// Reports whether the content update unit is running.
pub struct StatusProbe<'a> {
  services: &'a dyn ServiceManager,
}

impl<'a> StatusProbe<'a> {
  pub fn new(services: &'a dyn ServiceManager) -> Self {
    Self { services }
  }

  /// Asks the service manager on every call.
  pub fn check(&self) -> Result<bool, ServiceError> {
    self.services.is_running(UPDATE_SERVICE)
  }

  /// Like [`check`](Self::check), reading an unknown state as not updating.
  pub fn is_updating(&self) -> bool {
    self.check().unwrap_or_else(|e| {
      warn!(service = UPDATE_SERVICE, error = %e, "failed to query update state");
      false
    })
  }
}

/// Lifecycle phases a caller can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Install,
  Configure,
  UpdateContent,
  Purge,
  Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleStatus {
  Installing,
  UpdatingConfiguration,
  UpdatingContent,
  Starting,
  FailedInstall,
  FailedConfiguration,
  FailedContentUpdate,
  FailedStart,
  Ready,
}

impl Phase {
  /// Status shown while the phase runs.
  pub fn in_progress(self) -> LifecycleStatus {
    match self {
      Phase::Install => LifecycleStatus::Installing,
      Phase::Configure => LifecycleStatus::UpdatingConfiguration,
      Phase::UpdateContent | Phase::Purge => LifecycleStatus::UpdatingContent,
      Phase::Start => LifecycleStatus::Starting,
    }
  }

  /// Status left behind when the phase fails.
  pub fn failed(self) -> LifecycleStatus {
    match self {
      Phase::Install => LifecycleStatus::FailedInstall,
      Phase::Configure => LifecycleStatus::FailedConfiguration,
      Phase::UpdateContent | Phase::Purge => LifecycleStatus::FailedContentUpdate,
      Phase::Start => LifecycleStatus::FailedStart,
    }
  }
}

impl LifecycleStatus {
  /// Steady state from the probe: updating while the unit runs, ready otherwise.
  pub fn from_probe(probe: &StatusProbe<'_>) -> Self {
    if probe.is_updating() {
      LifecycleStatus::UpdatingContent
    } else {
      LifecycleStatus::Ready
    }
  }

  /// Same as [`from_probe`](Self::from_probe), but fails when the update state is unknown.
  pub fn try_from_probe(probe: &StatusProbe<'_>) -> Result<Self, ServiceError> {
    Ok(if probe.check()? {
      LifecycleStatus::UpdatingContent
    } else {
      LifecycleStatus::Ready
    })
  }

  pub fn is_failure(self) -> bool {
    matches!(
      self,
      LifecycleStatus::FailedInstall
        | LifecycleStatus::FailedConfiguration
        | LifecycleStatus::FailedContentUpdate
        | LifecycleStatus::FailedStart
    )
  }

  pub fn name(self) -> &'static str {
    match self {
      LifecycleStatus::Installing => "installing",
      LifecycleStatus::UpdatingConfiguration => "updating-configuration",
      LifecycleStatus::UpdatingContent => "updating-content",
      LifecycleStatus::Starting => "starting",
      LifecycleStatus::FailedInstall => "failed-install",
      LifecycleStatus::FailedConfiguration => "failed-configuration",
      LifecycleStatus::FailedContentUpdate => "failed-content-update",
      LifecycleStatus::FailedStart => "failed-start",
      LifecycleStatus::Ready => "ready",
    }
  }

  pub fn message(self) -> &'static str {
    match self {
      LifecycleStatus::Installing => "Installing manpages",
      LifecycleStatus::UpdatingConfiguration => "Updating configuration",
      LifecycleStatus::UpdatingContent => "Updating manpages",
      LifecycleStatus::Starting => "Starting manpages",
      LifecycleStatus::FailedInstall => "Failed to install packages. Check the logs for details.",
      LifecycleStatus::FailedConfiguration => "Invalid configuration. Check the logs for details.",
      LifecycleStatus::FailedContentUpdate => "Failed to update manpages. Check the logs for details.",
      LifecycleStatus::FailedStart => "Failed to start services. Check the logs for details.",
      LifecycleStatus::Ready => "Ready",
    }
  }
}

impl fmt::Display for LifecycleStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message())
  }
}
