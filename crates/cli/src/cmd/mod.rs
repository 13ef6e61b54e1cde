mod configure;
mod install;
mod purge;
mod search;
mod start;
mod status;
mod update;

pub use configure::cmd_configure;
pub use install::cmd_install;
pub use purge::cmd_purge;
pub use search::cmd_search;
pub use start::cmd_start;
pub use status::cmd_status;
pub use update::cmd_update;

use anyhow::{Context, Result};
use clap::ValueEnum;

use manmirror_lib::platform::Layout;
use manmirror_lib::reconcile::{ReconcileError, Reconciler};
use manmirror_lib::release::{FixedReleases, LaunchpadReleases, ReleaseProvider};
use manmirror_lib::status::{LifecycleStatus, Phase, StatusProbe};
use manmirror_lib::system::{Apt, Systemd};

use crate::output::{OutputFormat, print_error, print_json, print_status, print_warning};

/// Source of release versions for `configure` and `update`.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ReleaseSource {
  /// Query the Launchpad series API
  #[default]
  Launchpad,
  /// Built-in table of known releases
  Fixed,
}

/// The real host capabilities a [`Reconciler`] borrows.
struct Host {
  packages: Apt,
  services: Systemd,
  releases: Box<dyn ReleaseProvider>,
}

impl Host {
  fn new(source: ReleaseSource) -> Result<Self> {
    let releases: Box<dyn ReleaseProvider> = match source {
      ReleaseSource::Launchpad => Box::new(LaunchpadReleases::new().context("Failed to create Launchpad client")?),
      ReleaseSource::Fixed => Box::new(FixedReleases::default()),
    };
    Ok(Self {
      packages: Apt,
      services: Systemd,
      releases,
    })
  }

  /// Host for phases that never resolve releases.
  fn offline() -> Self {
    Self {
      packages: Apt,
      services: Systemd,
      releases: Box::new(FixedReleases::default()),
    }
  }

  fn reconciler(&self) -> Reconciler<'_> {
    Reconciler::new(Layout::from_env(), &self.packages, &self.services, self.releases.as_ref())
  }
}

/// Report `phase` as in progress.
fn begin(phase: Phase, output: OutputFormat) {
  if !output.is_json() {
    print_status(phase.in_progress());
  }
}

/// Report the failed status for `phase` and turn `err` into the command error.
fn fail<T>(phase: Phase, err: ReconcileError, output: OutputFormat) -> Result<T> {
  let status = phase.failed();
  if output.is_json() {
    print_json(&serde_json::json!({
      "status": status,
      "message": status.message(),
      "error": err.to_string(),
    }))?;
  } else {
    print_error(&err.to_string());
    print_status(status);
  }
  Err(anyhow::Error::new(err).context(format!("{} failed", status.name())))
}

fn status_json(status: LifecycleStatus) -> serde_json::Value {
  serde_json::json!({ "status": status, "message": status.message() })
}

/// Current status from the probe. An unknown update state is reported and becomes the command error.
fn probed_status(probe: &StatusProbe<'_>, output: OutputFormat) -> Result<LifecycleStatus> {
  match LifecycleStatus::try_from_probe(probe) {
    Ok(status) => Ok(status),
    Err(e) => {
      if output.is_json() {
        print_json(&serde_json::json!({
          "status": "unknown",
          "message": "Update state unknown",
          "error": e.to_string(),
        }))?;
      } else {
        print_warning(&format!("Update state unknown: {}", e));
      }
      Err(anyhow::Error::new(e).context("Failed to query the content update"))
    }
  }
}
