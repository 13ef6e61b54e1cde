use thiserror::Error;
use tracing::debug;

use super::command::run;

#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("failed to run systemctl {action} {service}: {source}")]
  Spawn {
    action: String,
    service: String,
    source: std::io::Error,
  },

  #[error("systemctl {action} {service} failed with exit code {code:?}: {stderr}")]
  Failed {
    action: String,
    service: String,
    code: Option<i32>,
    stderr: String,
  },
}

pub trait ServiceManager {
  fn start(&self, service: &str) -> Result<(), ServiceError>;

  fn stop(&self, service: &str) -> Result<(), ServiceError>;

  /// Restart and wait for the unit to come up.
  fn restart(&self, service: &str) -> Result<(), ServiceError>;

  /// Queue a restart and return without waiting for the unit to finish.
  fn restart_no_block(&self, service: &str) -> Result<(), ServiceError>;

  /// Whether the unit is currently active. Asked fresh on every call.
  ///
  /// Fails only when the state cannot be determined.
  fn is_running(&self, service: &str) -> Result<bool, ServiceError>;
}

/// systemd service manager.
#[derive(Debug, Default, Clone, Copy)]
pub struct Systemd;

impl Systemd {
  fn systemctl(&self, args: &[&str], service: &str) -> Result<(), ServiceError> {
    let action = args.join(" ");
    let mut full = args.to_vec();
    full.push(service);

    let out = run("systemctl", &full, &[]).map_err(|e| ServiceError::Spawn {
      action: action.clone(),
      service: service.to_string(),
      source: e,
    })?;

    if !out.success() {
      return Err(ServiceError::Failed {
        action,
        service: service.to_string(),
        code: out.code,
        stderr: out.stderr,
      });
    }

    debug!(service, action = %action, "systemctl succeeded");
    Ok(())
  }
}

impl ServiceManager for Systemd {
  fn start(&self, service: &str) -> Result<(), ServiceError> {
    self.systemctl(&["start"], service)
  }

  fn stop(&self, service: &str) -> Result<(), ServiceError> {
    self.systemctl(&["stop"], service)
  }

  fn restart(&self, service: &str) -> Result<(), ServiceError> {
    self.systemctl(&["restart"], service)
  }

  fn restart_no_block(&self, service: &str) -> Result<(), ServiceError> {
    self.systemctl(&["restart", "--no-block"], service)
  }

  fn is_running(&self, service: &str) -> Result<bool, ServiceError> {
    let out = run("systemctl", &["is-active", "--quiet", service], &[]).map_err(|e| ServiceError::Spawn {
      action: "is-active".to_string(),
      service: service.to_string(),
      source: e,
    })?;
    Ok(out.success())
  }
}
