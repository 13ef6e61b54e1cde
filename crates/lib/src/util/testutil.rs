//! Fakes for the host capabilities.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::system::{PackageError, PackageManager, ServiceError, ServiceManager};

/// Package manager that records installs and fails on request.
#[derive(Default)]
pub struct FakePackages {
  pub installed: RefCell<Vec<String>>,
  pub refreshed: RefCell<bool>,
  pub missing: HashSet<String>,
  pub broken: HashSet<String>,
}

impl FakePackages {
  pub fn missing(package: &str) -> Self {
    Self {
      missing: HashSet::from([package.to_string()]),
      ..Self::default()
    }
  }

  pub fn broken(package: &str) -> Self {
    Self {
      broken: HashSet::from([package.to_string()]),
      ..Self::default()
    }
  }
}

impl PackageManager for FakePackages {
  fn refresh(&self) -> Result<(), PackageError> {
    *self.refreshed.borrow_mut() = true;
    Ok(())
  }

  fn ensure_installed(&self, package: &str) -> Result<(), PackageError> {
    if self.missing.contains(package) {
      return Err(PackageError::NotFound(package.to_string()));
    }
    if self.broken.contains(package) {
      return Err(PackageError::InstallFailed {
        package: package.to_string(),
        message: "dpkg returned an error code (1)".to_string(),
      });
    }
    self.installed.borrow_mut().push(package.to_string());
    Ok(())
  }
}

/// Service manager backed by an in-memory table of running units.
#[derive(Default)]
pub struct FakeServices {
  pub calls: RefCell<Vec<String>>,
  pub running: RefCell<HashMap<String, bool>>,
  pub failing: HashSet<String>,
}

impl FakeServices {
  pub fn failing(service: &str) -> Self {
    Self {
      failing: HashSet::from([service.to_string()]),
      ..Self::default()
    }
  }

  pub fn set_running(&self, service: &str, running: bool) {
    self.running.borrow_mut().insert(service.to_string(), running);
  }

  fn record(&self, action: &str, service: &str) -> Result<(), ServiceError> {
    self.calls.borrow_mut().push(format!("{} {}", action, service));
    if self.failing.contains(service) {
      return Err(ServiceError::Failed {
        action: action.to_string(),
        service: service.to_string(),
        code: Some(1),
        stderr: format!("Unit {}.service not found.", service),
      });
    }
    Ok(())
  }
}

impl ServiceManager for FakeServices {
  fn start(&self, service: &str) -> Result<(), ServiceError> {
    self.record("start", service)?;
    self.set_running(service, true);
    Ok(())
  }

  fn stop(&self, service: &str) -> Result<(), ServiceError> {
    self.record("stop", service)?;
    self.set_running(service, false);
    Ok(())
  }

  fn restart(&self, service: &str) -> Result<(), ServiceError> {
    self.record("restart", service)?;
    self.set_running(service, true);
    Ok(())
  }

  fn restart_no_block(&self, service: &str) -> Result<(), ServiceError> {
    self.record("restart --no-block", service)?;
    self.set_running(service, true);
    Ok(())
  }

  fn is_running(&self, service: &str) -> Result<bool, ServiceError> {
    if self.failing.contains(service) {
      return Err(ServiceError::Spawn {
        action: "is-active".to_string(),
        service: service.to_string(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
      });
    }
    Ok(self.running.borrow().get(service).copied().unwrap_or(false))
  }

}
