//! Recording host capabilities for driving the reconciler end to end.

use std::cell::RefCell;
use std::collections::HashSet;

use manmirror_lib::system::{PackageError, PackageManager, ServiceError, ServiceManager};

#[derive(Default)]
pub struct RecordingPackages {
  pub installed: RefCell<Vec<String>>,
}

impl PackageManager for RecordingPackages {
  fn refresh(&self) -> Result<(), PackageError> {
    Ok(())
  }

  fn ensure_installed(&self, package: &str) -> Result<(), PackageError> {
    self.installed.borrow_mut().push(package.to_string());
    Ok(())
  }
}

/// Service manager that remembers what it was asked and which units are up.
#[derive(Default)]
pub struct RecordingServices {
  pub calls: RefCell<Vec<String>>,
  pub active: RefCell<HashSet<String>>,
  pub refuse: Option<&'static str>,
}

impl RecordingServices {
  pub fn refusing(service: &'static str) -> Self {
    Self {
      refuse: Some(service),
      ..Default::default()
    }
  }

  pub fn finish(&self, service: &str) {
    self.active.borrow_mut().remove(service);
  }

  fn record(&self, action: &str, service: &str) -> Result<(), ServiceError> {
    self.calls.borrow_mut().push(format!("{} {}", action, service));
    if self.refuse == Some(service) {
      return Err(ServiceError::Failed {
        action: action.to_string(),
        service: service.to_string(),
        code: Some(1),
        stderr: "unit not loaded".to_string(),
      });
    }
    Ok(())
  }
}

impl ServiceManager for RecordingServices {
  fn start(&self, service: &str) -> Result<(), ServiceError> {
    self.record("start", service)?;
    self.active.borrow_mut().insert(service.to_string());
    Ok(())
  }

  fn stop(&self, service: &str) -> Result<(), ServiceError> {
    self.record("stop", service)?;
    self.active.borrow_mut().remove(service);
    Ok(())
  }

  fn restart(&self, service: &str) -> Result<(), ServiceError> {
    self.record("restart", service)?;
    self.active.borrow_mut().insert(service.to_string());
    Ok(())
  }

  fn restart_no_block(&self, service: &str) -> Result<(), ServiceError> {
    self.record("restart --no-block", service)?;
    self.active.borrow_mut().insert(service.to_string());
    Ok(())
  }

  fn is_running(&self, service: &str) -> Result<bool, ServiceError> {
    Ok(self.active.borrow().contains(service))
  }
}

pub fn write(path: &std::path::Path, content: &str) {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(path, content).unwrap();
}
