//! Capabilities the reconciler drives on the host.
//!
//! Each is a trait so phases can run against fakes; the `Apt` and `Systemd`
//! implementations shell out to the real tools.

mod command;
mod packages;
mod services;

pub use packages::{Apt, PackageError, PackageManager};
pub use services::{ServiceError, ServiceManager, Systemd};
