pub mod owner;
pub mod paths;

pub use paths::Layout;

/// Whether the current process runs with root privileges.
///
/// Install writes under `/etc` and changes ownership, so the CLI checks this
/// before running it against the real layout.
#[cfg(unix)]
pub fn is_elevated() -> bool {
  nix::unistd::Uid::effective().is_root()
}

#[cfg(not(unix))]
pub fn is_elevated() -> bool {
  false
}
