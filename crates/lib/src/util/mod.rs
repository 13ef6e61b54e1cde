//! Shared utilities.
//!
//! Filesystem helpers used by install, and fakes for unit tests.

pub mod fs;

#[cfg(test)]
pub mod testutil;
