//! manmirror-lib: release configuration and reconciliation for an Ubuntu manpage mirror.
//!
//! This crate provides the pieces the `manmirror` binary drives:
//! - `release`: resolving release codenames to versions through a pluggable provider
//! - `config`: the persisted desired-state document and its store
//! - `system`: package and service manager capabilities
//! - `reconcile`: the install, configure, update, purge and start phases
//! - `status`: the update probe and the externally visible lifecycle status
//! - `search`: the request-time title search view

pub mod config;
pub mod consts;
pub mod platform;
pub mod reconcile;
pub mod release;
pub mod search;
pub mod status;
pub mod system;
pub mod util;
