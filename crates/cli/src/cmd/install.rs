//! `manmirror install`: packages, directory layout and service units.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

use manmirror_lib::platform::is_elevated;
use manmirror_lib::status::Phase;

use super::{Host, begin, fail};
use crate::output::{OutputFormat, print_json, print_stat, print_success};

pub fn cmd_install(assets: Option<PathBuf>, user: Option<String>, output: OutputFormat) -> Result<()> {
  if !is_elevated() {
    warn!("not running as root, package installation will likely fail");
  }

  let binary = std::env::current_exe().context("Failed to locate the manmirror binary")?;
  let host = Host::offline();
  let mut reconciler = host.reconciler().with_search_binary(binary);
  if let Some(dir) = &assets {
    reconciler = reconciler.with_assets(dir);
  }
  if let Some(user) = &user {
    reconciler = reconciler.with_service_user(user);
  }

  begin(Phase::Install, output);
  if let Err(e) = reconciler.install() {
    return fail(Phase::Install, e, output);
  }

  let layout = reconciler.layout();
  if output.is_json() {
    print_json(&serde_json::json!({
      "app_dir": layout.app_dir,
      "config_path": layout.config_path,
      "service_user": user,
    }))?;
  } else {
    print_success("Install complete");
    print_stat("App directory", &layout.app_dir.display().to_string());
    print_stat("Update unit", &layout.update_service_path().display().to_string());
    print_stat("Site config", &layout.nginx_site_config_path().display().to_string());
    print_stat("Search CGI", &layout.search_cgi_path().display().to_string());
  }
  Ok(())
}
