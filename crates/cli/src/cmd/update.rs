//! `manmirror update`: the configuration-changed flow.
//!
//! Rewrites the configuration, triggers the update unit and purges releases
//! that dropped out of the configuration.

use anyhow::Result;

use manmirror_lib::reconcile::PurgeReport;
use manmirror_lib::status::Phase;

use super::configure::print_summary;
use super::{Host, ReleaseSource, begin, fail};
use crate::output::{OutputFormat, print_json, print_stat, print_status, print_warning};

pub fn cmd_update(releases: &str, url: &str, source: ReleaseSource, output: OutputFormat) -> Result<()> {
  let host = Host::new(source)?;
  let reconciler = host.reconciler();

  begin(Phase::Configure, output);
  if let Err(e) = reconciler.configure(releases, url) {
    return fail(Phase::Configure, e, output);
  }

  begin(Phase::UpdateContent, output);
  let outcome = match reconciler.update_content() {
    Ok(outcome) => outcome,
    Err(e) => return fail(Phase::UpdateContent, e, output),
  };

  let status = Phase::UpdateContent.in_progress();
  if output.is_json() {
    print_json(&serde_json::json!({
      "status": status,
      "message": status.message(),
      "config": outcome.config,
      "purge": outcome.purge,
    }))?;
  } else {
    print_summary(&outcome.config);
    match &outcome.purge {
      Some(report) => print_purge(report),
      None => print_warning("Purge of unused releases did not run"),
    }
    print_status(status);
  }
  Ok(())
}

pub(super) fn print_purge(report: &PurgeReport) {
  print_stat("Releases kept", &report.kept.len().to_string());
  print_stat("Releases removed", &report.removed.len().to_string());
  for failure in &report.failed {
    print_warning(&format!("Failed to remove {}: {}", failure.path.display(), failure.message));
  }
}
