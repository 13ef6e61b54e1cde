use anyhow::Result;

use manmirror_lib::status::Phase;

use super::update::print_purge;
use super::{Host, begin, fail};
use crate::output::{OutputFormat, print_json, print_success, print_warning};

pub fn cmd_purge(output: OutputFormat) -> Result<()> {
  let host = Host::offline();
  let reconciler = host.reconciler();

  begin(Phase::Purge, output);
  let report = match reconciler.purge() {
    Ok(report) => report,
    Err(e) => return fail(Phase::Purge, e, output),
  };

  if output.is_json() {
    print_json(&report)?;
  } else {
    if report.is_clean() {
      print_success("Purge complete");
    } else {
      print_warning("Purge finished with errors");
    }
    print_purge(&report);
  }
  Ok(())
}
