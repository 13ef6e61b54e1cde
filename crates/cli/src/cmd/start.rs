use anyhow::Result;

use manmirror_lib::consts::HTTP_PORT;
use manmirror_lib::status::Phase;

use super::{Host, begin, fail, probed_status, status_json};
use crate::output::{OutputFormat, print_json, print_stat, print_status};

pub fn cmd_start(output: OutputFormat) -> Result<()> {
  let host = Host::offline();
  let reconciler = host.reconciler();

  begin(Phase::Start, output);
  if let Err(e) = reconciler.start() {
    return fail(Phase::Start, e, output);
  }

  let status = probed_status(&reconciler.probe(), output)?;
  if output.is_json() {
    let mut json = status_json(status);
    json["port"] = HTTP_PORT.into();
    print_json(&json)?;
  } else {
    print_stat("Listening on port", &HTTP_PORT.to_string());
    print_status(status);
  }
  Ok(())
}
