//! `manmirror status`: report whether the mirror is serving or still updating.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::debug;

use manmirror_lib::status::LifecycleStatus;

use super::{Host, probed_status, status_json};
use crate::output::{OutputFormat, format_duration, print_json, print_stat, print_status};

pub fn cmd_status(watch: Option<Duration>, output: OutputFormat) -> Result<()> {
  let host = Host::offline();
  let reconciler = host.reconciler();
  let probe = reconciler.probe();

  let start = Instant::now();
  let mut status = probed_status(&probe, output)?;

  if let Some(interval) = watch {
    while status != LifecycleStatus::Ready {
      if !output.is_json() {
        print_status(status);
      }
      debug!(interval = %format_duration(interval), "waiting for content update");
      thread::sleep(interval);
      status = probed_status(&probe, output)?;
    }
  }

  if output.is_json() {
    print_json(&status_json(status))?;
  } else {
    print_status(status);
    if watch.is_some() {
      print_stat("Waited", &format_duration(start.elapsed()));
    }
  }
  Ok(())
}
