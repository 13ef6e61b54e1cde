use anyhow::Result;

use manmirror_lib::config::ReleaseConfiguration;
use manmirror_lib::status::Phase;

use super::{Host, ReleaseSource, begin, fail};
use crate::output::{OutputFormat, print_json, print_stat, print_success};

pub fn cmd_configure(releases: &str, url: &str, source: ReleaseSource, output: OutputFormat) -> Result<()> {
  let host = Host::new(source)?;
  let reconciler = host.reconciler();

  begin(Phase::Configure, output);
  let config = match reconciler.configure(releases, url) {
    Ok(config) => config,
    Err(e) => return fail(Phase::Configure, e, output),
  };

  if output.is_json() {
    print_json(&config)?;
  } else {
    print_success(&format!("Configuration written to {}", reconciler.layout().config_path.display()));
    print_summary(&config);
  }
  Ok(())
}

pub(super) fn print_summary(config: &ReleaseConfiguration) {
  print_stat("Site", &config.site);
  let releases: Vec<String> = config
    .releases
    .iter()
    .map(|(name, version)| format!("{} ({})", name, version))
    .collect();
  print_stat("Releases", &releases.join(", "));
}
