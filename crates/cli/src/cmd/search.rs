use std::io::Write;

use anyhow::{Context, Result};

use manmirror_lib::platform::Layout;
use manmirror_lib::search::handle_request;

/// Write the CGI response for `query` to stdout.
pub fn cmd_search(query: &str) -> Result<()> {
  let layout = Layout::from_env();
  let page = handle_request(&layout.config_path, query).context("Search failed")?;

  let mut stdout = std::io::stdout().lock();
  stdout.write_all(page.as_bytes()).context("Failed to write response")?;
  stdout.flush()?;
  Ok(())
}
