use std::io;
use std::process::Command;

use tracing::debug;

/// Captured result of a finished process.
#[derive(Debug)]
pub(crate) struct CommandOutput {
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Run `program` to completion and capture its output.
pub(crate) fn run(program: &str, args: &[&str], envs: &[(&str, &str)]) -> io::Result<CommandOutput> {
  debug!(program, args = ?args, "spawning process");

  let output = Command::new(program)
    .args(args)
    .envs(envs.iter().copied())
    .output()?;

  let result = CommandOutput {
    code: output.status.code(),
    stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
  };

  if !result.success() {
    if !result.stderr.is_empty() {
      debug!(stderr = %result.stderr, "command stderr");
    }
    if !result.stdout.is_empty() {
      debug!(stdout = %result.stdout, "command stdout");
    }
  }

  Ok(result)
}
