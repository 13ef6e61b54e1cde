use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn purge_without_configuration_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("purge")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed-content-update"));
}

#[test]
fn purge_keeps_only_configured_releases() {
  let env = TestEnv::new();
  env.configure("questing");
  for release in ["questing", "plucky", "oracular", "noble", "jammy"] {
    env.add_page(release, "man1/ls.1.html");
  }

  env
    .cmd()
    .arg("purge")
    .assert()
    .success()
    .stdout(predicate::str::contains("Purge complete"));

  let remaining: Vec<String> = std::fs::read_dir(env.manpages_dir())
    .unwrap()
    .flatten()
    .map(|e| e.file_name().to_string_lossy().into_owned())
    .collect();
  assert_eq!(remaining, vec!["questing".to_string()]);
}

#[test]
fn purge_twice_removes_nothing_the_second_time() {
  let env = TestEnv::new();
  env.configure("noble");
  env.add_page("noble", "man1/ls.1.html");
  env.add_page("jammy", "man1/ls.1.html");

  env.cmd().arg("purge").assert().success();

  let output = env.cmd().args(["-o", "json", "purge"]).output().unwrap();
  assert!(output.status.success());
  let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(value["removed"], serde_json::json!([]));
  assert_eq!(value["kept"], serde_json::json!(["noble"]));
}
