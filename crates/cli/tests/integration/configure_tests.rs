use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn configure_writes_releases_newest_first() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["configure", "--release-source", "fixed", "--releases", "jammy, questing, noble"])
    .args(["--url", "http://manpages.example.com"])
    .assert()
    .success()
    .stdout(predicate::str::contains("questing (25.10), noble (24.04), jammy (22.04)"));

  let content = std::fs::read_to_string(env.config_path()).unwrap();
  let value: serde_json::Value = serde_json::from_str(&content).unwrap();
  assert_eq!(value["site"], "http://manpages.example.com");
  assert_eq!(value["arch"], "amd64");
  assert_eq!(value["public_html_dir"], env.www_dir().display().to_string());

  let questing = content.find("\"questing\"").unwrap();
  let noble = content.find("\"noble\"").unwrap();
  let jammy = content.find("\"jammy\"").unwrap();
  assert!(questing < noble && noble < jammy);
}

#[test]
fn configure_reads_releases_from_env() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["configure", "--release-source", "fixed"])
    .env("MANMIRROR_RELEASES", "noble")
    .env("MANMIRROR_SITE_URL", "http://mirror.local")
    .assert()
    .success();

  let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(env.config_path()).unwrap()).unwrap();
  assert_eq!(value["site"], "http://mirror.local");
  assert_eq!(value["releases"], serde_json::json!({ "noble": "24.04" }));
}

#[test]
fn configure_json_output_is_the_configuration() {
  let env = TestEnv::new();

  let output = env
    .cmd()
    .args(["-o", "json", "configure", "--release-source", "fixed", "--releases", "noble"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(value["releases"]["noble"], "24.04");
  assert_eq!(value["repos"][0], "main");
}

#[test]
fn unknown_release_is_rejected_and_keeps_previous_config() {
  let env = TestEnv::new();
  env.configure("noble");
  let before = std::fs::read(env.config_path()).unwrap();

  env
    .cmd()
    .args(["configure", "--release-source", "fixed", "--releases", "noble, warty"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("warty"))
    .stderr(predicate::str::contains("failed-configuration"));

  assert_eq!(std::fs::read(env.config_path()).unwrap(), before);
}

#[test]
fn empty_release_list_is_rejected() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["configure", "--release-source", "fixed", "--releases", ",,,"])
    .assert()
    .failure();

  assert!(!env.config_path().exists());
}

#[test]
fn failed_configure_json_reports_status() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["-o", "json", "configure", "--release-source", "fixed", "--releases", "warty"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("\"status\": \"failed-configuration\""));
}
