use predicates::prelude::*;

use super::common::TestEnv;

fn searchable() -> TestEnv {
  let env = TestEnv::new();
  env.configure("noble, jammy");
  env.write_www("above1.html", "<html><title>");
  env.write_www("above2.html", "</title><body>");
  env.write_www("below.html", "</body></html>");
  env.add_page("noble", "man1/ls.1.html");
  env.add_page("jammy", "man1/ls.1.html");
  env
}

#[test]
fn search_renders_a_cgi_response() {
  let env = searchable();

  env
    .cmd()
    .arg("search")
    .env("QUERY_STRING", "q=ls&lr=lang_en")
    .assert()
    .success()
    .stdout(predicate::str::starts_with("Content-Type: text/html\n\n<html><title>Searching"))
    .stdout(predicate::str::contains("<th>noble<br><small>24.04</small></th>"))
    .stdout(predicate::str::contains("href=\"/manpages/jammy/en/man1/ls.1.html\""));
}

#[test]
fn search_redirects_not_found_requests() {
  let env = searchable();

  env
    .cmd()
    .args(["search", "--query", "q=ls.1&titles=404"])
    .assert()
    .success()
    .stdout(predicate::str::contains("location.replace('/manpages/jammy/en/man1/ls.1.html')"));
}

#[test]
fn search_without_hits_says_so() {
  let env = searchable();

  env
    .cmd()
    .args(["search", "--query", "q=nosuchpage"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No matching titles found"));
}

#[test]
fn search_honours_config_file_override() {
  let env = searchable();
  let moved = env.temp.path().join("elsewhere.json");
  std::fs::rename(env.config_path(), &moved).unwrap();

  env
    .cmd()
    .args(["search", "--query", "q=ls"])
    .assert()
    .failure();

  env
    .cmd()
    .args(["search", "--query", "q=ls"])
    .env("MANPAGES_CONFIG_FILE", &moved)
    .assert()
    .success()
    .stdout(predicate::str::contains("ls(1)"));
}
