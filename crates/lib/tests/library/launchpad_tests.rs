use manmirror_lib::config::{ConfigError, ConfigStore};
use manmirror_lib::platform::Layout;
use manmirror_lib::release::LaunchpadReleases;
use tempfile::TempDir;

const SERIES: &str = r#"{
  "entries": [
    { "name": "focal", "version": "20.04" },
    { "name": "jammy", "version": "22.04" },
    { "name": "noble", "version": "24.04" },
    { "name": "questing", "version": "25.10" }
  ]
}"#;

#[test]
fn configure_against_launchpad() {
  let mut server = mockito::Server::new();
  let mock = server
    .mock("GET", "/devel/ubuntu/series")
    .with_header("content-type", "application/json")
    .with_body(SERIES)
    .create();

  let temp = TempDir::new().unwrap();
  let provider = LaunchpadReleases::with_url(format!("{}/devel/ubuntu/series", server.url())).unwrap();
  let store = ConfigStore::new(Layout::rooted(temp.path()), &provider);

  let config = store.configure("focal, questing, noble", "http://mirror.test").unwrap();

  mock.assert();
  assert_eq!(
    config.releases.iter().collect::<Vec<_>>(),
    vec![("questing", "25.10"), ("noble", "24.04"), ("focal", "20.04")]
  );
  assert_eq!(store.load().unwrap(), config);
}

#[test]
fn unknown_codename_against_launchpad() {
  let mut server = mockito::Server::new();
  server
    .mock("GET", "/devel/ubuntu/series")
    .with_header("content-type", "application/json")
    .with_body(SERIES)
    .create();

  let temp = TempDir::new().unwrap();
  let provider = LaunchpadReleases::with_url(format!("{}/devel/ubuntu/series", server.url())).unwrap();
  let store = ConfigStore::new(Layout::rooted(temp.path()), &provider);

  let err = store.configure("noble, hoary", "http://mirror.test").unwrap_err();

  assert!(matches!(err, ConfigError::InvalidSpec { ref reason, .. } if reason.contains("hoary")));
  assert!(!store.path().exists());
}
