use manmirror_lib::consts::{PACKAGES, UPDATE_SERVICE};
use manmirror_lib::platform::Layout;
use manmirror_lib::reconcile::{ReconcileError, Reconciler};
use manmirror_lib::release::FixedReleases;
use manmirror_lib::search::handle_request;
use manmirror_lib::status::{LifecycleStatus, Phase};
use tempfile::TempDir;

use super::common::{RecordingPackages, RecordingServices, write};

fn assets(temp: &TempDir) -> std::path::PathBuf {
  let dir = temp.path().join("assets");
  write(&dir.join("www/above1.html"), "<html><title>");
  write(&dir.join("www/above2.html"), "</title><body>");
  write(&dir.join("www/below.html"), "</body></html>");
  write(&dir.join("bin/update-manpages"), "#!/bin/sh\n");
  dir
}

#[test]
fn full_lifecycle() {
  let temp = TempDir::new().unwrap();
  let layout = Layout::rooted(&temp.path().join("host"));
  let packages = RecordingPackages::default();
  let services = RecordingServices::default();
  let releases = FixedReleases::default();
  let reconciler = Reconciler::new(layout.clone(), &packages, &services, &releases).with_assets(assets(&temp));

  reconciler.install().unwrap();
  assert_eq!(packages.installed.borrow().len(), PACKAGES.len());
  assert!(layout.www_dir().join("above1.html").is_file());
  assert!(layout.bin_dir().join("update-manpages").is_file());
  assert!(layout.update_service_path().is_file());

  let config = reconciler.configure("jammy, noble, plucky", "http://mirror.test").unwrap();
  assert_eq!(config.releases.codenames().collect::<Vec<_>>(), vec!["plucky", "noble", "jammy"]);

  for release in ["plucky", "noble", "jammy", "focal"] {
    write(&layout.manpages_dir().join(release).join("en/man1/ls.1.html"), "");
  }

  let outcome = reconciler.update_content().unwrap();
  assert_eq!(services.calls.borrow().as_slice(), [format!("restart --no-block {}", UPDATE_SERVICE)]);
  assert_eq!(outcome.purge.unwrap().removed, vec![layout.manpages_dir().join("focal")]);
  assert_eq!(LifecycleStatus::from_probe(&reconciler.probe()), LifecycleStatus::UpdatingContent);

  services.finish(UPDATE_SERVICE);
  assert_eq!(LifecycleStatus::from_probe(&reconciler.probe()), LifecycleStatus::Ready);

  reconciler.start().unwrap();
  assert_eq!(&services.calls.borrow()[1..], ["restart nginx", "restart fcgiwrap"]);

  let page = handle_request(&layout.config_path, "q=ls.1").unwrap();
  assert!(page.contains("<th>plucky<br><small>25.04</small></th>"));
  assert!(!page.contains("focal"));
}

#[test]
fn narrowing_releases_purges_on_next_update() {
  let temp = TempDir::new().unwrap();
  let layout = Layout::rooted(temp.path());
  let packages = RecordingPackages::default();
  let services = RecordingServices::default();
  let releases = FixedReleases::default();
  let reconciler = Reconciler::new(layout.clone(), &packages, &services, &releases);

  reconciler.configure("questing, plucky, oracular, noble, jammy", "http://mirror.test").unwrap();
  for release in ["questing", "plucky", "oracular", "noble", "jammy"] {
    write(&layout.manpages_dir().join(release).join("en/man1/ls.1.html"), "");
  }
  assert!(reconciler.update_content().unwrap().purge.unwrap().removed.is_empty());

  reconciler.configure("questing", "http://mirror.test").unwrap();
  reconciler.update_content().unwrap();

  let remaining: Vec<_> = std::fs::read_dir(layout.manpages_dir())
    .unwrap()
    .flatten()
    .map(|e| e.file_name().to_string_lossy().into_owned())
    .collect();
  assert_eq!(remaining, vec!["questing".to_string()]);
}

#[test]
fn refused_trigger_is_fatal_and_skips_purge() {
  let temp = TempDir::new().unwrap();
  let layout = Layout::rooted(temp.path());
  let packages = RecordingPackages::default();
  let services = RecordingServices::refusing(UPDATE_SERVICE);
  let releases = FixedReleases::default();
  let reconciler = Reconciler::new(layout.clone(), &packages, &services, &releases);

  reconciler.configure("noble", "http://mirror.test").unwrap();
  write(&layout.manpages_dir().join("jammy/en/man1/ls.1.html"), "");

  let err = reconciler.update_content().unwrap_err();
  assert!(matches!(err, ReconcileError::ContentUpdateTrigger(_)));
  assert_eq!(Phase::UpdateContent.failed(), LifecycleStatus::FailedContentUpdate);
  assert!(layout.manpages_dir().join("jammy").exists());
}

#[test]
fn refused_web_service_stops_start() {
  let temp = TempDir::new().unwrap();
  let packages = RecordingPackages::default();
  let services = RecordingServices::refusing("nginx");
  let releases = FixedReleases::default();
  let reconciler = Reconciler::new(Layout::rooted(temp.path()), &packages, &services, &releases);

  let err = reconciler.start().unwrap_err();

  assert!(matches!(err, ReconcileError::ServiceStart { ref service, .. } if service == "nginx"));
  assert_eq!(services.calls.borrow().as_slice(), ["restart nginx"]);
}
