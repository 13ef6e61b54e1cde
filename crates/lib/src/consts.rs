//! Fixed names shared across the crate.

/// Packages required to serve and refresh the mirror.
pub const PACKAGES: &[&str] = &["nginx-full", "fcgiwrap", "jq", "curl", "w3m"];

/// Unit that downloads and renders manpage content.
pub const UPDATE_SERVICE: &str = "update-manpages";

/// Services restarted when the mirror starts serving, in order.
pub const WEB_SERVICES: &[&str] = &["nginx", "fcgiwrap"];

/// Identity that owns the app tree and runs the update unit.
pub const SERVICE_USER: &str = "www-data";

/// Port nginx listens on for the mirror.
pub const HTTP_PORT: u16 = 8080;

pub const DEFAULT_SITE: &str = "http://manpages.ubuntu.com";
pub const DEFAULT_ARCHIVE: &str = "http://archive.ubuntu.com/ubuntu";
pub const DEFAULT_ARCH: &str = "amd64";
pub const DEFAULT_REPOS: &[&str] = &["main", "restricted", "universe", "multiverse"];
