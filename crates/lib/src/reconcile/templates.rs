//! Service configuration written during install.

use std::path::Path;

use crate::consts::{HTTP_PORT, SERVICE_USER};
use crate::platform::Layout;

/// nginx site serving the web root and the search CGI.
/// Placeholders: `{port}`, `{www_dir}`, `{config_path}`.
pub const NGINX_SITE_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/manpages.conf"));

/// Oneshot unit that refreshes manpage content.
/// Placeholders: `{user}`, `{config_path}`, `{bin_dir}`.
pub const UPDATE_UNIT_TEMPLATE: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/update-manpages.service"));

/// CGI wrapper handing search requests to the binary. Placeholder: `{binary}`.
pub const SEARCH_CGI_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/search.cgi"));

pub fn render_nginx_site(layout: &Layout) -> String {
  NGINX_SITE_TEMPLATE
    .replace("{port}", &HTTP_PORT.to_string())
    .replace("{www_dir}", &layout.www_dir().display().to_string())
    .replace("{config_path}", &layout.config_path.display().to_string())
}

pub fn render_update_unit(layout: &Layout, user: Option<&str>) -> String {
  UPDATE_UNIT_TEMPLATE
    .replace("{user}", user.unwrap_or(SERVICE_USER))
    .replace("{config_path}", &layout.config_path.display().to_string())
    .replace("{bin_dir}", &layout.bin_dir().display().to_string())
}

pub fn render_search_cgi(binary: &Path) -> String {
  SEARCH_CGI_TEMPLATE.replace("{binary}", &binary.display().to_string())
}
