//! Request-time title search over the published manpages.
//!
//! Answers a CGI query by globbing the rendered pages of every configured
//! release and laying the hits out as a section × release table.

mod query;

use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, ReleaseConfiguration, read_config};

pub use query::{ALL_SECTIONS, SearchQuery};

static SECTION_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[0-9].*$").expect("tail pattern is valid"));

const SECTION_DESCRIPTIONS: [&str; 10] = [
  "",
  "Executable programs or shell commands",
  "System calls (functions provided by the kernel)",
  "Library calls (functions within program libraries)",
  "Special files (usually found in /dev)",
  "File formats and conventions eg /etc/passwd",
  "Games",
  "Miscellaneous (including macro  packages  and  conventions)",
  "System administration commands (usually only for root)",
  "Kernel routines [Non standard]",
];

#[derive(Debug, Error)]
pub enum SearchError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("failed to read template {}: {source}", path.display())]
  Template { path: PathBuf, source: std::io::Error },

  #[error("invalid search pattern: {0}")]
  Pattern(#[from] glob::PatternError),
}

/// A rendered page found for a release and section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
  /// Path relative to the web root, usable as a link.
  pub href: String,
  /// Page name without section and extension.
  pub page: String,
}

/// Hits per section, one column per configured release.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
  pub rows: Vec<(u8, Vec<Vec<Hit>>)>,
}

impl SearchResults {
  pub fn total(&self) -> usize {
    self.rows.iter().flat_map(|(_, cols)| cols).map(Vec::len).sum()
  }

  /// The last hit in table order, used for not-found redirects.
  pub fn last(&self) -> Option<&Hit> {
    self.rows.iter().flat_map(|(_, cols)| cols).flatten().last()
  }
}

/// Glob the pages matching `query` for every configured release.
pub fn find_pages(config: &ReleaseConfiguration, query: &SearchQuery) -> Result<SearchResults, SearchError> {
  let root = glob::Pattern::escape(&config.web_root.display().to_string());
  let mut results = SearchResults::default();

  for section in query.sections.clone() {
    let mut columns = Vec::with_capacity(config.releases.len());
    for release in config.releases.codenames() {
      let pattern = format!(
        "{}/manpages/{}/{}/man{}/{}.{}{}*.html",
        root,
        glob::Pattern::escape(release),
        query.lang,
        section,
        query.title,
        section,
        query.suffix
      );
      debug!(pattern = %pattern, "globbing");

      let hits = glob::glob(&pattern)?
        .flatten()
        .map(|path| to_hit(&config.web_root, &path))
        .collect();
      columns.push(hits);
    }
    results.rows.push((section, columns));
  }

  Ok(results)
}

fn to_hit(web_root: &Path, path: &Path) -> Hit {
  let href = match path.strip_prefix(web_root) {
    Ok(relative) => format!("/{}", relative.display()),
    Err(_) => path.display().to_string(),
  };
  let file = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
  let page = file.strip_suffix(".html").unwrap_or(&file);
  Hit {
    href,
    page: SECTION_TAIL.replace(page, "").into_owned(),
  }
}

fn read_template(web_root: &Path, name: &str) -> Result<String, SearchError> {
  let path = web_root.join(name);
  std::fs::read_to_string(&path).map_err(|e| SearchError::Template { path, source: e })
}

fn render_table(config: &ReleaseConfiguration, query: &SearchQuery, results: &SearchResults) -> String {
  let mut html = format!("<script>document.forms[0].q.value='{}';</script>", query.title);
  html.push_str(
    "</div></div><div class='p-strip u-no-padding--top'><div class='row'><br><table><tr>\
     <td><table cellspacing=0 cellpadding=5><thead><tr>",
  );
  for (release, version) in config.releases.iter() {
    let _ = write!(html, "<th>{}<br><small>{}</small></th>", release, version);
  }
  html.push_str("<th>Section Description</th></thead></tr>");

  for (section, columns) in &results.rows {
    html.push_str("<tr>");
    let mut color = "lightgrey";
    for hits in columns {
      html.push_str("<td align=center>");
      if hits.is_empty() {
        html.push('.');
      } else {
        color = "black";
        let links: Vec<String> = hits
          .iter()
          .map(|hit| {
            format!(
              "<a href=\"{}\" style=\"text-decoration:none\">{}({})</a>",
              hit.href, hit.page, section
            )
          })
          .collect();
        html.push_str(&links.join(", "));
      }
      html.push_str("</td>");
    }
    let description = SECTION_DESCRIPTIONS.get(*section as usize).copied().unwrap_or("");
    let _ = write!(
      html,
      "<td><font color=\"{}\">({}) - <small>{}</small></td></tr>",
      color, section, description
    );
  }
  html.push_str("</table></td></tr></table><br>");
  html
}

/// Render the full CGI response for `query`.
pub fn render(config: &ReleaseConfiguration, query: &SearchQuery) -> Result<String, SearchError> {
  let web_root = &config.web_root;
  let results = find_pages(config, query)?;

  let mut html = String::from("Content-Type: text/html\n\n");
  html.push_str(&read_template(web_root, "above1.html")?);
  html.push_str("Searching");
  html.push_str(&read_template(web_root, "above2.html")?);

  match results.last() {
    Some(hit) if query.from_not_found => {
      let _ = write!(html, "<script>location.replace('{}');</script>", hit.href);
    }
    Some(_) => html.push_str(&render_table(config, query, &results)),
    None => html.push_str(
      "</div></div><section class='p-strip u-no-padding--top'><div class='row'><h2>No matching titles found</h2>",
    ),
  }

  html.push_str(&read_template(web_root, "below.html")?);
  debug!(title = %query.title, matches = results.total(), "search rendered");
  Ok(html)
}

/// Answer a CGI request using the configuration stored at `config_path`.
pub fn handle_request(config_path: &Path, query_string: &str) -> Result<String, SearchError> {
  let config = read_config(config_path)?;
  render(&config, &SearchQuery::parse(query_string))
}
