//! Parsing and sanitizing the search request.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

static SECTION: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(.*)\.([1-9])(.*)$").expect("section pattern is valid"));
static TITLE_CHARS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[^.a-zA-Z0-9/_:+@-]").expect("title pattern is valid"));
static LANG_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z-]").expect("lang pattern is valid"));

/// Sections scanned when the query does not name one.
pub const ALL_SECTIONS: RangeInclusive<u8> = 1..=8;

const DEFAULT_LANG: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  /// Page title, restricted to characters that cannot escape a glob.
  pub title: String,
  pub sections: RangeInclusive<u8>,
  /// Anything after the section digit, e.g. `ssl` in `EVP_sha256.3ssl`.
  pub suffix: String,
  /// Language directory, e.g. `en` or `pt_BR`.
  pub lang: String,
  /// The request came from a page-not-found redirect.
  pub from_not_found: bool,
}

impl SearchQuery {
  /// Parse a CGI query string (`q=ls.1&lr=lang_en&titles=404`).
  pub fn parse(query_string: &str) -> Self {
    let params: HashMap<String, String> = url::form_urlencoded::parse(query_string.as_bytes())
      .into_owned()
      .collect();

    let raw = params.get("q").map(String::as_str).unwrap_or("");
    let (title, sections, suffix) = match SECTION.captures(raw) {
      Some(caps) => {
        let section: u8 = caps[2].parse().unwrap_or(1);
        (caps[1].to_string(), section..=section, caps[3].to_string())
      }
      None => (raw.to_string(), ALL_SECTIONS, String::new()),
    };

    Self {
      title: sanitize_title(&title),
      sections,
      suffix: sanitize_title(&suffix),
      lang: params.get("lr").map(|lr| sanitize_lang(lr)).unwrap_or_else(|| DEFAULT_LANG.to_string()),
      from_not_found: params.get("titles").is_some_and(|t| t == "404"),
    }
  }
}

fn sanitize_title(raw: &str) -> String {
  TITLE_CHARS.replace_all(raw, "").into_owned()
}

fn sanitize_lang(raw: &str) -> String {
  let lang = raw.strip_prefix("lang_").unwrap_or(raw);
  let lang = LANG_CHARS.replace_all(lang, "").replace('-', "_");
  if lang.is_empty() { DEFAULT_LANG.to_string() } else { lang }
}
