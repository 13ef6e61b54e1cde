use std::sync::LazyLock;

use regex::Regex;

static CODENAME: LazyLock<Regex> = LazyLock::new(|| Regex::new("[a-z]+").expect("codename pattern is valid"));

/// Extract release codenames from an operator-supplied list.
///
/// Every run of lowercase letters is a codename; anything else separates them.
/// Repeats are dropped, keeping the first occurrence.
pub fn parse_release_spec(raw: &str) -> Vec<String> {
  let mut codenames: Vec<String> = Vec::new();
  for m in CODENAME.find_iter(raw) {
    let name = m.as_str();
    if !codenames.iter().any(|c| c == name) {
      codenames.push(name.to_string());
    }
  }
  codenames
}
