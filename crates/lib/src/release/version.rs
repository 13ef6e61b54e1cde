//! Ordering of distribution version strings.

use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Component<'a> {
  Numeric(u64),
  Text(&'a str),
}

fn components(version: &str) -> impl Iterator<Item = Component<'_>> {
  version.trim().split('.').map(|part| match part.parse::<u64>() {
    Ok(n) => Component::Numeric(n),
    Err(_) => Component::Text(part),
  })
}

/// Compare two versions component by component.
///
/// Dot-separated parts compare as integers (`24.10 > 24.04`), a numeric part
/// sorts before a textual one, and a version that is a prefix of another sorts
/// first (`24 < 24.04`).
pub fn compare_versions(a: &str, b: &str) -> Ordering {
  components(a).cmp(components(b))
}
