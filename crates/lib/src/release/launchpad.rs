//! Launchpad-backed release metadata.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use tracing::{debug, info};

use super::{ReleaseProvider, ResolveError};

/// Collection of Ubuntu series on the public Launchpad API.
pub const LAUNCHPAD_SERIES_URL: &str = "https://api.launchpad.net/devel/ubuntu/series";

/// Upper bound on collection pages followed in one lookup.
const MAX_PAGES: usize = 50;

#[derive(Debug, Deserialize)]
struct SeriesPage {
  entries: Vec<SeriesEntry>,
  #[serde(default)]
  next_collection_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeriesEntry {
  name: String,
  version: String,
}

/// Anonymous Launchpad client.
pub struct LaunchpadReleases {
  client: reqwest::blocking::Client,
  series_url: String,
}

impl LaunchpadReleases {
  pub fn new() -> Result<Self, ResolveError> {
    Self::with_url(LAUNCHPAD_SERIES_URL)
  }

  /// Client reading the series collection from `series_url`.
  pub fn with_url(series_url: impl Into<String>) -> Result<Self, ResolveError> {
    let client = reqwest::blocking::Client::builder()
      .user_agent(concat!("manmirror/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| ResolveError::Lookup(e.to_string()))?;

    Ok(Self {
      client,
      series_url: series_url.into(),
    })
  }

  /// Every series name and version, following pagination.
  fn fetch_series(&self) -> Result<BTreeMap<String, String>, ResolveError> {
    let mut series = BTreeMap::new();
    let mut visited = HashSet::new();
    let mut next = Some(self.series_url.clone());

    while let Some(url) = next.take() {
      if !visited.insert(url.clone()) {
        return Err(ResolveError::Lookup(format!("{}: pagination loops back to a visited page", url)));
      }
      if visited.len() > MAX_PAGES {
        return Err(ResolveError::Lookup(format!("{}: more than {} pages of series", url, MAX_PAGES)));
      }
      debug!(url = %url, "fetching release series");

      let response = self
        .client
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .map_err(|e| ResolveError::Lookup(format!("{}: {}", url, e)))?;

      if !response.status().is_success() {
        return Err(ResolveError::Lookup(format!("{}: HTTP {}", url, response.status())));
      }

      let page: SeriesPage = response
        .json()
        .map_err(|e| ResolveError::Lookup(format!("{}: {}", url, e)))?;

      for entry in page.entries {
        series.insert(entry.name, entry.version);
      }
      next = page.next_collection_link;
    }

    info!(count = series.len(), "fetched release series from Launchpad");
    Ok(series)
  }
}

impl ReleaseProvider for LaunchpadReleases {
  fn lookup(&self, codenames: &[String]) -> Result<BTreeMap<String, String>, ResolveError> {
    let series = self.fetch_series()?;

    let mut found = BTreeMap::new();
    for name in codenames {
      let version = series
        .get(name)
        .ok_or_else(|| ResolveError::ReleaseNotFound(name.clone()))?;
      found.insert(name.clone(), version.clone());
    }
    Ok(found)
  }
}
