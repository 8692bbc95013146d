use std::fmt;

use anyhow::Context;
use tracing::info;
use url::Url;

use crate::capability::{
  Capability,
  Component
};
use crate::surface::Navigator;

pub const SORT_PARAM: &str = "sort";
pub const ORDER_PARAM: &str = "order";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
  Asc,
  Desc
}

impl SortOrder {
  /// A header without the ascending marker counts as descending, so
  /// its first activation sorts ascending.
  pub fn from_marker(ascending: bool) -> Self {
    if ascending { Self::Asc } else { Self::Desc }
  }

  pub fn flipped(self) -> Self {
    match self {
      | Self::Asc => Self::Desc,
      | Self::Desc => Self::Asc
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Asc => "asc",
      | Self::Desc => "desc"
    }
  }
}

impl fmt::Display for SortOrder {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// What a sortable header says about itself at click time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortHeader {
  pub key:       String,
  pub ascending: bool
}

impl SortHeader {
  pub fn next_order(&self) -> SortOrder {
    SortOrder::from_marker(self.ascending).flipped()
  }
}

/// Sets `key` the way `URLSearchParams.set` does: the first occurrence
/// is replaced in place, later duplicates are dropped and a missing key
/// is appended.
pub fn set_query_param(
  url: &mut Url,
  key: &str,
  value: &str
) {
  let mut pairs: Vec<(String, String)> = Vec::new();
  let mut replaced = false;
  for (k, v) in url.query_pairs() {
    if k == key {
      if !replaced {
        pairs.push((
          key.to_string(),
          value.to_string()
        ));
        replaced = true;
      }
    } else {
      pairs.push((k.into_owned(), v.into_owned()));
    }
  }
  if !replaced {
    pairs.push((key.to_string(), value.to_string()));
  }

  url
    .query_pairs_mut()
    .clear()
    .extend_pairs(pairs);
}

/// Location that re-sorts the listing by `header`.
pub fn sorted_url(
  current: &str,
  header: &SortHeader
) -> anyhow::Result<String> {
  let mut url = Url::parse(current)
    .with_context(|| {
      format!("invalid page url: {current}")
    })?;
  set_query_param(&mut url, SORT_PARAM, &header.key);
  set_query_param(
    &mut url,
    ORDER_PARAM,
    header.next_order().as_str()
  );
  Ok(url.to_string())
}

/// Turns header activations into full-page navigations.
pub struct SortNavigator<N> {
  navigator: N,
  headers:   usize
}

impl<N: Navigator> SortNavigator<N> {
  /// `headers` is how many sortable headers were wired.
  pub fn new(navigator: N, headers: usize) -> Self {
    Self { navigator, headers }
  }

  pub fn activate(
    &self,
    header: &SortHeader
  ) -> anyhow::Result<()> {
    let target = sorted_url(
      &self.navigator.current_url(),
      header
    )?;
    info!(
      sort = %header.key,
      order = %header.next_order(),
      "navigating to re-sorted listing"
    );
    self.navigator.navigate(&target);
    Ok(())
  }
}

impl<N> Component for SortNavigator<N> {
  const NAME: &'static str = "sort";

  fn capability(&self) -> Capability {
    if self.headers > 0 {
      Capability::Active
    } else {
      Capability::Dormant {
        missing: vec!["sortable headers"]
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn header(
    key: &str,
    ascending: bool
  ) -> SortHeader {
    SortHeader {
      key: key.to_string(),
      ascending
    }
  }

  #[test]
  fn unmarked_header_sorts_ascending() {
    let next = sorted_url(
      "http://localhost/",
      &header("title", false)
    )
    .expect("valid url");
    assert_eq!(
      next,
      "http://localhost/?sort=title&order=asc"
    );
  }

  #[test]
  fn ascending_header_flips_to_descending() {
    let next = sorted_url(
      "http://localhost/?sort=title&order=asc",
      &header("title", true)
    )
    .expect("valid url");
    assert_eq!(
      next,
      "http://localhost/?sort=title&order=desc"
    );
  }

  #[test]
  fn keeps_search_and_replaces_in_place() {
    let next = sorted_url(
      "http://localhost/delete?order=desc&search=rust+book\
       &sort=progress&sort=title",
      &header("hours_spent", false)
    )
    .expect("valid url");
    assert_eq!(
      next,
      "http://localhost/delete?order=asc&search=rust+book&sort=hours_spent"
    );
  }

  #[test]
  fn rejects_relative_location() {
    assert!(
      sorted_url("/index", &header("title", false))
        .is_err()
    );
  }
}
