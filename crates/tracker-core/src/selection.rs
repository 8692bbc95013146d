//! Checkbox-driven bulk deletion on the admin list.
//!
//! The selection set is never stored: it is read back from the row
//! checkboxes every time something changes.

use tracing::{
  debug,
  info
};
use url::Url;

use crate::capability::{
  Capability,
  Component
};
use crate::surface::{
  ActionButton,
  Checkbox,
  Dialog,
  Navigator,
  TextSlot
};

pub const SEARCH_PARAM: &str = "search";

pub const DELETE_ALL_MESSAGE: &str =
  "Are you sure you want to delete ALL items? \
   This action cannot be undone.";

pub const DELETE_FILTERED_MESSAGE: &str =
  "Are you sure you want to delete ALL FILTERED items? \
   This action cannot be undone.";

pub struct BulkSelection<C, B, L> {
  select_all:      Option<C>,
  rows:            Vec<C>,
  delete_selected: Option<B>,
  count:           Option<L>
}

impl<C, B, L> BulkSelection<C, B, L>
where
  C: Checkbox,
  B: ActionButton,
  L: TextSlot
{
  pub fn new(
    select_all: Option<C>,
    rows: Vec<C>,
    delete_selected: Option<B>,
    count: Option<L>
  ) -> Self {
    Self {
      select_all,
      rows,
      delete_selected,
      count
    }
  }

  /// Handler for the "select all" control: every row follows it.
  pub fn select_all_changed(&self) {
    let checked = self
      .select_all
      .as_ref()
      .is_some_and(Checkbox::is_checked);
    self.set_all(checked);
  }

  pub fn set_all(&self, checked: bool) {
    for row in &self.rows {
      row.set_checked(checked);
    }
    debug!(
      checked,
      rows = self.rows.len(),
      "applied select all"
    );
    self.refresh();
  }

  /// Handler for a single row. The "select all" control is left as is.
  pub fn row_changed(&self) {
    self.refresh();
  }

  /// Delete-selected is disabled exactly when nothing is checked.
  pub fn refresh(&self) {
    let selected = self.selected_count();
    if let Some(button) = &self.delete_selected {
      button.set_disabled(selected == 0);
    }
    if let Some(label) = &self.count {
      label.set_text(&selected.to_string());
    }
  }

  pub fn selected_count(&self) -> usize {
    self
      .rows
      .iter()
      .filter(|row| row.is_checked())
      .count()
  }

  /// Row identifiers the bulk-delete form submits.
  pub fn selected_ids(&self) -> Vec<String> {
    self
      .rows
      .iter()
      .filter(|row| row.is_checked())
      .map(Checkbox::value)
      .collect()
  }

  pub fn rows(&self) -> &[C] {
    &self.rows
  }
}

impl<C, B, L> Component for BulkSelection<C, B, L> {
  const NAME: &'static str = "selection";

  fn capability(&self) -> Capability {
    let mut missing = Vec::new();
    if self.select_all.is_none() {
      missing.push("select-all checkbox");
    }
    if self.rows.is_empty() {
      missing.push("row checkboxes");
    }
    if self.delete_selected.is_none() {
      missing.push("delete-selected button");
    }
    // Active while any of the three exists.
    if missing.len() < 3 {
      Capability::Active
    } else {
      Capability::from_missing(missing)
    }
  }
}

/// True when `url` carries a non-empty `search` parameter. Unparseable
/// locations count as unfiltered.
pub fn is_filtered(url: &str) -> bool {
  Url::parse(url)
    .ok()
    .and_then(|url| {
      url
        .query_pairs()
        .find(|(key, _)| key == SEARCH_PARAM)
        .map(|(_, value)| !value.is_empty())
    })
    .unwrap_or(false)
}

pub fn delete_all_message(
  url: &str
) -> &'static str {
  if is_filtered(url) {
    DELETE_FILTERED_MESSAGE
  } else {
    DELETE_ALL_MESSAGE
  }
}

/// Prompts before a delete-all. The caller proceeds only on `true`.
pub fn confirm_delete_all<D, N>(
  dialog: &D,
  navigator: &N
) -> bool
where
  D: Dialog,
  N: Navigator
{
  let message =
    delete_all_message(&navigator.current_url());
  let accepted = dialog.confirm(message);
  info!(
    accepted,
    filtered = message == DELETE_FILTERED_MESSAGE,
    "delete-all confirmation answered"
  );
  accepted
}
