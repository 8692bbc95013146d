//! Page surface the behaviors run against.
//!
//! Each trait covers the handful of operations one kind of element
//! needs. The browser crate implements them over `web-sys` handles and
//! [`crate::memory`] implements them in memory. Handles take `&self`
//! for mutation, the same way DOM handles do.

use std::time::Duration;

use crate::theme::Theme;

/// Element whose text content is replaced wholesale.
pub trait TextSlot {
  fn set_text(&self, text: &str);
}

/// Document root carrying the theme attribute.
pub trait ThemeRoot {
  fn attribute(&self) -> Option<String>;

  fn set_attribute(&self, value: &str);
}

/// Small persisted key/value store.
pub trait KeyValueStore {
  fn get(&self, key: &str) -> Option<String>;

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;
}

/// Tells the server the theme changed.
///
/// Implementations submit and return immediately. Failures go to the
/// log and never reach the caller.
pub trait ThemeNotifier {
  fn submit(&self, theme: Theme);
}

/// Element with inline style that can also leave the document.
pub trait StyledElement {
  fn style(&self, property: &str) -> Option<String>;

  fn set_style(
    &self,
    property: &str,
    value: &str
  );

  fn remove(&self);
}

pub trait Checkbox {
  fn is_checked(&self) -> bool;

  fn set_checked(&self, checked: bool);

  /// Row identifier carried by the checkbox.
  fn value(&self) -> String;
}

pub trait ActionButton {
  fn set_disabled(&self, disabled: bool);
}

/// Current location and full-page navigation.
pub trait Navigator {
  fn current_url(&self) -> String;

  fn navigate(&self, url: &str);
}

/// Blocking accept/cancel prompt.
pub trait Dialog {
  fn confirm(&self, message: &str) -> bool;
}

/// One-shot timers on the page's single logical thread.
pub trait Scheduler {
  fn after(
    &self,
    delay: Duration,
    task: Box<dyn FnOnce()>
  );
}
