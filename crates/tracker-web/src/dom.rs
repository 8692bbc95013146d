use std::time::Duration;

use anyhow::anyhow;
use gloo::timers::callback::Timeout;
use tracker_core::surface::{
  ActionButton,
  Checkbox,
  Dialog,
  KeyValueStore,
  Navigator,
  Scheduler,
  StyledElement,
  TextSlot,
  ThemeRoot
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  Element,
  HtmlElement,
  HtmlInputElement,
  Storage,
  Window
};

pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone)]
pub struct TextNode(pub Element);

impl TextSlot for TextNode {
  fn set_text(&self, text: &str) {
    self.0.set_text_content(Some(text));
  }
}

#[derive(Clone)]
pub struct DocumentRoot(pub Element);

impl ThemeRoot for DocumentRoot {
  fn attribute(&self) -> Option<String> {
    self.0.get_attribute(THEME_ATTRIBUTE)
  }

  fn set_attribute(&self, value: &str) {
    if let Err(error) =
      self.0.set_attribute(THEME_ATTRIBUTE, value)
    {
      tracing::error!(
        error = ?error,
        "failed setting theme attribute"
      );
    }
  }
}

/// `window.localStorage`, which may be missing or refuse writes.
#[derive(Clone)]
pub struct BrowserStorage(Option<Storage>);

impl BrowserStorage {
  pub fn local(window: &Window) -> Self {
    Self(window.local_storage().ok().flatten())
  }
}

impl KeyValueStore for BrowserStorage {
  fn get(&self, key: &str) -> Option<String> {
    self
      .0
      .as_ref()
      .and_then(|storage| {
        storage.get_item(key).ok().flatten()
      })
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    let storage =
      self.0.as_ref().ok_or_else(|| {
        anyhow!("local storage unavailable")
      })?;
    storage.set_item(key, value).map_err(|error| {
      anyhow!("storage write refused: {error:?}")
    })
  }
}

#[derive(Clone)]
pub struct StyledNode(pub HtmlElement);

impl StyledElement for StyledNode {
  fn style(&self, property: &str) -> Option<String> {
    self
      .0
      .style()
      .get_property_value(property)
      .ok()
  }

  fn set_style(
    &self,
    property: &str,
    value: &str
  ) {
    if let Err(error) =
      self.0.style().set_property(property, value)
    {
      tracing::warn!(
        property,
        error = ?error,
        "failed setting inline style"
      );
    }
  }

  fn remove(&self) {
    self.0.remove();
  }
}

#[derive(Clone)]
pub struct InputCheckbox(pub HtmlInputElement);

impl Checkbox for InputCheckbox {
  fn is_checked(&self) -> bool {
    self.0.checked()
  }

  fn set_checked(&self, checked: bool) {
    self.0.set_checked(checked);
  }

  fn value(&self) -> String {
    self.0.value()
  }
}

/// Any element with the delete-selected id: a `<button>`, an
/// `<input type="submit">` or something else. `disabled` is set as a
/// property, whatever the element kind.
#[derive(Clone)]
pub struct ButtonNode(pub Element);

impl ActionButton for ButtonNode {
  fn set_disabled(&self, disabled: bool) {
    if let Err(error) = js_sys::Reflect::set(
      self.0.as_ref(),
      &JsValue::from_str("disabled"),
      &JsValue::from_bool(disabled)
    ) {
      tracing::warn!(
        error = ?error,
        "failed toggling disabled"
      );
    }
  }
}

#[derive(Clone)]
pub struct BrowserLocation(pub Window);

impl Navigator for BrowserLocation {
  fn current_url(&self) -> String {
    self.0.location().href().unwrap_or_default()
  }

  fn navigate(&self, url: &str) {
    if let Err(error) = self.0.location().set_href(url) {
      tracing::error!(
        %url,
        error = ?error,
        "navigation refused"
      );
    }
  }
}

#[derive(Clone)]
pub struct BrowserDialog(pub Window);

impl Dialog for BrowserDialog {
  fn confirm(&self, message: &str) -> bool {
    self
      .0
      .confirm_with_message(message)
      .unwrap_or(false)
  }
}

/// `setTimeout` through gloo; timers are never cancelled.
#[derive(Clone, Copy, Default)]
pub struct TimerScheduler;

impl Scheduler for TimerScheduler {
  fn after(
    &self,
    delay: Duration,
    task: Box<dyn FnOnce()>
  ) {
    Timeout::new(to_millis(delay), task).forget();
  }
}

pub fn to_millis(delay: Duration) -> u32 {
  u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

pub fn element_by_id<T: JsCast>(
  document: &Document,
  id: &str
) -> Option<T> {
  document
    .get_element_by_id(id)
    .and_then(|element| element.dyn_into::<T>().ok())
}

/// Elements matching `selector` that are of type `T`. An invalid
/// selector matches nothing.
pub fn select_all<T: JsCast>(
  document: &Document,
  selector: &str
) -> Vec<T> {
  let nodes = match document.query_selector_all(selector)
  {
    | Ok(nodes) => nodes,
    | Err(error) => {
      tracing::warn!(
        %selector,
        error = ?error,
        "invalid selector"
      );
      return Vec::new();
    }
  };

  (0..nodes.length())
    .filter_map(|index| nodes.get(index))
    .filter_map(|node| node.dyn_into::<T>().ok())
    .collect()
}
