//! In-memory page model.
//!
//! Every handle is a cheap clone sharing its state, so a test can keep
//! one copy while a component owns another.

use std::cell::{
  Cell,
  RefCell
};
use std::collections::{
  BTreeMap,
  HashMap
};
use std::rc::Rc;
use std::time::Duration;

use anyhow::anyhow;

use crate::surface::{
  ActionButton,
  Checkbox,
  Dialog,
  KeyValueStore,
  Navigator,
  Scheduler,
  StyledElement,
  TextSlot,
  ThemeNotifier,
  ThemeRoot
};
use crate::theme::Theme;

#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
  text: Rc<RefCell<Option<String>>>
}

impl MemorySlot {
  pub fn text(&self) -> Option<String> {
    self.text.borrow().clone()
  }
}

impl TextSlot for MemorySlot {
  fn set_text(&self, text: &str) {
    *self.text.borrow_mut() = Some(text.to_string());
  }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRoot {
  attribute: Rc<RefCell<Option<String>>>
}

impl MemoryRoot {
  pub fn rendered(theme: &str) -> Self {
    let root = Self::default();
    root.set_attribute(theme);
    root
  }
}

impl ThemeRoot for MemoryRoot {
  fn attribute(&self) -> Option<String> {
    self.attribute.borrow().clone()
  }

  fn set_attribute(&self, value: &str) {
    *self.attribute.borrow_mut() =
      Some(value.to_string());
  }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries:  Rc<RefCell<HashMap<String, String>>>,
  readonly: Rc<Cell<bool>>
}

impl MemoryStore {
  /// Rejects writes, like storage in a locked-down private window.
  pub fn readonly() -> Self {
    let store = Self::default();
    store.readonly.set(true);
    store
  }

  pub fn with_entry(key: &str, value: &str) -> Self {
    let store = Self::default();
    store
      .entries
      .borrow_mut()
      .insert(key.to_string(), value.to_string());
    store
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Option<String> {
    self.entries.borrow().get(key).cloned()
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    if self.readonly.get() {
      return Err(anyhow!(
        "storage is read-only"
      ));
    }
    self
      .entries
      .borrow_mut()
      .insert(key.to_string(), value.to_string());
    Ok(())
  }
}

/// Records every submission instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
  submitted: Rc<RefCell<Vec<Theme>>>
}

impl RecordingNotifier {
  pub fn submitted(&self) -> Vec<Theme> {
    self.submitted.borrow().clone()
  }
}

impl ThemeNotifier for RecordingNotifier {
  fn submit(&self, theme: Theme) {
    self.submitted.borrow_mut().push(theme);
  }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
  style:   Rc<RefCell<BTreeMap<String, String>>>,
  removed: Rc<Cell<bool>>
}

impl MemoryElement {
  pub fn with_style(
    property: &str,
    value: &str
  ) -> Self {
    let element = Self::default();
    element.set_style(property, value);
    element
  }

  pub fn is_removed(&self) -> bool {
    self.removed.get()
  }
}

impl StyledElement for MemoryElement {
  fn style(&self, property: &str) -> Option<String> {
    self.style.borrow().get(property).cloned()
  }

  fn set_style(
    &self,
    property: &str,
    value: &str
  ) {
    self
      .style
      .borrow_mut()
      .insert(property.to_string(), value.to_string());
  }

  fn remove(&self) {
    self.removed.set(true);
  }
}

#[derive(Debug, Clone)]
pub struct MemoryCheckbox {
  value:   String,
  checked: Rc<Cell<bool>>
}

impl MemoryCheckbox {
  pub fn new(value: &str) -> Self {
    Self {
      value:   value.to_string(),
      checked: Rc::default()
    }
  }

  pub fn checked(value: &str) -> Self {
    let checkbox = Self::new(value);
    checkbox.checked.set(true);
    checkbox
  }
}

impl Checkbox for MemoryCheckbox {
  fn is_checked(&self) -> bool {
    self.checked.get()
  }

  fn set_checked(&self, checked: bool) {
    self.checked.set(checked);
  }

  fn value(&self) -> String {
    self.value.clone()
  }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryButton {
  disabled: Rc<Cell<bool>>
}

impl MemoryButton {
  pub fn is_disabled(&self) -> bool {
    self.disabled.get()
  }
}

impl ActionButton for MemoryButton {
  fn set_disabled(&self, disabled: bool) {
    self.disabled.set(disabled);
  }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
  location: Rc<RefCell<String>>,
  visited:  Rc<RefCell<Vec<String>>>
}

impl MemoryNavigator {
  pub fn at(url: &str) -> Self {
    let navigator = Self::default();
    *navigator.location.borrow_mut() = url.to_string();
    navigator
  }

  pub fn visited(&self) -> Vec<String> {
    self.visited.borrow().clone()
  }
}

impl Navigator for MemoryNavigator {
  fn current_url(&self) -> String {
    self.location.borrow().clone()
  }

  fn navigate(&self, url: &str) {
    *self.location.borrow_mut() = url.to_string();
    self.visited.borrow_mut().push(url.to_string());
  }
}

/// Answers every prompt the same way and keeps the messages.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialog {
  answer: bool,
  shown:  Rc<RefCell<Vec<String>>>
}

impl ScriptedDialog {
  pub fn answering(answer: bool) -> Self {
    Self {
      answer,
      shown: Rc::default()
    }
  }

  pub fn shown(&self) -> Vec<String> {
    self.shown.borrow().clone()
  }
}

impl Dialog for ScriptedDialog {
  fn confirm(&self, message: &str) -> bool {
    self.shown.borrow_mut().push(message.to_string());
    self.answer
  }
}

struct Pending {
  due:  Duration,
  seq:  u64,
  task: Box<dyn FnOnce()>
}

#[derive(Default)]
struct Timeline {
  now:     Duration,
  seq:     u64,
  pending: Vec<Pending>
}

/// Virtual clock. Tasks run only when [`ManualScheduler::advance`]
/// passes their due time, in due order, ties in scheduling order.
#[derive(Clone, Default)]
pub struct ManualScheduler {
  timeline: Rc<RefCell<Timeline>>
}

impl ManualScheduler {
  pub fn now(&self) -> Duration {
    self.timeline.borrow().now
  }

  pub fn pending(&self) -> usize {
    self.timeline.borrow().pending.len()
  }

  /// Tasks scheduled while advancing run in the same call if they fall
  /// due before the target.
  pub fn advance(&self, by: Duration) {
    let target = self.now() + by;
    while let Some(next) = self.take_due(target) {
      self.timeline.borrow_mut().now = next.due;
      (next.task)();
    }
    self.timeline.borrow_mut().now = target;
  }

  fn take_due(&self, target: Duration) -> Option<Pending> {
    let mut timeline = self.timeline.borrow_mut();
    let index = timeline
      .pending
      .iter()
      .enumerate()
      .filter(|(_, pending)| pending.due <= target)
      .min_by_key(|(_, pending)| (pending.due, pending.seq))
      .map(|(index, _)| index)?;
    Some(timeline.pending.swap_remove(index))
  }
}

impl Scheduler for ManualScheduler {
  fn after(
    &self,
    delay: Duration,
    task: Box<dyn FnOnce()>
  ) {
    let mut timeline = self.timeline.borrow_mut();
    let pending = Pending {
      due: timeline.now + delay,
      seq: timeline.seq,
      task
    };
    timeline.seq += 1;
    timeline.pending.push(pending);
  }
}
