use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use tracker_core::alerts::AlertDismissal;
use tracker_core::clock::ClockDisplay;
use tracker_core::config::{
  CONFIG_ELEMENT_ID,
  PageConfig,
  SortConfig
};
use tracker_core::progress::ProgressAnimator;
use tracker_core::selection::BulkSelection;
use tracker_core::sort::{
  SortHeader,
  SortNavigator
};
use tracker_core::theme::ThemeController;
use tracker_core::{
  BootReport,
  Capability
};
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
  Document,
  HtmlElement,
  HtmlInputElement,
  Window
};

use crate::dom::{
  BrowserLocation,
  BrowserStorage,
  ButtonNode,
  DocumentRoot,
  InputCheckbox,
  StyledNode,
  TextNode,
  TimerScheduler,
  element_by_id,
  select_all,
  to_millis
};
use crate::notify::HttpThemeNotifier;

pub const CONFIRM_GLOBAL: &str = "confirmDeleteAll";

/// Wires every behavior the document has elements for. Theme first so
/// nothing renders with a stale attribute.
#[tracing::instrument(skip_all)]
pub fn boot(window: &Window, document: &Document) {
  let config = PageConfig::load(
    document
      .get_element_by_id(CONFIG_ELEMENT_ID)
      .and_then(|element| element.text_content())
      .as_deref()
  );

  let mut report = BootReport::new();
  wire_theme(window, document, &config, &mut report);
  wire_clock(document, &config, &mut report);
  wire_sort(window, document, &config, &mut report);
  wire_alerts(document, &config, &mut report);
  wire_progress(document, &config, &mut report);
  wire_selection(document, &config, &mut report);
  expose_confirm(window);

  report.log_summary();
}

fn wire_theme(
  window: &Window,
  document: &Document,
  config: &PageConfig,
  report: &mut BootReport
) {
  let Some(root) = document.document_element() else {
    tracing::error!(
      "document has no root element; theme skipped"
    );
    return;
  };

  let toggle = document
    .get_element_by_id(&config.theme.toggle_id);
  let controller = Rc::new(ThemeController::new(
    DocumentRoot(root),
    toggle.clone().map(TextNode),
    BrowserStorage::local(window),
    HttpThemeNotifier::new(&config.theme.endpoint),
    &config.theme
  ));

  controller.initialize();
  report.record(controller.as_ref());

  if let Some(toggle) = toggle {
    EventListener::new(&toggle, "click", move |_| {
      controller.toggle();
    })
    .forget();
  }
}

fn wire_clock(
  document: &Document,
  config: &PageConfig,
  report: &mut BootReport
) {
  let clock = ClockDisplay::new(
    document
      .get_element_by_id(&config.clock.date_slot_id)
      .map(TextNode),
    document
      .get_element_by_id(&config.clock.time_slot_id)
      .map(TextNode)
  );
  if !report.record(&clock).is_active() {
    return;
  }

  let tick = move || {
    clock.render(&chrono::Local::now().naive_local());
  };
  tick();
  Interval::new(to_millis(config.clock.tick()), tick)
    .forget();
}

/// Sortable headers paired with their sort key. Headers without a
/// key are left unwired.
pub fn sortable_headers(
  document: &Document,
  config: &SortConfig
) -> Vec<(HtmlElement, String)> {
  select_all::<HtmlElement>(
    document,
    &config.header_selector
  )
  .into_iter()
  .filter_map(|header| {
    match header.get_attribute(&config.key_attribute) {
      | Some(key) if !key.is_empty() => {
        Some((header, key))
      }
      | _ => {
        tracing::debug!(
          "sortable header without a sort key skipped"
        );
        None
      }
    }
  })
  .collect()
}

/// Reads the ascending marker as the header carries it right now.
pub fn header_state(
  header: &HtmlElement,
  key: &str,
  ascending_class: &str
) -> SortHeader {
  SortHeader {
    key:       key.to_string(),
    ascending: header
      .class_list()
      .contains(ascending_class)
  }
}

fn wire_sort(
  window: &Window,
  document: &Document,
  config: &PageConfig,
  report: &mut BootReport
) {
  let headers =
    sortable_headers(document, &config.sort);

  let navigator = Rc::new(SortNavigator::new(
    BrowserLocation(window.clone()),
    headers.len()
  ));
  if !report.record(navigator.as_ref()).is_active() {
    return;
  }

  for (header, key) in headers {
    let navigator = Rc::clone(&navigator);
    let ascending_class =
      config.sort.ascending_class.clone();
    let target = header.clone();
    EventListener::new(&target, "click", move |_| {
      let state =
        header_state(&header, &key, &ascending_class);
      if let Err(error) = navigator.activate(&state) {
        tracing::warn!(
          error = %format!("{error:#}"),
          "sort navigation skipped"
        );
      }
    })
    .forget();
  }
}

fn wire_alerts(
  document: &Document,
  config: &PageConfig,
  report: &mut BootReport
) {
  let alerts = AlertDismissal::new(
    select_all::<HtmlElement>(
      document,
      &config.alerts.selector
    )
    .into_iter()
    .map(StyledNode)
    .collect()
  );
  if report.record(&alerts).is_active() {
    alerts.schedule(&TimerScheduler, &config.alerts);
  }
}

fn wire_progress(
  document: &Document,
  config: &PageConfig,
  report: &mut BootReport
) {
  let bars = ProgressAnimator::new(
    select_all::<HtmlElement>(
      document,
      &config.progress.selector
    )
    .into_iter()
    .map(StyledNode)
    .collect()
  );
  if report.record(&bars).is_active() {
    bars.animate(&TimerScheduler, &config.progress);
  }
}

fn wire_selection(
  document: &Document,
  config: &PageConfig,
  report: &mut BootReport
) {
  let select_all_box = element_by_id::<HtmlInputElement>(
    document,
    &config.selection.select_all_id
  );
  let selection = Rc::new(BulkSelection::new(
    select_all_box.clone().map(InputCheckbox),
    select_all::<HtmlInputElement>(
      document,
      &config.selection.row_selector
    )
    .into_iter()
    .map(InputCheckbox)
    .collect(),
    document
      .get_element_by_id(
        &config.selection.delete_selected_id
      )
      .map(ButtonNode),
    document
      .get_element_by_id(&config.selection.count_id)
      .map(TextNode)
  ));

  if let Capability::Dormant { .. } =
    report.record(selection.as_ref())
  {
    return;
  }

  if let Some(select_all_box) = select_all_box {
    let selection = Rc::clone(&selection);
    EventListener::new(
      &select_all_box,
      "change",
      move |_| selection.select_all_changed()
    )
    .forget();
  }

  for row in selection.rows() {
    let selection = Rc::clone(&selection);
    EventListener::new(&row.0, "change", move |_| {
      selection.row_changed();
    })
    .forget();
  }

  selection.refresh();
}

/// Publishes `window.confirmDeleteAll` for the delete-all form.
fn expose_confirm(window: &Window) {
  let confirm = Closure::<dyn Fn() -> bool>::new(
    crate::confirm_delete_all
  );
  if let Err(error) = js_sys::Reflect::set(
    window.as_ref(),
    &JsValue::from_str(CONFIRM_GLOBAL),
    confirm.as_ref()
  ) {
    tracing::error!(
      error = ?error,
      "failed exposing delete-all confirmation"
    );
  }
  confirm.forget();
}
