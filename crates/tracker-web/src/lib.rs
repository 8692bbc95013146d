//! Browser entry point for the tracker pages.
//!
//! Loaded as a module by every server-rendered page; wires whatever
//! behaviors the page has markup for once the document is parsed.

pub mod boot;
pub mod dom;
pub mod notify;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;

use crate::dom::{
  BrowserDialog,
  BrowserLocation
};

#[wasm_bindgen(start)]
pub fn start() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!("starting tracker page behaviors");

  let Some(window) = web_sys::window() else {
    tracing::error!("no window; behaviors not started");
    return;
  };
  let Some(document) = window.document() else {
    tracing::error!("no document; behaviors not started");
    return;
  };

  if document.ready_state() == "loading" {
    let target = document.clone();
    EventListener::once(
      &target,
      "DOMContentLoaded",
      move |_| boot::boot(&window, &document)
    )
    .forget();
  } else {
    boot::boot(&window, &document);
  }
}

/// Asks before deleting every item, or every filtered item when the
/// listing has a search. The delete-all form submits only on `true`.
#[wasm_bindgen(js_name = confirmDeleteAll)]
pub fn confirm_delete_all() -> bool {
  let Some(window) = web_sys::window() else {
    return false;
  };
  tracker_core::selection::confirm_delete_all(
    &BrowserDialog(window.clone()),
    &BrowserLocation(window)
  )
}
