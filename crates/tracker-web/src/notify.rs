use std::rc::Rc;

use anyhow::anyhow;
use gloo::net::http::Request;
use tracker_core::Theme;
use tracker_core::surface::ThemeNotifier;
use tracker_core::theme::{
  AckCheck,
  check_ack
};

/// Posts to the theme endpoint on a detached task.
#[derive(Clone)]
pub struct HttpThemeNotifier {
  endpoint: Rc<str>
}

impl HttpThemeNotifier {
  pub fn new(endpoint: &str) -> Self {
    Self {
      endpoint: Rc::from(endpoint)
    }
  }
}

impl ThemeNotifier for HttpThemeNotifier {
  fn submit(&self, theme: Theme) {
    let endpoint = Rc::clone(&self.endpoint);
    wasm_bindgen_futures::spawn_local(async move {
      if let Err(error) =
        post_toggle(&endpoint, theme).await
      {
        tracing::warn!(
          error = %format!("{error:#}"),
          %endpoint,
          "theme update failed"
        );
      }
    });
  }
}

async fn post_toggle(
  endpoint: &str,
  applied: Theme
) -> anyhow::Result<AckCheck> {
  let response = Request::post(endpoint)
    .header("Content-Type", "application/json")
    .send()
    .await
    .map_err(|error| {
      anyhow!("request failed: {error}")
    })?;

  let body = response.text().await.map_err(|error| {
    anyhow!("failed reading response: {error}")
  })?;
  check_ack(response.status(), &body, applied)
}
