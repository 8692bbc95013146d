use std::fmt;

use anyhow::{
  Context,
  anyhow
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};

use crate::capability::{
  Capability,
  Component
};
use crate::config::ThemeConfig;
use crate::surface::{
  KeyValueStore,
  TextSlot,
  ThemeNotifier,
  ThemeRoot
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark
}

impl Theme {
  /// Accepts only the exact attribute values.
  pub fn parse(raw: &str) -> Option<Self> {
    match raw {
      | "light" => Some(Self::Light),
      | "dark" => Some(Self::Dark),
      | _ => None
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  pub fn toggled(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  /// Glyph shown on the toggle: the mode a click switches to.
  pub fn glyph(self) -> &'static str {
    match self {
      | Self::Light => "🌙",
      | Self::Dark => "☀️"
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Server-rendered attribute, then the stored value, then the fallback.
/// Unrecognized values fall through to the next source.
pub fn resolve_initial(
  rendered: Option<&str>,
  stored: Option<&str>,
  fallback: Theme
) -> Theme {
  rendered
    .and_then(Theme::parse)
    .or_else(|| stored.and_then(Theme::parse))
    .unwrap_or(fallback)
}

/// Body returned by the theme endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeAck {
  pub theme: Theme
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckCheck {
  Agreed,
  /// The server session holds a different theme than the page.
  Drift { server: Theme }
}

/// Checks the endpoint's reply against the theme the page applied.
/// Disagreement is logged and reported, never corrected.
pub fn check_ack(
  status: u16,
  body: &str,
  applied: Theme
) -> anyhow::Result<AckCheck> {
  if !(200..300).contains(&status) {
    return Err(anyhow!(
      "endpoint answered {status}"
    ));
  }

  let ack = serde_json::from_str::<ThemeAck>(body)
    .context("unexpected response body")?;

  if ack.theme == applied {
    debug!(
      theme = %ack.theme,
      "server acknowledged theme"
    );
    Ok(AckCheck::Agreed)
  } else {
    warn!(
      local = %applied,
      server = %ack.theme,
      "server session theme differs from page"
    );
    Ok(AckCheck::Drift { server: ack.theme })
  }
}

/// Keeps the root attribute, the toggle glyph and the stored value in
/// agreement.
pub struct ThemeController<R, T, S, N> {
  root:        R,
  toggle:      Option<T>,
  store:       S,
  notifier:    N,
  storage_key: String,
  fallback:    Theme
}

impl<R, T, S, N> ThemeController<R, T, S, N>
where
  R: ThemeRoot,
  T: TextSlot,
  S: KeyValueStore,
  N: ThemeNotifier
{
  pub fn new(
    root: R,
    toggle: Option<T>,
    store: S,
    notifier: N,
    config: &ThemeConfig
  ) -> Self {
    Self {
      root,
      toggle,
      store,
      notifier,
      storage_key: config.storage_key.clone(),
      fallback: config.default_theme()
    }
  }

  /// Resolves, applies and stores the initial theme. Runs whether or
  /// not the toggle exists; the store is overwritten on every load.
  #[tracing::instrument(skip(self))]
  pub fn initialize(&self) -> Theme {
    let rendered = self.root.attribute();
    let stored = self.store.get(&self.storage_key);
    let theme = resolve_initial(
      rendered.as_deref(),
      stored.as_deref(),
      self.fallback
    );
    debug!(
      rendered = ?rendered,
      stored = ?stored,
      %theme,
      "resolved initial theme"
    );

    self.set_theme(theme);
    self.persist(theme);
    theme
  }

  pub fn set_theme(&self, theme: Theme) {
    self.root.set_attribute(theme.as_str());
    if let Some(toggle) = &self.toggle {
      toggle.set_text(theme.glyph());
    }
  }

  /// An absent or empty attribute reads as the fallback. Any other
  /// value that is not `light` reads as dark.
  pub fn current(&self) -> Theme {
    match self.root.attribute().as_deref() {
      | None | Some("") => self.fallback,
      | Some("light") => Theme::Light,
      | Some(_) => Theme::Dark
    }
  }

  /// Applies the opposite theme locally, then tells the server without
  /// waiting on it.
  pub fn toggle(&self) -> Theme {
    let next = self.current().toggled();
    self.set_theme(next);
    self.persist(next);
    info!(theme = %next, "theme toggled");
    self.notifier.submit(next);
    next
  }

  fn persist(&self, theme: Theme) {
    if let Err(error) = self
      .store
      .set(&self.storage_key, theme.as_str())
    {
      warn!(
        %error,
        key = %self.storage_key,
        "failed persisting theme"
      );
    }
  }
}

impl<R, T, S, N> Component
  for ThemeController<R, T, S, N>
{
  const NAME: &'static str = "theme";

  fn capability(&self) -> Capability {
    if self.toggle.is_some() {
      Capability::Active
    } else {
      Capability::Dormant {
        missing: vec!["theme toggle"]
      }
    }
  }
}
