//! Element names, timings and the theme endpoint.
//!
//! Pages may embed a TOML document to override any of these; every
//! field defaults to the markup the server renders.

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::{
  error,
  info,
  warn
};

use crate::theme::Theme;

/// Id of the element whose text holds the page's TOML overrides.
pub const CONFIG_ELEMENT_ID: &str =
  "tracker-config";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
  pub theme:     ThemeConfig,
  pub clock:     ClockConfig,
  pub sort:      SortConfig,
  pub alerts:    AlertConfig,
  pub progress:  ProgressConfig,
  pub selection: SelectionConfig
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
  pub default:     String,
  pub storage_key: String,
  pub endpoint:    String,
  pub toggle_id:   String
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
  pub date_slot_id: String,
  pub time_slot_id: String,
  pub tick_ms:      u32
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SortConfig {
  pub header_selector: String,
  pub key_attribute:   String,
  pub ascending_class: String
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
  pub selector:   String,
  pub visible_ms: u32,
  pub fade_ms:    u32
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
  pub selector: String,
  pub delay_ms: u32
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
  pub select_all_id:      String,
  pub row_selector:       String,
  pub delete_selected_id: String,
  pub count_id:           String
}

impl Default for PageConfig {
  fn default() -> Self {
    Self {
      theme:     ThemeConfig::default(),
      clock:     ClockConfig::default(),
      sort:      SortConfig::default(),
      alerts:    AlertConfig::default(),
      progress:  ProgressConfig::default(),
      selection: SelectionConfig::default()
    }
  }
}

impl Default for ThemeConfig {
  fn default() -> Self {
    Self {
      default:     "light".to_string(),
      storage_key: "theme".to_string(),
      endpoint:    "/toggle_theme".to_string(),
      toggle_id:   "theme-toggle".to_string()
    }
  }
}

impl Default for ClockConfig {
  fn default() -> Self {
    Self {
      date_slot_id: "current-date".to_string(),
      time_slot_id: "current-time".to_string(),
      tick_ms:      1_000
    }
  }
}

impl Default for SortConfig {
  fn default() -> Self {
    Self {
      header_selector: "th.sortable".to_string(),
      key_attribute:   "data-sort".to_string(),
      ascending_class: "sorted-asc".to_string()
    }
  }
}

impl Default for AlertConfig {
  fn default() -> Self {
    Self {
      selector:   ".alert".to_string(),
      visible_ms: 5_000,
      fade_ms:    300
    }
  }
}

impl Default for ProgressConfig {
  fn default() -> Self {
    Self {
      selector: ".progress-fill".to_string(),
      delay_ms: 100
    }
  }
}

impl Default for SelectionConfig {
  fn default() -> Self {
    Self {
      select_all_id:      "select-all".to_string(),
      row_selector:       ".item-checkbox".to_string(),
      delete_selected_id: "delete-selected"
        .to_string(),
      count_id:           "selected-count".to_string()
    }
  }
}

impl ThemeConfig {
  pub fn default_theme(&self) -> Theme {
    Theme::parse(self.default.trim())
      .unwrap_or_default()
  }
}

impl ClockConfig {
  pub fn tick(&self) -> Duration {
    millis(self.tick_ms)
  }
}

impl AlertConfig {
  pub fn visible_for(&self) -> Duration {
    millis(self.visible_ms)
  }

  pub fn fade_for(&self) -> Duration {
    millis(self.fade_ms)
  }
}

impl ProgressConfig {
  pub fn delay(&self) -> Duration {
    millis(self.delay_ms)
  }
}

fn millis(ms: u32) -> Duration {
  Duration::from_millis(u64::from(ms))
}

impl PageConfig {
  pub fn from_toml(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<Self>(raw).context(
        "failed parsing page config"
      )?;
    config.sanitize();
    Ok(config)
  }

  /// Never fails: a missing or broken document yields the defaults.
  pub fn load(source: Option<&str>) -> Self {
    let Some(raw) = source
      .map(str::trim)
      .filter(|raw| !raw.is_empty())
    else {
      return Self::default();
    };

    match Self::from_toml(raw) {
      | Ok(config) => {
        info!(
          default_theme = %config.theme.default_theme(),
          endpoint = %config.theme.endpoint,
          "loaded page config"
        );
        config
      }
      | Err(error) => {
        error!(
          error = %format!("{error:#}"),
          "failed parsing page config; using defaults"
        );
        Self::default()
      }
    }
  }

  fn sanitize(&mut self) {
    let defaults = Self::default();

    if Theme::parse(self.theme.default.trim())
      .is_none()
    {
      warn!(
        value = %self.theme.default,
        "unknown default theme; using light"
      );
      self.theme.default =
        defaults.theme.default.clone();
    }

    fill_blank(
      &mut self.theme.storage_key,
      &defaults.theme.storage_key
    );
    fill_blank(
      &mut self.theme.endpoint,
      &defaults.theme.endpoint
    );
    fill_blank(
      &mut self.theme.toggle_id,
      &defaults.theme.toggle_id
    );
    fill_blank(
      &mut self.clock.date_slot_id,
      &defaults.clock.date_slot_id
    );
    fill_blank(
      &mut self.clock.time_slot_id,
      &defaults.clock.time_slot_id
    );
    fill_blank(
      &mut self.sort.header_selector,
      &defaults.sort.header_selector
    );
    fill_blank(
      &mut self.sort.key_attribute,
      &defaults.sort.key_attribute
    );
    fill_blank(
      &mut self.sort.ascending_class,
      &defaults.sort.ascending_class
    );
    fill_blank(
      &mut self.alerts.selector,
      &defaults.alerts.selector
    );
    fill_blank(
      &mut self.progress.selector,
      &defaults.progress.selector
    );
    fill_blank(
      &mut self.selection.select_all_id,
      &defaults.selection.select_all_id
    );
    fill_blank(
      &mut self.selection.row_selector,
      &defaults.selection.row_selector
    );
    fill_blank(
      &mut self.selection.delete_selected_id,
      &defaults.selection.delete_selected_id
    );
    fill_blank(
      &mut self.selection.count_id,
      &defaults.selection.count_id
    );

    fill_zero(
      &mut self.clock.tick_ms,
      defaults.clock.tick_ms
    );
    fill_zero(
      &mut self.alerts.visible_ms,
      defaults.alerts.visible_ms
    );
    fill_zero(
      &mut self.alerts.fade_ms,
      defaults.alerts.fade_ms
    );
    fill_zero(
      &mut self.progress.delay_ms,
      defaults.progress.delay_ms
    );
  }
}

fn fill_blank(
  value: &mut String,
  fallback: &str
) {
  if value.trim().is_empty() {
    *value = fallback.to_string();
  }
}

fn fill_zero(value: &mut u32, fallback: u32) {
  if *value == 0 {
    *value = fallback;
  }
}
