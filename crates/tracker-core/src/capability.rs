use std::fmt;

use tracing::{
  debug,
  info
};

/// Whether a component found the elements it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
  Active,
  Dormant { missing: Vec<&'static str> }
}

impl Capability {
  /// Active when nothing is missing.
  pub fn from_missing(
    missing: Vec<&'static str>
  ) -> Self {
    if missing.is_empty() {
      Self::Active
    } else {
      Self::Dormant { missing }
    }
  }

  pub fn is_active(&self) -> bool {
    matches!(self, Self::Active)
  }
}

impl fmt::Display for Capability {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | Self::Active => f.write_str("active"),
      | Self::Dormant { missing } => {
        write!(
          f,
          "dormant (missing {})",
          missing.join(", ")
        )
      }
    }
  }
}

pub trait Component {
  const NAME: &'static str;

  fn capability(&self) -> Capability;
}

/// Capabilities collected while a page boots.
#[derive(Debug, Default, Clone)]
pub struct BootReport {
  entries: Vec<(&'static str, Capability)>
}

impl BootReport {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record<C: Component>(
    &mut self,
    component: &C
  ) -> Capability {
    let capability = component.capability();
    debug!(
      component = C::NAME,
      %capability,
      "component wired"
    );
    self
      .entries
      .push((C::NAME, capability.clone()));
    capability
  }

  pub fn entries(
    &self
  ) -> &[(&'static str, Capability)] {
    &self.entries
  }

  pub fn active_count(&self) -> usize {
    self
      .entries
      .iter()
      .filter(|(_, capability)| {
        capability.is_active()
      })
      .count()
  }

  pub fn log_summary(&self) {
    info!(
      components = self.entries.len(),
      active = self.active_count(),
      "page behaviors initialized"
    );
  }
}
