pub mod alerts;
pub mod capability;
pub mod clock;
pub mod config;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod progress;
pub mod selection;
pub mod sort;
pub mod surface;
pub mod theme;

pub use capability::{
  BootReport,
  Capability,
  Component
};
pub use config::PageConfig;
pub use theme::Theme;
