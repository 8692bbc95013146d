use std::rc::Rc;

use tracing::debug;

use crate::capability::{
  Capability,
  Component
};
use crate::config::ProgressConfig;
use crate::surface::{
  Scheduler,
  StyledElement
};

pub const EMPTY_WIDTH: &str = "0%";

/// Replays the fill of each progress bar once.
pub struct ProgressAnimator<B> {
  bars: Vec<Rc<B>>
}

impl<B: StyledElement + 'static> ProgressAnimator<B> {
  pub fn new(bars: Vec<B>) -> Self {
    Self {
      bars: bars.into_iter().map(Rc::new).collect()
    }
  }

  /// Empties every bar now and restores its captured width after the
  /// configured delay.
  pub fn animate<S: Scheduler>(
    &self,
    scheduler: &S,
    config: &ProgressConfig
  ) {
    for bar in &self.bars {
      let target =
        bar.style("width").unwrap_or_default();
      bar.set_style("width", EMPTY_WIDTH);

      let bar = Rc::clone(bar);
      scheduler.after(
        config.delay(),
        Box::new(move || {
          bar.set_style("width", &target);
        })
      );
    }
    debug!(
      count = self.bars.len(),
      "animating progress bars"
    );
  }
}

impl<B> Component for ProgressAnimator<B> {
  const NAME: &'static str = "progress";

  fn capability(&self) -> Capability {
    if self.bars.is_empty() {
      Capability::Dormant {
        missing: vec!["progress bars"]
      }
    } else {
      Capability::Active
    }
  }
}
