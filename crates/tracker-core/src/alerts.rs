use std::rc::Rc;

use tracing::debug;

use crate::capability::{
  Capability,
  Component
};
use crate::config::AlertConfig;
use crate::surface::{
  Scheduler,
  StyledElement
};

/// Fades every alert present at load and then removes it. Each alert
/// runs on its own timers.
pub struct AlertDismissal<A> {
  alerts: Vec<Rc<A>>
}

impl<A: StyledElement + 'static> AlertDismissal<A> {
  pub fn new(alerts: Vec<A>) -> Self {
    Self {
      alerts: alerts.into_iter().map(Rc::new).collect()
    }
  }

  pub fn schedule<S>(
    &self,
    scheduler: &S,
    config: &AlertConfig
  ) where
    S: Scheduler + Clone + 'static
  {
    let fade_for = config.fade_for();
    for alert in &self.alerts {
      let alert = Rc::clone(alert);
      let inner = scheduler.clone();
      scheduler.after(
        config.visible_for(),
        Box::new(move || {
          alert.set_style("opacity", "0");
          inner.after(
            fade_for,
            Box::new(move || alert.remove())
          );
        })
      );
    }
    debug!(
      count = self.alerts.len(),
      "scheduled alert dismissal"
    );
  }
}

impl<A> Component for AlertDismissal<A> {
  const NAME: &'static str = "alerts";

  fn capability(&self) -> Capability {
    if self.alerts.is_empty() {
      Capability::Dormant {
        missing: vec!["alerts"]
      }
    } else {
      Capability::Active
    }
  }
}
