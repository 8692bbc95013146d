use chrono::{
  Datelike,
  NaiveDateTime,
  Timelike
};

use crate::capability::{
  Capability,
  Component
};
use crate::surface::TextSlot;

/// `YYYY.MM.DD`
pub fn format_date(now: &NaiveDateTime) -> String {
  format!(
    "{:04}.{:02}.{:02}",
    now.year(),
    now.month(),
    now.day()
  )
}

/// 24-hour `HH:MM:SS`
pub fn format_time(now: &NaiveDateTime) -> String {
  format!(
    "{:02}:{:02}:{:02}",
    now.hour(),
    now.minute(),
    now.second()
  )
}

/// Writes the date and time into whichever slots the page has.
pub struct ClockDisplay<D, T> {
  date: Option<D>,
  time: Option<T>
}

impl<D: TextSlot, T: TextSlot> ClockDisplay<D, T> {
  pub fn new(
    date: Option<D>,
    time: Option<T>
  ) -> Self {
    Self { date, time }
  }

  pub fn render(&self, now: &NaiveDateTime) {
    if let Some(slot) = &self.date {
      slot.set_text(&format_date(now));
    }
    if let Some(slot) = &self.time {
      slot.set_text(&format_time(now));
    }
  }
}

impl<D, T> Component for ClockDisplay<D, T> {
  const NAME: &'static str = "clock";

  /// Either slot alone is enough to keep ticking.
  fn capability(&self) -> Capability {
    if self.date.is_some() || self.time.is_some() {
      Capability::Active
    } else {
      Capability::Dormant {
        missing: vec!["date slot", "time slot"]
      }
    }
  }
}
