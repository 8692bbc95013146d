use std::time::Duration;

use chrono::NaiveDate;
use tracker_core::alerts::AlertDismissal;
use tracker_core::clock::ClockDisplay;
use tracker_core::config::{
  PageConfig,
  ThemeConfig
};
use tracker_core::memory::{
  ManualScheduler,
  MemoryButton,
  MemoryCheckbox,
  MemoryElement,
  MemoryNavigator,
  MemoryRoot,
  MemorySlot,
  MemoryStore,
  RecordingNotifier,
  ScriptedDialog
};
use tracker_core::progress::ProgressAnimator;
use tracker_core::selection::{
  BulkSelection,
  confirm_delete_all
};
use tracker_core::sort::{
  SortHeader,
  SortNavigator
};
use tracker_core::surface::{
  ActionButton,
  Checkbox,
  KeyValueStore,
  StyledElement,
  ThemeRoot
};
use tracker_core::theme::ThemeController;
use tracker_core::{
  BootReport,
  Capability,
  Component,
  Theme
};

fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter("tracker_core=debug")
    .with_test_writer()
    .try_init();
}

type TestTheme = ThemeController<
  MemoryRoot,
  MemorySlot,
  MemoryStore,
  RecordingNotifier
>;

fn theme_controller(
  root: &MemoryRoot,
  toggle: Option<&MemorySlot>,
  store: &MemoryStore,
  notifier: &RecordingNotifier
) -> TestTheme {
  ThemeController::new(
    root.clone(),
    toggle.cloned(),
    store.clone(),
    notifier.clone(),
    &ThemeConfig::default()
  )
}

#[test]
fn set_theme_applies_attribute_and_glyph() {
  init_tracing();
  for theme in [Theme::Light, Theme::Dark] {
    let root = MemoryRoot::default();
    let toggle = MemorySlot::default();
    let controller = theme_controller(
      &root,
      Some(&toggle),
      &MemoryStore::default(),
      &RecordingNotifier::default()
    );

    controller.set_theme(theme);
    let once = (root.attribute(), toggle.text());
    controller.set_theme(theme);

    assert_eq!(
      root.attribute().as_deref(),
      Some(theme.as_str())
    );
    assert_eq!(
      toggle.text().as_deref(),
      Some(theme.glyph())
    );
    assert_eq!(
      (root.attribute(), toggle.text()),
      once
    );
  }
}

#[test]
fn toggle_flips_persists_and_notifies() {
  init_tracing();
  for start in [Theme::Light, Theme::Dark] {
    let root = MemoryRoot::rendered(start.as_str());
    let store = MemoryStore::default();
    let notifier = RecordingNotifier::default();
    let toggle = MemorySlot::default();
    let controller = theme_controller(
      &root,
      Some(&toggle),
      &store,
      &notifier
    );

    let next = controller.toggle();

    assert_eq!(next, start.toggled());
    assert_eq!(
      root.attribute().as_deref(),
      Some(next.as_str())
    );
    assert_eq!(
      store.get("theme").as_deref(),
      Some(next.as_str())
    );
    assert_eq!(notifier.submitted(), vec![next]);
  }
}

#[test]
fn initialize_reconciles_store_with_rendered_theme() {
  init_tracing();
  let root = MemoryRoot::rendered("dark");
  let store =
    MemoryStore::with_entry("theme", "light");
  let notifier = RecordingNotifier::default();
  let controller =
    theme_controller(&root, None, &store, &notifier);

  assert_eq!(controller.initialize(), Theme::Dark);
  assert_eq!(store.get("theme").as_deref(), Some("dark"));
  assert!(notifier.submitted().is_empty());
  assert_eq!(
    controller.capability(),
    Capability::Dormant {
      missing: vec!["theme toggle"]
    }
  );
}

#[test]
fn initialize_falls_back_to_stored_then_default() {
  init_tracing();
  let root = MemoryRoot::default();
  let store =
    MemoryStore::with_entry("theme", "dark");
  let controller = theme_controller(
    &root,
    None,
    &store,
    &RecordingNotifier::default()
  );
  assert_eq!(controller.initialize(), Theme::Dark);
  assert_eq!(root.attribute().as_deref(), Some("dark"));

  let root = MemoryRoot::default();
  let store = MemoryStore::default();
  let controller = theme_controller(
    &root,
    None,
    &store,
    &RecordingNotifier::default()
  );
  assert_eq!(controller.initialize(), Theme::Light);
  assert_eq!(store.get("theme").as_deref(), Some("light"));
}

#[test]
fn configured_default_theme_is_the_last_resort() {
  init_tracing();
  let config = PageConfig::from_toml(
    "[theme]\ndefault = \"dark\"\n"
  )
  .expect("valid config");
  let root = MemoryRoot::default();
  let controller = ThemeController::new(
    root.clone(),
    None::<MemorySlot>,
    MemoryStore::default(),
    RecordingNotifier::default(),
    &config.theme
  );

  assert_eq!(controller.initialize(), Theme::Dark);
}

#[test]
fn storage_failure_does_not_block_toggle() {
  init_tracing();
  let root = MemoryRoot::rendered("light");
  let notifier = RecordingNotifier::default();
  let controller = theme_controller(
    &root,
    None,
    &MemoryStore::readonly(),
    &notifier
  );

  assert_eq!(controller.toggle(), Theme::Dark);
  assert_eq!(root.attribute().as_deref(), Some("dark"));
  assert_eq!(notifier.submitted(), vec![Theme::Dark]);
}

#[test]
fn toggle_treats_foreign_attribute_as_dark() {
  init_tracing();
  let root = MemoryRoot::default();
  let controller = theme_controller(
    &root,
    None,
    &MemoryStore::default(),
    &RecordingNotifier::default()
  );

  root.set_attribute("sepia");
  assert_eq!(controller.toggle(), Theme::Light);
  assert_eq!(root.attribute().as_deref(), Some("light"));

  root.set_attribute("");
  assert_eq!(controller.toggle(), Theme::Dark);
}

#[test]
fn clock_writes_padded_date_and_time() {
  let date = MemorySlot::default();
  let time = MemorySlot::default();
  let clock =
    ClockDisplay::new(Some(date.clone()), Some(time.clone()));
  let now = NaiveDate::from_ymd_opt(2024, 3, 5)
    .expect("valid date")
    .and_hms_opt(9, 4, 7)
    .expect("valid time");

  clock.render(&now);

  assert_eq!(date.text().as_deref(), Some("2024.03.05"));
  assert_eq!(time.text().as_deref(), Some("09:04:07"));
}

#[test]
fn clock_skips_missing_slots() {
  let time = MemorySlot::default();
  let clock = ClockDisplay::new(
    None::<MemorySlot>,
    Some(time.clone())
  );
  let now = NaiveDate::from_ymd_opt(2024, 3, 5)
    .expect("valid date")
    .and_hms_opt(18, 0, 0)
    .expect("valid time");

  clock.render(&now);

  assert_eq!(time.text().as_deref(), Some("18:00:00"));
  assert!(clock.capability().is_active());
  assert!(
    !ClockDisplay::<MemorySlot, MemorySlot>::new(None, None)
      .capability()
      .is_active()
  );
}

#[test]
fn sort_header_alternates_order() {
  init_tracing();
  let navigator =
    MemoryNavigator::at("http://localhost/?search=rust");
  let sort = SortNavigator::new(navigator.clone(), 1);

  sort
    .activate(&SortHeader {
      key:       "progress".to_string(),
      ascending: false
    })
    .expect("navigate");
  sort
    .activate(&SortHeader {
      key:       "progress".to_string(),
      ascending: true
    })
    .expect("navigate");

  assert_eq!(
    navigator.visited(),
    vec![
      "http://localhost/?search=rust&sort=progress&order=asc"
        .to_string(),
      "http://localhost/?search=rust&sort=progress&order=desc"
        .to_string(),
    ]
  );
}

#[test]
fn select_all_drives_delete_selected() {
  init_tracing();
  let select_all = MemoryCheckbox::new("all");
  let rows = vec![
    MemoryCheckbox::new("1"),
    MemoryCheckbox::new("2"),
    MemoryCheckbox::new("3"),
  ];
  let button = MemoryButton::default();
  let count = MemorySlot::default();
  let selection = BulkSelection::new(
    Some(select_all.clone()),
    rows.clone(),
    Some(button.clone()),
    Some(count.clone())
  );

  selection.refresh();
  assert!(button.is_disabled());
  assert_eq!(count.text().as_deref(), Some("0"));

  select_all.set_checked(true);
  selection.select_all_changed();
  assert!(rows.iter().all(Checkbox::is_checked));
  assert!(!button.is_disabled());
  assert_eq!(selection.selected_ids(), vec!["1", "2", "3"]);

  rows[0].set_checked(false);
  selection.row_changed();
  assert!(!button.is_disabled());
  assert!(select_all.is_checked());

  rows[1].set_checked(false);
  selection.row_changed();
  assert!(!button.is_disabled());
  assert_eq!(selection.selected_ids(), vec!["3"]);

  rows[2].set_checked(false);
  selection.row_changed();
  assert!(button.is_disabled());
  assert_eq!(count.text().as_deref(), Some("0"));
}

#[test]
fn initial_refresh_reflects_prechecked_rows() {
  let button = MemoryButton::default();
  button.set_disabled(true);
  let selection = BulkSelection::new(
    None,
    vec![
      MemoryCheckbox::new("4"),
      MemoryCheckbox::checked("5"),
    ],
    Some(button.clone()),
    None::<MemorySlot>
  );

  selection.refresh();

  assert!(!button.is_disabled());
  assert_eq!(selection.selected_count(), 1);
}

#[test]
fn confirmation_wording_follows_search() {
  init_tracing();
  let dialog = ScriptedDialog::answering(true);
  assert!(confirm_delete_all(
    &dialog,
    &MemoryNavigator::at("http://localhost/delete?search=foo")
  ));

  let declined = ScriptedDialog::answering(false);
  assert!(!confirm_delete_all(
    &declined,
    &MemoryNavigator::at("http://localhost/delete")
  ));

  let filtered = &dialog.shown()[0];
  let unfiltered = &declined.shown()[0];
  assert!(filtered.contains("ALL FILTERED items"));
  assert!(unfiltered.contains("ALL items"));
  assert!(!unfiltered.contains("FILTERED"));
}

#[test]
fn alerts_fade_then_leave() {
  init_tracing();
  let config = PageConfig::default();
  let scheduler = ManualScheduler::default();
  let first = MemoryElement::default();
  let second = MemoryElement::default();
  let alerts = AlertDismissal::new(vec![
    first.clone(),
    second.clone(),
  ]);

  alerts.schedule(&scheduler, &config.alerts);

  scheduler.advance(Duration::from_millis(4_999));
  assert_eq!(first.style("opacity"), None);

  scheduler.advance(Duration::from_millis(1));
  for alert in [&first, &second] {
    assert_eq!(alert.style("opacity").as_deref(), Some("0"));
    assert!(!alert.is_removed());
  }

  scheduler.advance(Duration::from_millis(300));
  assert!(first.is_removed());
  assert!(second.is_removed());
  assert_eq!(scheduler.pending(), 0);
}

#[test]
fn progress_bars_refill_after_delay() {
  let config = PageConfig::default();
  let scheduler = ManualScheduler::default();
  let bar = MemoryElement::with_style("width", "65%");
  let unsized_bar = MemoryElement::default();
  let progress = ProgressAnimator::new(vec![
    bar.clone(),
    unsized_bar.clone(),
  ]);

  progress.animate(&scheduler, &config.progress);
  assert_eq!(bar.style("width").as_deref(), Some("0%"));

  scheduler.advance(Duration::from_millis(100));
  assert_eq!(bar.style("width").as_deref(), Some("65%"));
  assert_eq!(unsized_bar.style("width").as_deref(), Some(""));
}

#[test]
fn boot_report_marks_absent_components() {
  let mut report = BootReport::new();
  report.record(&AlertDismissal::<MemoryElement>::new(vec![]));
  report.record(&ProgressAnimator::new(vec![
    MemoryElement::default(),
  ]));
  report.record(&BulkSelection::<
    MemoryCheckbox,
    MemoryButton,
    MemorySlot
  >::new(None, vec![], None, None));

  assert_eq!(report.active_count(), 1);
  assert_eq!(
    report.entries()[2].1,
    Capability::Dormant {
      missing: vec![
        "select-all checkbox",
        "row checkboxes",
        "delete-selected button",
      ]
    }
  );
}
