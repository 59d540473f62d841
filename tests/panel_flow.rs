use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use pharma_dash::api::SettingsEndpoint;
use pharma_dash::gui::confirm::ConfirmResult;
use pharma_dash::gui::settings_panel::SettingsPanel;
use pharma_dash::settings::Settings;
use pharma_dash::store::{SettingsStore, StoreEvent, StoreState};

#[derive(Default)]
struct CountingEndpoint {
    load_calls: AtomicUsize,
    save_calls: AtomicUsize,
    reset_calls: AtomicUsize,
}

impl SettingsEndpoint for CountingEndpoint {
    fn load(&self) -> Result<Settings> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Settings::default())
    }

    fn save(&self, _settings: &Settings) -> Result<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn reset(&self) -> Result<Settings> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Settings::default())
    }
}

fn wait_for_event(store: &mut SettingsStore) -> StoreEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = store.poll().pop() {
            return event;
        }
        assert!(Instant::now() < deadline, "timed out waiting for the store");
        thread::sleep(Duration::from_millis(5));
    }
}

fn edited_snapshot() -> Settings {
    Settings {
        ma_months: 4,
        threshold_low: 2,
        threshold_high: 5,
        runway_threshold: 1.5,
    }
}

#[test]
fn sync_draft_seeds_the_controls_and_collect_reads_them_back() {
    let mut panel = SettingsPanel::default();
    panel.sync_draft(edited_snapshot());

    assert_eq!(panel.runway_slider.low(), 2);
    assert_eq!(panel.runway_slider.high(), 5);
    assert!((panel.highlight_slider.value() - 1.5).abs() < 1e-6);

    // nothing touched: collect reproduces the snapshot exactly
    assert_eq!(panel.collect(), edited_snapshot());
}

#[test]
fn collect_is_sourced_from_the_live_controls() {
    let mut panel = SettingsPanel::default();
    panel.sync_draft(edited_snapshot());

    panel.runway_slider.drag_low_to(4.0);
    panel.runway_slider.drag_high_to(7.0);
    panel.highlight_slider.drag_to_percent(1.0);

    let collected = panel.collect();
    assert_eq!(collected.threshold_low, 4);
    assert_eq!(collected.threshold_high, 7);
    assert!((collected.runway_threshold - 6.0).abs() < 1e-6);
    // the field the sliders do not own is untouched
    assert_eq!(collected.ma_months, 4);
}

#[test]
fn cancelled_confirmation_leaves_the_store_untouched() {
    let endpoint = Arc::new(CountingEndpoint::default());
    let mut store = SettingsStore::new(endpoint.clone());
    let before = store.snapshot();

    let mut panel = SettingsPanel::default();
    panel.apply_confirm(ConfirmResult::Cancelled, &mut store);
    panel.apply_confirm(ConfirmResult::None, &mut store);

    assert_eq!(endpoint.reset_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.state(), StoreState::Idle);
}

#[test]
fn confirmed_reset_reaches_the_endpoint() {
    let endpoint = Arc::new(CountingEndpoint::default());
    let mut store = SettingsStore::new(endpoint.clone());

    let mut panel = SettingsPanel::default();
    panel.apply_confirm(ConfirmResult::Confirmed, &mut store);

    match wait_for_event(&mut store) {
        StoreEvent::ResetDone(defaults) => assert_eq!(defaults, Settings::default()),
        other => panic!("expected ResetDone, got {other:?}"),
    }
    assert_eq!(endpoint.reset_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn opening_the_panel_requests_a_fresh_snapshot() {
    let endpoint = Arc::new(CountingEndpoint::default());
    let mut store = SettingsStore::new(endpoint.clone());

    let mut panel = SettingsPanel::default();
    panel.open(&mut store);
    assert!(panel.is_open());
    assert_eq!(store.state(), StoreState::Loading);

    match wait_for_event(&mut store) {
        StoreEvent::Loaded(snapshot) => panel.sync_draft(snapshot),
        other => panic!("expected Loaded, got {other:?}"),
    }
    assert_eq!(endpoint.load_calls.load(Ordering::SeqCst), 1);
    assert_eq!(panel.collect(), Settings::default());

    // closing discards the draft with no further endpoint traffic
    panel.close();
    assert!(!panel.is_open());
    assert_eq!(endpoint.save_calls.load(Ordering::SeqCst), 0);
}
