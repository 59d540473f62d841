use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};

use crate::config::AppConfig;
use crate::notify_log;
use crate::store::{SettingsStore, StoreEvent, StoreState};

pub mod confirm;
pub mod drag;
pub mod dual_slider;
pub mod settings_panel;
pub mod single_slider;

use settings_panel::SettingsPanel;

/// Main window: committed settings summary plus the settings panel.
pub struct DashboardApp {
    store: SettingsStore,
    panel: SettingsPanel,
    toasts: Toasts,
    enable_toasts: bool,
    toast_duration: f32,
}

impl DashboardApp {
    pub fn new(mut store: SettingsStore, config: &AppConfig) -> Self {
        // Seed the committed snapshot so the summary shows live data even
        // before the panel is first opened.
        store.begin_load();
        Self {
            store,
            panel: SettingsPanel::default(),
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]),
            enable_toasts: config.enable_toasts,
            toast_duration: config.toast_duration,
        }
    }

    fn notify(&mut self, text: String, kind: ToastKind) {
        notify_log::append(&text);
        if self.enable_toasts {
            self.toasts.add(Toast {
                text: text.into(),
                kind,
                options: ToastOptions::default().duration_in_seconds(self.toast_duration as f64),
            });
        }
    }

    /// Apply finished store operations. Committed-state changes happen in
    /// `poll` whether or not the panel is still open; only the panel
    /// re-sync is conditional on it.
    fn drain_store_events(&mut self) {
        for event in self.store.poll() {
            match event {
                StoreEvent::Loaded(snapshot) => {
                    if self.panel.is_open() {
                        self.panel.sync_draft(snapshot);
                    }
                }
                StoreEvent::LoadFailed(msg) => {
                    if self.panel.is_open() {
                        // degrade to the stale committed snapshot
                        self.panel.sync_draft(self.store.snapshot());
                    }
                    self.notify(format!("Failed to load settings: {msg}"), ToastKind::Error);
                }
                StoreEvent::Saved(_) => {
                    self.panel.close();
                    self.notify("Settings saved".into(), ToastKind::Success);
                }
                StoreEvent::SaveFailed(msg) => {
                    self.panel.set_error(msg.clone());
                    self.notify(format!("Failed to save settings: {msg}"), ToastKind::Error);
                }
                StoreEvent::ResetDone(defaults) => {
                    if self.panel.is_open() {
                        self.panel.sync_draft(defaults);
                    }
                    self.notify("Settings restored to defaults".into(), ToastKind::Success);
                }
                StoreEvent::ResetFailed(msg) => {
                    self.notify(format!("Failed to reset settings: {msg}"), ToastKind::Error);
                }
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_store_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Pharmacy stock reports");
            ui.add_space(6.0);

            let (low, high) = self.store.thresholds();
            ui.label(format!(
                "Moving-average window: {} months",
                self.store.ma_months()
            ));
            ui.label(format!(
                "Runway bands: shortage below {low} months, excess above {high} months"
            ));
            ui.label(format!(
                "Highlighting drugs with runway under {:.1} months",
                self.store.runway_threshold()
            ));

            ui.add_space(6.0);
            match self.store.state() {
                StoreState::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Contacting service…");
                    });
                }
                StoreState::Saving => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Saving…");
                    });
                }
                StoreState::Idle => {
                    ui.label("Showing defaults; service not reached yet.");
                }
                StoreState::Ready => {}
            }

            ui.add_space(10.0);
            if ui.button("Edit settings…").clicked() {
                self.panel.open(&mut self.store);
            }
        });

        self.panel.ui(ctx, &mut self.store);
        self.toasts.show(ctx);

        // Worker results arrive outside the input stream; keep polling
        // while an operation is in flight.
        if self.store.busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
