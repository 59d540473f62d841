use eframe::egui;

use super::confirm::{ConfirmDialog, ConfirmResult};
use super::dual_slider::DualHandleSlider;
use super::single_slider::SingleHandleSlider;
use crate::settings::{Settings, MA_MONTH_CHOICES};
use crate::store::{SettingsStore, StoreState};

/// The report-settings window.
///
/// Edits are staged in a draft seeded from the committed snapshot when the
/// panel opens. Closing without saving discards the draft; the committed
/// snapshot other readers see only changes once the store confirms a save.
pub struct SettingsPanel {
    open: bool,
    awaiting_snapshot: bool,
    draft: Settings,
    pub runway_slider: DualHandleSlider,
    pub highlight_slider: SingleHandleSlider,
    confirm: ConfirmDialog,
    last_error: Option<String>,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        let draft = Settings::default();
        Self {
            open: false,
            awaiting_snapshot: false,
            runway_slider: DualHandleSlider::new(draft.threshold_low, draft.threshold_high),
            highlight_slider: SingleHandleSlider::new(draft.runway_threshold),
            confirm: ConfirmDialog::default(),
            last_error: None,
            draft,
        }
    }
}

impl SettingsPanel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the panel and request a fresh snapshot. Controls stay hidden
    /// until the load finishes; if the store is already busy the current
    /// committed snapshot is staged instead.
    pub fn open(&mut self, store: &mut SettingsStore) {
        self.open = true;
        self.last_error = None;
        self.awaiting_snapshot = true;
        if !store.begin_load() {
            self.sync_draft(store.snapshot());
        }
    }

    /// Discard the draft. No store interaction.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Stage a snapshot as the new draft and re-seed every control from it.
    pub fn sync_draft(&mut self, snapshot: Settings) {
        self.runway_slider
            .set_range(snapshot.threshold_low, snapshot.threshold_high);
        self.highlight_slider.set_value(snapshot.runway_threshold);
        self.draft = snapshot;
        self.awaiting_snapshot = false;
    }

    pub fn set_error(&mut self, msg: String) {
        self.last_error = Some(msg);
    }

    /// The authoritative read-back of control state into the draft, run
    /// immediately before a save. Live slider callbacks keep the draft
    /// current during editing, but what gets sent is what this returns.
    pub fn collect(&mut self) -> Settings {
        self.draft.threshold_low = self.runway_slider.low();
        self.draft.threshold_high = self.runway_slider.high();
        self.draft.runway_threshold = self.highlight_slider.value();
        self.draft.clone()
    }

    /// Route a confirmation outcome: only an explicit confirm reaches the
    /// store; cancel and still-open leave it untouched.
    pub fn apply_confirm(&mut self, result: ConfirmResult, store: &mut SettingsStore) {
        if result == ConfirmResult::Confirmed && !store.begin_reset() {
            tracing::debug!("reset confirmation ignored, store is busy");
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context, store: &mut SettingsStore) {
        if !self.open {
            return;
        }
        let mut keep_open = true;
        egui::Window::new("Report settings")
            .open(&mut keep_open)
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .show(ctx, |ui| {
                if let Some(err) = &self.last_error {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.separator();
                }
                if self.awaiting_snapshot {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading settings…");
                    });
                    return;
                }

                ui.label("Moving-average window");
                egui::ComboBox::from_id_source("ma_window")
                    .selected_text(format!("{} months", self.draft.ma_months))
                    .show_ui(ui, |ui| {
                        for &months in MA_MONTH_CHOICES {
                            ui.selectable_value(
                                &mut self.draft.ma_months,
                                months,
                                format!("{months} months"),
                            );
                        }
                    });

                ui.separator();
                ui.label("Runway bands (months of stock)");
                if self.runway_slider.show(ui) {
                    self.draft.threshold_low = self.runway_slider.low();
                    self.draft.threshold_high = self.runway_slider.high();
                }
                ui.label(format!(
                    "Shortage below {}, excess above {}",
                    self.runway_slider.low(),
                    self.runway_slider.high()
                ));

                ui.separator();
                ui.label("Highlight runway under");
                if self.highlight_slider.show(ui) {
                    self.draft.runway_threshold = self.highlight_slider.value();
                }
                ui.label(format!("{:.1} months", self.highlight_slider.value()));

                ui.separator();
                let saving = store.state() == StoreState::Saving;
                let dirty = self.draft != store.snapshot();
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!saving, egui::Button::new("Reset to defaults"))
                        .clicked()
                    {
                        self.confirm.open_for_reset();
                    }
                    if ui.button("Cancel").clicked() {
                        self.open = false;
                    }
                    if ui
                        .add_enabled(dirty && !saving, egui::Button::new("Save"))
                        .clicked()
                    {
                        let draft = self.collect();
                        match draft.validate() {
                            Ok(()) => {
                                self.last_error = None;
                                if !store.begin_save(draft) {
                                    tracing::debug!(
                                        "save click ignored, operation already in flight"
                                    );
                                }
                            }
                            Err(msg) => self.last_error = Some(msg),
                        }
                    }
                    if saving {
                        ui.spinner();
                    }
                });
            });

        let confirmed = self.confirm.ui(ctx);
        self.apply_confirm(confirmed, store);
        self.open = self.open && keep_open;
    }
}
