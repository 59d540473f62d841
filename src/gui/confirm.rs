use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    None,
    Confirmed,
    Cancelled,
}

/// Modal yes/no prompt for destructive operations. Closing the window
/// counts as cancel.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    open: bool,
    title: String,
    message: String,
    warning: String,
    confirm_label: String,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            open: false,
            title: "Confirm".into(),
            message: String::new(),
            warning: "This action cannot be undone.".into(),
            confirm_label: "Confirm".into(),
        }
    }
}

impl ConfirmDialog {
    pub fn open_for_reset(&mut self) {
        self.title = "Restore default settings?".into();
        self.message = "All report parameters go back to the service defaults.".into();
        self.warning = "This action cannot be undone.".into();
        self.confirm_label = "Restore defaults".into();
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> ConfirmResult {
        if !self.open {
            return ConfirmResult::None;
        }
        let mut result = ConfirmResult::None;
        let mut open = true;
        egui::Window::new(self.title.clone())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                if !self.message.is_empty() {
                    ui.label(&self.message);
                }
                ui.colored_label(egui::Color32::YELLOW, &self.warning);
                ui.horizontal(|ui| {
                    if ui.button(&self.confirm_label).clicked() {
                        result = ConfirmResult::Confirmed;
                    }
                    if ui.button("Cancel").clicked() {
                        result = ConfirmResult::Cancelled;
                    }
                });
            });
        if result != ConfirmResult::None {
            self.open = false;
        }
        if !open {
            self.open = false;
            if result == ConfirmResult::None {
                result = ConfirmResult::Cancelled;
            }
        }
        result
    }
}
