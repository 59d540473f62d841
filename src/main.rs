use std::sync::Arc;

use eframe::egui;

use pharma_dash::api::HttpSettingsEndpoint;
use pharma_dash::config::{AppConfig, CONFIG_FILE};
use pharma_dash::gui::DashboardApp;
use pharma_dash::logging;
use pharma_dash::store::SettingsStore;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(CONFIG_FILE)?;
    logging::init(config.debug_logging);
    tracing::info!("using inventory service at {}", config.api_base);

    let endpoint = HttpSettingsEndpoint::new(&config.api_base)?;
    let store = SettingsStore::new(Arc::new(endpoint));
    let app = DashboardApp::new(store, &config);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 400.0])
            .with_min_inner_size([400.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pharma Dash",
        native_options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("failed to start UI: {err}"))
}
