use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "pharma_dash.json";

/// Local client configuration, separate from the report settings the
/// service owns. Missing fields fall back to defaults so old config files
/// keep loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the inventory service.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Enable toast notifications in the UI.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_api_base() -> String {
    std::env::var("PHARMA_DASH_API").unwrap_or_else(|_| "http://127.0.0.1:5000".into())
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            enable_toasts: true,
            toast_duration: default_toast_duration(),
            debug_logging: false,
        }
    }
}

impl AppConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
