use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::settings::Settings;

/// Remote settings store. `save` is atomic on the service side; `reset`
/// returns the authoritative defaults rather than assuming the client
/// knows them.
pub trait SettingsEndpoint: Send + Sync {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
    fn reset(&self) -> Result<Settings>;
}

/// Response wrapper used by every settings route of the service.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    settings: Option<Settings>,
    #[serde(default)]
    message: Option<String>,
}

impl Envelope {
    fn failure_message(self) -> String {
        self.message
            .unwrap_or_else(|| "settings request rejected by the service".into())
    }
}

fn parse_envelope(body: &str) -> Result<Envelope> {
    serde_json::from_str(body).context("malformed settings response")
}

/// HTTP client for the inventory service's settings routes.
pub struct HttpSettingsEndpoint {
    client: Client,
    base: String,
}

impl HttpSettingsEndpoint {
    pub fn new(base: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("pharma-dash settings client")
            .build()?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// The service answers errors with the same JSON envelope plus a non-2xx
    /// status, so the body is parsed first and the status is only the
    /// fallback when there is no envelope to read.
    fn envelope_from(resp: reqwest::blocking::Response) -> Result<Envelope> {
        let status = resp.status();
        let body = resp.text()?;
        match parse_envelope(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => {
                Err(anyhow!("settings request failed with status {status}"))
            }
            Err(err) => Err(err),
        }
    }
}

impl SettingsEndpoint for HttpSettingsEndpoint {
    fn load(&self) -> Result<Settings> {
        let resp = self
            .client
            .get(format!("{}/api/settings", self.base))
            .send()?;
        let envelope = Self::envelope_from(resp)?;
        if !envelope.success {
            return Err(anyhow!(envelope.failure_message()));
        }
        envelope
            .settings
            .ok_or_else(|| anyhow!("settings payload missing from response"))
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let body = serde_json::to_string(settings)?;
        let resp = self
            .client
            .post(format!("{}/api/settings", self.base))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        let envelope = Self::envelope_from(resp)?;
        if !envelope.success {
            return Err(anyhow!(envelope.failure_message()));
        }
        Ok(())
    }

    fn reset(&self) -> Result<Settings> {
        let resp = self
            .client
            .post(format!("{}/api/settings/reset", self.base))
            .send()?;
        let envelope = Self::envelope_from(resp)?;
        if !envelope.success {
            return Err(anyhow!(envelope.failure_message()));
        }
        envelope
            .settings
            .ok_or_else(|| anyhow!("reset response did not include the new defaults"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_envelope_parses_settings() {
        let body = r#"{
            "success": true,
            "settings": {
                "ma_months": 6,
                "threshold_low": 2,
                "threshold_high": 5,
                "runway_threshold": 1.5
            }
        }"#;
        let envelope = parse_envelope(body).unwrap();
        assert!(envelope.success);
        let settings = envelope.settings.unwrap();
        assert_eq!(settings.ma_months, 6);
        assert_eq!(settings.threshold_low, 2);
        assert_eq!(settings.threshold_high, 5);
        assert!((settings.runway_threshold - 1.5).abs() < 1e-6);
    }

    #[test]
    fn failure_envelope_carries_server_message() {
        let body = r#"{"success": false, "message": "invalid runway thresholds"}"#;
        let envelope = parse_envelope(body).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.failure_message(), "invalid runway thresholds");
    }

    #[test]
    fn partial_settings_payload_fills_defaults() {
        let body = r#"{"success": true, "settings": {"ma_months": 2}}"#;
        let envelope = parse_envelope(body).unwrap();
        let settings = envelope.settings.unwrap();
        assert_eq!(settings.ma_months, 2);
        assert_eq!(settings.threshold_low, 1);
        assert_eq!(settings.threshold_high, 3);
    }

    #[test]
    fn garbage_body_is_an_error() {
        assert!(parse_envelope("<html>502</html>").is_err());
    }
}
