use serde::{Deserialize, Serialize};

/// Runway thresholds are whole months inside this band.
pub const RUNWAY_MIN: u32 = 1;
pub const RUNWAY_MAX: u32 = 7;

/// Highlight threshold domain, quantized to half months.
pub const HIGHLIGHT_MIN: f32 = 0.5;
pub const HIGHLIGHT_MAX: f32 = 6.0;
pub const HIGHLIGHT_STEP: f32 = 0.5;

/// Moving-average windows the report generator is run with.
pub const MA_MONTH_CHOICES: &[u32] = &[1, 2, 3, 4, 6, 12];

/// Report parameters persisted by the inventory service.
///
/// Field names match the service wire format; missing fields fall back to
/// the service defaults so partial payloads stay loadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Moving-average window in months.
    #[serde(default = "default_ma_months")]
    pub ma_months: u32,
    /// Runway below this many months counts as shortage.
    #[serde(default = "default_threshold_low")]
    pub threshold_low: u32,
    /// Runway above this many months counts as excess.
    #[serde(default = "default_threshold_high")]
    pub threshold_high: u32,
    /// Reports emphasize drugs whose runway falls under this value.
    #[serde(default = "default_runway_threshold")]
    pub runway_threshold: f32,
}

fn default_ma_months() -> u32 {
    3
}

fn default_threshold_low() -> u32 {
    1
}

fn default_threshold_high() -> u32 {
    3
}

fn default_runway_threshold() -> f32 {
    1.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ma_months: default_ma_months(),
            threshold_low: default_threshold_low(),
            threshold_high: default_threshold_high(),
            runway_threshold: default_runway_threshold(),
        }
    }
}

impl Settings {
    /// Client-side mirror of the checks the service applies before
    /// persisting. A draft failing here is refused without a round trip.
    pub fn validate(&self) -> Result<(), String> {
        if !MA_MONTH_CHOICES.contains(&self.ma_months) {
            return Err(format!(
                "moving-average window must be one of {MA_MONTH_CHOICES:?} months"
            ));
        }
        if !(RUNWAY_MIN <= self.threshold_low
            && self.threshold_low < self.threshold_high
            && self.threshold_high <= RUNWAY_MAX)
        {
            return Err(format!(
                "runway thresholds must satisfy {RUNWAY_MIN} <= low < high <= {RUNWAY_MAX}"
            ));
        }
        if !(HIGHLIGHT_MIN..=HIGHLIGHT_MAX).contains(&self.runway_threshold) {
            return Err(format!(
                "highlight threshold must be between {HIGHLIGHT_MIN} and {HIGHLIGHT_MAX}"
            ));
        }
        let steps = (self.runway_threshold - HIGHLIGHT_MIN) / HIGHLIGHT_STEP;
        if (steps - steps.round()).abs() > 1e-4 {
            return Err(format!(
                "highlight threshold must be a multiple of {HIGHLIGHT_STEP}"
            ));
        }
        Ok(())
    }
}
