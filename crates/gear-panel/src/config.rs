use serde::{Deserialize, Serialize};

use gear_types::{check_tooth_count, check_tooth_length};

use crate::panel_state::PanelError;

/// Defaults and step sizes for the panel's two controls.
///
/// The bounds themselves are fixed by the gear model; only the values a
/// fresh or reset control shows are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub default_tooth_count: u32,
    pub default_tooth_length: f64,
    pub tooth_count_step: u32,
    pub tooth_length_step: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            default_tooth_count: 10,
            default_tooth_length: 0.3,
            tooth_count_step: 1,
            tooth_length_step: 0.01,
        }
    }
}

impl PanelConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PanelError> {
        let config: Self = serde_json::from_str(json).map_err(|e| PanelError::Serialization {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults must lie inside the model's bounds and steps must be positive.
    pub fn validate(&self) -> Result<(), PanelError> {
        check_tooth_count(self.default_tooth_count).map_err(PanelError::config)?;
        check_tooth_length(self.default_tooth_length).map_err(PanelError::config)?;
        if self.tooth_count_step == 0 {
            return Err(PanelError::Config {
                reason: "tooth count step must be at least 1".to_string(),
            });
        }
        if !(self.tooth_length_step > 0.0 && self.tooth_length_step.is_finite()) {
            return Err(PanelError::Config {
                reason: format!("tooth length step {} must be positive", self.tooth_length_step),
            });
        }
        Ok(())
    }
}
