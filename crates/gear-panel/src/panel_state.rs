use gear_core::{GearError, GearHandle, ParametricGear};
use gear_types::{
    ParameterError, MAX_TOOTH_COUNT, MAX_TOOTH_LENGTH, MIN_TOOTH_COUNT, MIN_TOOTH_LENGTH,
};

use crate::config::PanelConfig;
use crate::messages::ControlValues;

/// Values a [`BoundedControl`] can hold.
pub trait ControlValue: Copy + PartialOrd {
    /// Round `self` to the nearest multiple of `step` counted from `origin`.
    fn snap(self, origin: Self, step: Self) -> Self;
}

impl ControlValue for u32 {
    fn snap(self, origin: Self, step: Self) -> Self {
        if step <= 1 || self < origin {
            return self;
        }
        let offset = self - origin;
        let steps = offset / step + u32::from(offset % step >= step - offset % step);
        origin.saturating_add(steps.saturating_mul(step))
    }
}

impl ControlValue for f64 {
    fn snap(self, origin: Self, step: Self) -> Self {
        if !(step > 0.0) || !self.is_finite() {
            return self;
        }
        let snapped = origin + ((self - origin) / step).round() * step;
        // Keep values already on the grid bit-for-bit.
        if (snapped - self).abs() < step * 1e-6 {
            self
        } else {
            snapped
        }
    }
}

/// A numeric control with fixed bounds and a step, like a slider or spin box.
///
/// Values written to it are snapped to the step and clamped into
/// `[min, max]`, so whatever the control holds is always a legal model
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedControl<T> {
    min: T,
    max: T,
    step: T,
    default: T,
    value: T,
}

impl<T: ControlValue> BoundedControl<T> {
    pub fn new(min: T, max: T, step: T, default: T) -> Self {
        let mut control = Self {
            min,
            max,
            step,
            default,
            value: default,
        };
        control.default = control.clamp(default);
        control.value = control.default;
        control
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn default_value(&self) -> T {
        self.default
    }

    pub fn bounds(&self) -> (T, T) {
        (self.min, self.max)
    }

    pub fn step(&self) -> T {
        self.step
    }

    /// Store `value` snapped to the step and clamped into bounds, and return
    /// what was stored.
    pub fn set(&mut self, value: T) -> T {
        self.value = self.clamp(value.snap(self.min, self.step));
        self.value
    }

    /// Restore the default and return it.
    pub fn reset(&mut self) -> T {
        self.value = self.default;
        self.value
    }

    // Written so an unordered value (NaN) falls through to `min`.
    fn clamp(&self, value: T) -> T {
        if value > self.max {
            self.max
        } else if value >= self.min {
            value
        } else {
            self.min
        }
    }
}

/// Panel state: the gear model plus the two controls that drive it.
pub struct PanelState {
    /// The gear model. Holds the current gear, if any.
    pub gear: ParametricGear,
    /// Tooth count control.
    pub teeth: BoundedControl<u32>,
    /// Tooth length control.
    pub length: BoundedControl<f64>,
    config: PanelConfig,
}

impl PanelState {
    /// A panel with default controls and no gear.
    pub fn new() -> Self {
        Self::with_config(PanelConfig::default())
    }

    pub fn with_config(config: PanelConfig) -> Self {
        Self {
            gear: ParametricGear::new(),
            teeth: BoundedControl::new(
                MIN_TOOTH_COUNT,
                MAX_TOOTH_COUNT,
                config.tooth_count_step,
                config.default_tooth_count,
            ),
            length: BoundedControl::new(
                MIN_TOOTH_LENGTH,
                MAX_TOOTH_LENGTH,
                config.tooth_length_step,
                config.default_tooth_length,
            ),
            config,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Handle of the gear being edited, if one has been created and not yet
    /// committed.
    pub fn current_gear(&self) -> Option<GearHandle> {
        self.gear.handle()
    }

    pub fn controls(&self) -> ControlValues {
        ControlValues {
            tooth_count: self.teeth.value(),
            tooth_length: self.length.value(),
        }
    }

    pub fn reset_controls(&mut self) {
        self.teeth.reset();
        self.length.reset();
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from the panel layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PanelError {
    #[error("gear error: {0}")]
    Gear(#[from] GearError),

    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    #[error("invalid panel config: {reason}")]
    Config { reason: String },
}

impl PanelError {
    pub(crate) fn config(err: ParameterError) -> Self {
        PanelError::Config {
            reason: err.to_string(),
        }
    }
}
