use std::fmt;

use serde::{Deserialize, Serialize};

/// Fewest teeth a gear may have.
pub const MIN_TOOTH_COUNT: u32 = 5;
/// Most teeth a gear may have.
pub const MAX_TOOTH_COUNT: u32 = 30;
/// Shortest tooth, in scene units along the face normal.
pub const MIN_TOOTH_LENGTH: f64 = 0.05;
/// Longest tooth, in scene units along the face normal.
pub const MAX_TOOTH_LENGTH: f64 = 1.0;

/// The two live parameters of a gear.
///
/// Fields are public so callers can build and inspect specs freely, but every
/// entry point of the gear model re-checks them with [`GearSpec::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearSpec {
    /// Number of teeth, in `[MIN_TOOTH_COUNT, MAX_TOOTH_COUNT]`.
    pub tooth_count: u32,
    /// Extrusion distance of each tooth, in `[MIN_TOOTH_LENGTH, MAX_TOOTH_LENGTH]`.
    pub tooth_length: f64,
}

impl GearSpec {
    /// Build a spec, rejecting out-of-range values.
    pub fn new(tooth_count: u32, tooth_length: f64) -> Result<Self, ParameterError> {
        let spec = Self {
            tooth_count,
            tooth_length,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check both fields against their bounds.
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_tooth_count(self.tooth_count)?;
        check_tooth_length(self.tooth_length)?;
        Ok(())
    }

    /// Number of subdivisions around the tube axis: two per tooth
    /// (one extruded face, one gap face).
    pub fn spans(&self) -> u32 {
        spans_for(self.tooth_count)
    }
}

/// Subdivisions around the axis for a given tooth count.
///
/// Saturates rather than wrapping, so an unvalidated count still maps to a
/// value the host will reject as too large.
pub fn spans_for(tooth_count: u32) -> u32 {
    tooth_count.saturating_mul(2)
}

/// Validate a tooth count, returning it unchanged when in range.
pub fn check_tooth_count(tooth_count: u32) -> Result<u32, ParameterError> {
    if (MIN_TOOTH_COUNT..=MAX_TOOTH_COUNT).contains(&tooth_count) {
        Ok(tooth_count)
    } else {
        Err(ParameterError {
            parameter: Parameter::ToothCount,
            value: f64::from(tooth_count),
            min: f64::from(MIN_TOOTH_COUNT),
            max: f64::from(MAX_TOOTH_COUNT),
        })
    }
}

/// Validate a tooth length, returning it unchanged when in range.
/// NaN and infinities are out of range.
pub fn check_tooth_length(tooth_length: f64) -> Result<f64, ParameterError> {
    if tooth_length.is_finite() && (MIN_TOOTH_LENGTH..=MAX_TOOTH_LENGTH).contains(&tooth_length) {
        Ok(tooth_length)
    } else {
        Err(ParameterError {
            parameter: Parameter::ToothLength,
            value: tooth_length,
            min: MIN_TOOTH_LENGTH,
            max: MAX_TOOTH_LENGTH,
        })
    }
}

/// Which gear parameter a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    ToothCount,
    ToothLength,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::ToothCount => write!(f, "tooth count"),
            Parameter::ToothLength => write!(f, "tooth length"),
        }
    }
}

/// A parameter value outside its documented bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{parameter} {value} is outside [{min}, {max}]")]
pub struct ParameterError {
    pub parameter: Parameter,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}
