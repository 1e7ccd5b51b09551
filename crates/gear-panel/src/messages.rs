use serde::{Deserialize, Serialize};

use gear_core::GearSnapshot;

/// Messages from the panel UI to the gear model.
/// Serialized as JSON with a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToGear {
    /// Build a new gear from the current control values.
    CreateGear,
    /// Move the tooth count control. Out-of-range values are clamped.
    SetTeeth { count: i64 },
    /// Return the tooth count control to its default.
    ResetTeeth,
    /// Move the tooth length control. Out-of-range values are clamped.
    SetLength { length: f64 },
    /// Return the tooth length control to its default.
    ResetLength,
    /// Commit the current gear: stop editing it and reset the controls.
    SetGear,
}

/// Values currently shown by the two controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlValues {
    pub tooth_count: u32,
    pub tooth_length: f64,
}

/// Responses from the gear model to the panel UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GearToUi {
    /// The current gear changed; carries its state as the host evaluates it.
    GearUpdated {
        controls: ControlValues,
        gear: GearSnapshot,
    },
    /// Only the controls changed; there is no gear to apply them to.
    ControlsChanged { controls: ControlValues },
    /// The gear was committed and the controls reset.
    Committed { controls: ControlValues },
    /// Something failed.
    Error { message: String },
}
