use tracing::{debug, warn};

use gear_core::{GearError, HostBundle};
use gear_types::GearSpec;

use crate::messages::{GearToUi, UiToGear};
use crate::panel_state::{PanelError, PanelState};

/// Dispatch a panel message to the gear model and return a response.
///
/// Failures are reported as [`GearToUi::Error`]; the panel state stays
/// usable afterwards.
pub fn dispatch(state: &mut PanelState, msg: UiToGear, host: &mut dyn HostBundle) -> GearToUi {
    debug!(?msg, "dispatch");
    match handle_message(state, msg, host) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "panel message failed");
            GearToUi::Error {
                message: e.to_string(),
            }
        }
    }
}

/// JSON-in, JSON-out wrapper around [`dispatch`].
pub fn dispatch_json(state: &mut PanelState, json: &str, host: &mut dyn HostBundle) -> String {
    let response = match serde_json::from_str::<UiToGear>(json) {
        Ok(msg) => dispatch(state, msg, host),
        Err(e) => GearToUi::Error {
            message: PanelError::Serialization {
                reason: e.to_string(),
            }
            .to_string(),
        },
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"type":"Error","message":"serialization error: {e}"}}"#)
    })
}

fn handle_message(
    state: &mut PanelState,
    msg: UiToGear,
    host: &mut dyn HostBundle,
) -> Result<GearToUi, PanelError> {
    match msg {
        UiToGear::CreateGear => {
            let spec = GearSpec::new(state.teeth.value(), state.length.value())
                .map_err(GearError::from)?;
            let handle = state.gear.create(host, spec)?;
            // The gear is tracked even if selecting it fails.
            if let Err(e) = host.select_transform(handle.transform) {
                warn!(error = %e, gear = %handle.id, "could not select new gear");
            }
            gear_updated(state, host)
        }

        UiToGear::SetTeeth { count } => {
            let count = u32::try_from(count.max(0)).unwrap_or(u32::MAX);
            state.teeth.set(count);
            apply_tooth_count(state, host)
        }

        UiToGear::ResetTeeth => {
            state.teeth.reset();
            apply_tooth_count(state, host)
        }

        UiToGear::SetLength { length } => {
            state.length.set(length);
            apply_tooth_length(state, host)
        }

        UiToGear::ResetLength => {
            state.length.reset();
            apply_tooth_length(state, host)
        }

        UiToGear::SetGear => {
            match state.current_gear() {
                Some(handle) => state.gear.reset(host, handle)?,
                None => host.clear_selection(),
            }
            state.reset_controls();
            Ok(GearToUi::Committed {
                controls: state.controls(),
            })
        }
    }
}

fn apply_tooth_count(
    state: &mut PanelState,
    host: &mut dyn HostBundle,
) -> Result<GearToUi, PanelError> {
    let Some(handle) = state.current_gear() else {
        return Ok(controls_changed(state));
    };
    if let Err(e) = state.gear.set_tooth_count(host, &handle, state.teeth.value()) {
        resync_controls(state);
        return Err(e.into());
    }
    gear_updated(state, host)
}

fn apply_tooth_length(
    state: &mut PanelState,
    host: &mut dyn HostBundle,
) -> Result<GearToUi, PanelError> {
    let Some(handle) = state.current_gear() else {
        return Ok(controls_changed(state));
    };
    if let Err(e) = state.gear.set_tooth_length(host, &handle, state.length.value()) {
        resync_controls(state);
        return Err(e.into());
    }
    gear_updated(state, host)
}

/// Point the controls back at the gear's parameters after a failed edit.
fn resync_controls(state: &mut PanelState) {
    if let Some(spec) = state.gear.spec() {
        state.teeth.set(spec.tooth_count);
        state.length.set(spec.tooth_length);
    }
}

fn controls_changed(state: &PanelState) -> GearToUi {
    GearToUi::ControlsChanged {
        controls: state.controls(),
    }
}

fn gear_updated(state: &PanelState, host: &mut dyn HostBundle) -> Result<GearToUi, PanelError> {
    let gear = state.gear.snapshot(host.as_introspect())?;
    Ok(GearToUi::GearUpdated {
        controls: state.controls(),
        gear,
    })
}
