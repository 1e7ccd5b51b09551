//! Caller-facing layer over the gear model: bounded controls, defaults,
//! and a JSON message protocol for a panel UI.

pub mod config;
pub mod dispatch;
pub mod messages;
pub mod panel_state;

pub use config::PanelConfig;
pub use dispatch::{dispatch, dispatch_json};
pub use messages::{ControlValues, GearToUi, UiToGear};
pub use panel_state::{BoundedControl, ControlValue, PanelError, PanelState};
