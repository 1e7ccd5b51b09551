use gear_panel::{
    dispatch, dispatch_json, ControlValues, GearToUi, PanelConfig, PanelState, UiToGear,
};
use host_kernel::{HostCall, HostIntrospect, MockHost, MockHostConfig, SelectionItem};

fn controls(tooth_count: u32, tooth_length: f64) -> ControlValues {
    ControlValues {
        tooth_count,
        tooth_length,
    }
}

fn create(state: &mut PanelState, host: &mut MockHost) {
    let response = dispatch(state, UiToGear::CreateGear, host);
    assert!(
        matches!(response, GearToUi::GearUpdated { .. }),
        "create failed: {response:?}"
    );
}

// ── Messages ───────────────────────────────────────────────────────────────

#[test]
fn ui_message_serde_tags() {
    let msg = UiToGear::SetTeeth { count: 12 };
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"type\":\"SetTeeth\""));
    assert!(json.contains("\"count\":12"));

    let parsed: UiToGear = serde_json::from_str(r#"{"type":"SetGear"}"#).unwrap();
    assert_eq!(parsed, UiToGear::SetGear);

    let parsed: UiToGear = serde_json::from_str(r#"{"type":"SetLength","length":0.5}"#).unwrap();
    assert_eq!(parsed, UiToGear::SetLength { length: 0.5 });
}

#[test]
fn response_serde_tags() {
    let msg = GearToUi::ControlsChanged {
        controls: controls(10, 0.3),
    };
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"type\":\"ControlsChanged\""));
    let back: GearToUi = serde_json::from_str(&json).unwrap();
    assert_eq!(back, msg);
}

#[test]
fn gear_updated_survives_json() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    let response = dispatch(&mut state, UiToGear::CreateGear, &mut host);

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"type\":\"GearUpdated\""));
    let back: GearToUi = serde_json::from_str(&json).unwrap();
    assert_eq!(back, response);
}

// ── Create ─────────────────────────────────────────────────────────────────

#[test]
fn create_uses_default_controls() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();

    let response = dispatch(&mut state, UiToGear::CreateGear, &mut host);
    let GearToUi::GearUpdated { controls: c, gear } = response else {
        panic!("expected GearUpdated, got {response:?}");
    };
    assert_eq!(c, controls(10, 0.3));
    assert_eq!(gear.spec.tooth_count, 10);
    assert_eq!(gear.subdivisions, 20);
    assert_eq!(gear.tooth_faces, vec![40, 42, 44, 46, 48, 50, 52, 54, 56, 58]);
    assert_eq!(gear.translate, 0.3);
}

#[test]
fn create_uses_moved_controls() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    dispatch(&mut state, UiToGear::SetTeeth { count: 6 }, &mut host);
    dispatch(&mut state, UiToGear::SetLength { length: 0.7 }, &mut host);

    let response = dispatch(&mut state, UiToGear::CreateGear, &mut host);
    let GearToUi::GearUpdated { gear, .. } = response else {
        panic!("expected GearUpdated, got {response:?}");
    };
    assert_eq!(gear.spec.tooth_count, 6);
    assert_eq!(gear.spec.tooth_length, 0.7);
    assert_eq!(gear.subdivisions, 12);
}

#[test]
fn create_selects_transform() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    create(&mut state, &mut host);

    let handle = state.current_gear().unwrap();
    assert_eq!(host.selection(), vec![SelectionItem::Transform(handle.transform)]);
}

#[test]
fn create_survives_failed_selection() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    host.fail_next(HostCall::SelectTransform);

    let response = dispatch(&mut state, UiToGear::CreateGear, &mut host);
    let GearToUi::GearUpdated { gear, .. } = response else {
        panic!("expected GearUpdated, got {response:?}");
    };
    assert_eq!(gear.spec.tooth_count, 10);
    assert!(state.current_gear().is_some());
    assert!(host.selection().is_empty());
}

#[test]
fn create_failure_reports_error() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    host.fail_next(HostCall::CreateTube);

    let response = dispatch(&mut state, UiToGear::CreateGear, &mut host);
    let GearToUi::Error { message } = response else {
        panic!("expected Error, got {response:?}");
    };
    assert!(message.contains("host operation failed"));
    assert!(state.current_gear().is_none());
}

// ── Controls ───────────────────────────────────────────────────────────────

#[test]
fn controls_clamp_out_of_range_values() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();

    let response = dispatch(&mut state, UiToGear::SetTeeth { count: 2 }, &mut host);
    assert_eq!(
        response,
        GearToUi::ControlsChanged {
            controls: controls(5, 0.3)
        }
    );

    dispatch(&mut state, UiToGear::SetTeeth { count: -7 }, &mut host);
    assert_eq!(state.teeth.value(), 5);

    dispatch(&mut state, UiToGear::SetTeeth { count: 1_000_000_000_000 }, &mut host);
    assert_eq!(state.teeth.value(), 30);

    dispatch(&mut state, UiToGear::SetLength { length: 1.5 }, &mut host);
    assert_eq!(state.length.value(), 1.0);

    dispatch(&mut state, UiToGear::SetLength { length: 0.0 }, &mut host);
    assert_eq!(state.length.value(), 0.05);
}

#[test]
fn controls_without_gear_touch_nothing_in_host() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();

    dispatch(&mut state, UiToGear::SetTeeth { count: 12 }, &mut host);
    dispatch(&mut state, UiToGear::SetLength { length: 0.5 }, &mut host);
    dispatch(&mut state, UiToGear::ResetTeeth, &mut host);

    assert_eq!(host.mesh_count(), 0);
    assert_eq!(state.controls(), controls(10, 0.5));
}

#[test]
fn set_teeth_updates_live_gear() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    create(&mut state, &mut host);

    let response = dispatch(&mut state, UiToGear::SetTeeth { count: 12 }, &mut host);
    let GearToUi::GearUpdated { controls: c, gear } = response else {
        panic!("expected GearUpdated, got {response:?}");
    };
    assert_eq!(c, controls(12, 0.3));
    assert_eq!(gear.subdivisions, 24);
    assert_eq!(gear.tooth_faces, (48..72).step_by(2).collect::<Vec<_>>());
    assert_eq!(gear.translate, 0.3);
}

#[test]
fn set_teeth_clamps_before_reaching_gear() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    create(&mut state, &mut host);

    let response = dispatch(&mut state, UiToGear::SetTeeth { count: 99 }, &mut host);
    let GearToUi::GearUpdated { gear, .. } = response else {
        panic!("expected GearUpdated, got {response:?}");
    };
    assert_eq!(gear.spec.tooth_count, 30);
    assert_eq!(gear.subdivisions, 60);
}

#[test]
fn reset_length_restores_default_on_gear() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    create(&mut state, &mut host);
    dispatch(&mut state, UiToGear::SetLength { length: 0.9 }, &mut host);

    let response = dispatch(&mut state, UiToGear::ResetLength, &mut host);
    let GearToUi::GearUpdated { controls: c, gear } = response else {
        panic!("expected GearUpdated, got {response:?}");
    };
    assert_eq!(c.tooth_length, 0.3);
    assert_eq!(gear.translate, 0.3);
}

#[test]
fn reset_teeth_restores_default_on_gear() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    create(&mut state, &mut host);
    dispatch(&mut state, UiToGear::SetTeeth { count: 20 }, &mut host);

    dispatch(&mut state, UiToGear::ResetTeeth, &mut host);
    let handle = state.current_gear().unwrap();
    assert_eq!(host.subdivisions(handle.mesh), Some(20));
}

#[test]
fn failed_edit_resyncs_controls_with_gear() {
    let mut host = MockHost::with_config(MockHostConfig {
        max_subdivisions: 30,
        ..MockHostConfig::default()
    });
    let mut state = PanelState::new();
    create(&mut state, &mut host);

    let response = dispatch(&mut state, UiToGear::SetTeeth { count: 20 }, &mut host);
    assert!(matches!(response, GearToUi::Error { .. }));
    assert_eq!(state.teeth.value(), 10);

    let handle = state.current_gear().unwrap();
    assert_eq!(host.subdivisions(handle.mesh), Some(20));
}

#[test]
fn failed_length_edit_keeps_previous_length() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    create(&mut state, &mut host);
    host.fail_next(HostCall::EditExtrude);

    let response = dispatch(&mut state, UiToGear::SetLength { length: 0.8 }, &mut host);
    assert!(matches!(response, GearToUi::Error { .. }));
    assert_eq!(state.length.value(), 0.3);

    let handle = state.current_gear().unwrap();
    assert_eq!(host.extrude_translate_of(handle.extrude), Some(0.3));
}

// ── Commit ─────────────────────────────────────────────────────────────────

#[test]
fn set_gear_commits_and_resets_controls() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    create(&mut state, &mut host);
    dispatch(&mut state, UiToGear::SetTeeth { count: 14 }, &mut host);
    let handle = state.current_gear().unwrap();

    let response = dispatch(&mut state, UiToGear::SetGear, &mut host);
    assert_eq!(
        response,
        GearToUi::Committed {
            controls: controls(10, 0.3)
        }
    );
    assert!(state.current_gear().is_none());
    assert!(host.selection().is_empty());

    // The committed gear stays in the scene with its last parameters.
    assert_eq!(host.subdivisions(handle.mesh), Some(28));

    // Further edits only move the controls.
    let response = dispatch(&mut state, UiToGear::SetTeeth { count: 8 }, &mut host);
    assert!(matches!(response, GearToUi::ControlsChanged { .. }));
    assert_eq!(host.subdivisions(handle.mesh), Some(28));
}

#[test]
fn set_gear_without_gear_is_harmless() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    let response = dispatch(&mut state, UiToGear::SetGear, &mut host);
    assert!(matches!(response, GearToUi::Committed { .. }));
}

#[test]
fn second_create_after_commit_builds_new_gear() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();
    create(&mut state, &mut host);
    let first = state.current_gear().unwrap();
    dispatch(&mut state, UiToGear::SetGear, &mut host);
    create(&mut state, &mut host);
    let second = state.current_gear().unwrap();

    assert_ne!(first.id, second.id);
    assert_ne!(first.mesh, second.mesh);
    assert_eq!(host.mesh_count(), 2);
}

// ── JSON dispatch ──────────────────────────────────────────────────────────

#[test]
fn dispatch_json_round_trip() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();

    let out = dispatch_json(&mut state, r#"{"type":"CreateGear"}"#, &mut host);
    let response: GearToUi = serde_json::from_str(&out).unwrap();
    assert!(matches!(response, GearToUi::GearUpdated { .. }));

    let out = dispatch_json(&mut state, r#"{"type":"SetTeeth","count":12}"#, &mut host);
    let response: GearToUi = serde_json::from_str(&out).unwrap();
    let GearToUi::GearUpdated { gear, .. } = response else {
        panic!("expected GearUpdated, got {response:?}");
    };
    assert_eq!(gear.tooth_faces.first(), Some(&48));
}

#[test]
fn dispatch_json_rejects_unknown_message() {
    let mut host = MockHost::new();
    let mut state = PanelState::new();

    let out = dispatch_json(&mut state, r#"{"type":"Explode"}"#, &mut host);
    let response: GearToUi = serde_json::from_str(&out).unwrap();
    let GearToUi::Error { message } = response else {
        panic!("expected Error, got {response:?}");
    };
    assert!(message.starts_with("serialization error"));
}

// ── Config ─────────────────────────────────────────────────────────────────

#[test]
fn configured_defaults_drive_create_and_reset() {
    let config = PanelConfig::from_json(
        r#"{"default_tooth_count": 16, "default_tooth_length": 0.5}"#,
    )
    .unwrap();
    let mut host = MockHost::new();
    let mut state = PanelState::with_config(config);
    create(&mut state, &mut host);
    assert_eq!(state.gear.spec().map(|s| s.tooth_count), Some(16));

    dispatch(&mut state, UiToGear::SetLength { length: 0.2 }, &mut host);
    let response = dispatch(&mut state, UiToGear::SetGear, &mut host);
    assert_eq!(
        response,
        GearToUi::Committed {
            controls: controls(16, 0.5)
        }
    );
}
