//! Property-based tests for tooth derivation and parameter edits using `proptest`.

use proptest::prelude::*;

use gear_core::{derive_tooth_faces, side_face_range, ParametricGear};
use gear_types::{
    GearSpec, MAX_TOOTH_COUNT, MAX_TOOTH_LENGTH, MIN_TOOTH_COUNT, MIN_TOOTH_LENGTH,
};
use host_kernel::{HostIntrospect, MockHost};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_count() -> impl Strategy<Value = u32> {
    MIN_TOOTH_COUNT..=MAX_TOOTH_COUNT
}

fn arb_length() -> impl Strategy<Value = f64> {
    MIN_TOOTH_LENGTH..=MAX_TOOTH_LENGTH
}

#[derive(Debug, Clone)]
enum Edit {
    Count(u32),
    Length(f64),
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![arb_count().prop_map(Edit::Count), arb_length().prop_map(Edit::Length)]
}

// ---------------------------------------------------------------------------
// 1. Derivation: count, parity, ordering, range
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn tooth_faces_alternate_within_side_ring(count in arb_count()) {
        let faces = derive_tooth_faces(count).unwrap();
        let side = side_face_range(count).unwrap();

        prop_assert_eq!(faces.len(), count as usize);
        prop_assert_eq!(side.len(), 2 * faces.len());
        for w in faces.windows(2) {
            prop_assert_eq!(w[1] - w[0], 2, "faces must be strictly increasing by 2");
        }
        for &f in &faces {
            prop_assert!(side.contains(&f));
            prop_assert_eq!((f - side.start) % 2, 0, "face {} is at an odd offset", f);
        }
    }
}

proptest! {
    #[test]
    fn out_of_range_counts_rejected(
        count in prop_oneof![0u32..MIN_TOOTH_COUNT, (MAX_TOOTH_COUNT + 1)..1000],
    ) {
        prop_assert!(derive_tooth_faces(count).is_err());
    }
}

// ---------------------------------------------------------------------------
// 2. Edits: any sequence leaves host state matching the tracked spec
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn edits_keep_host_consistent(
        count in arb_count(),
        length in arb_length(),
        edits in prop::collection::vec(arb_edit(), 0..12),
    ) {
        let mut host = MockHost::new();
        let mut gear = ParametricGear::new();
        let handle = gear.create(&mut host, GearSpec::new(count, length).unwrap()).unwrap();

        for edit in edits {
            let before = gear.spec().unwrap();
            match edit {
                Edit::Count(n) => {
                    gear.set_tooth_count(&mut host, &handle, n).unwrap();
                    prop_assert_eq!(gear.spec().unwrap().tooth_length, before.tooth_length);
                }
                Edit::Length(l) => {
                    gear.set_tooth_length(&mut host, &handle, l).unwrap();
                    prop_assert_eq!(gear.spec().unwrap().tooth_count, before.tooth_count);
                }
            }
        }

        let spec = gear.spec().unwrap();
        prop_assert_eq!(host.subdivisions(handle.mesh), Some(spec.spans()));
        prop_assert_eq!(
            host.extrude_faces_of(handle.extrude),
            Some(derive_tooth_faces(spec.tooth_count).unwrap())
        );
        prop_assert_eq!(host.extrude_translate_of(handle.extrude), Some(spec.tooth_length));

        let mesh = host.evaluate(handle.mesh).unwrap();
        let teeth = spec.tooth_count as usize;
        prop_assert_eq!(mesh.face_count(), 8 * teeth + 4 * teeth);
    }
}
