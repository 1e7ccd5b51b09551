//! Tooth face derivation.
//!
//! A gear with `n` teeth is a pipe with `2n` spans. Teeth are every other
//! face of the outer wall ring, starting with its first face, so teeth and
//! gaps alternate around the circumference.

use std::ops::Range;

use gear_types::{check_tooth_count, spans_for, FaceRing, ParameterError};
use host_kernel::{HostError, HostIntrospect, MeshHandle};

use crate::types::GearError;

/// Face indices of the outer wall for a gear with `tooth_count` teeth.
pub fn side_face_range(tooth_count: u32) -> Result<Range<usize>, ParameterError> {
    let count = check_tooth_count(tooth_count)?;
    Ok(FaceRing::OuterWall.range(spans_for(count) as usize))
}

/// Faces to extrude for a gear with `tooth_count` teeth, in increasing order.
///
/// For `spans = 2 * tooth_count` these are `2*spans, 2*spans + 2, ..., 3*spans - 2`.
pub fn derive_tooth_faces(tooth_count: u32) -> Result<Vec<usize>, ParameterError> {
    Ok(side_face_range(tooth_count)?.step_by(2).collect())
}

/// Check against the host's own topology that every tooth face lies on the
/// outer wall of `mesh`.
pub(crate) fn verify_tooth_faces(
    host: &dyn HostIntrospect,
    mesh: MeshHandle,
    faces: &[usize],
) -> Result<(), GearError> {
    let rings = host.face_rings(mesh).ok_or(HostError::UnknownMesh(mesh))?;
    for &face in faces {
        match rings.get(face) {
            Some(FaceRing::OuterWall) => {}
            Some(other) => {
                return Err(HostError::Rejected {
                    operation: "face ordering".to_string(),
                    reason: format!("tooth face {face} lies on {other:?}, not the outer wall"),
                }
                .into())
            }
            None => {
                return Err(HostError::FaceOutOfRange {
                    face,
                    face_count: rings.len(),
                }
                .into())
            }
        }
    }
    Ok(())
}
