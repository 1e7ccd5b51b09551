//! Face extrusion as applied by the host when evaluating construction history.

use tracing::{debug, instrument};

use crate::types::{EvaluatedMesh, FaceOrigin, HostError, MeshFace};

/// Push each listed face out along its own normal by `distance`.
///
/// The extruded face keeps its index and is rewired to four new vertices;
/// each of its four boundary edges gains a connecting quad, appended after
/// the existing faces in list order. Faces are extruded individually, so
/// adjacent selections produce separate walls.
#[instrument(skip(mesh, faces), fields(count = faces.len()))]
pub fn extrude_faces(
    mesh: &mut EvaluatedMesh,
    faces: &[usize],
    distance: f64,
) -> Result<(), HostError> {
    if !distance.is_finite() {
        return Err(HostError::InvalidTranslate { value: distance });
    }
    let face_count = mesh.face_count();
    if let Some(&face) = faces.iter().find(|&&f| f >= face_count) {
        return Err(HostError::FaceOutOfRange { face, face_count });
    }

    for &face in faces {
        let normal = mesh.face_normal(face).ok_or_else(|| HostError::Rejected {
            operation: "extrude".to_string(),
            reason: format!("face {face} is degenerate"),
        })?;
        let offset = normal * distance;
        let old = mesh.faces[face].corners;

        let base = mesh.positions.len();
        for &c in &old {
            let moved = mesh.positions[c] + offset;
            mesh.positions.push(moved);
        }
        let new = [base, base + 1, base + 2, base + 3];
        mesh.faces[face].corners = new;

        for i in 0..4 {
            let j = (i + 1) % 4;
            mesh.faces.push(MeshFace {
                corners: [old[i], old[j], new[j], new[i]],
                origin: FaceOrigin::ExtrudeSide { source: face },
            });
        }
    }

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        distance,
        "applied extrusion"
    );
    Ok(())
}
