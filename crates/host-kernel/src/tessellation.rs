//! Triangulation of evaluated meshes with face-range metadata.
//!
//! Produces a RenderMesh with FaceRange entries that map triangle index
//! ranges back to faces of the evaluated mesh for picking.

use crate::types::*;

/// Split every quad into two triangles.
///
/// Vertices are duplicated per face so each carries its face's flat normal.
pub fn tessellate_quads(mesh: &EvaluatedMesh) -> RenderMesh {
    let mut vertices = Vec::with_capacity(mesh.face_count() * 12);
    let mut normals = Vec::with_capacity(mesh.face_count() * 12);
    let mut indices = Vec::with_capacity(mesh.face_count() * 6);
    let mut face_ranges = Vec::with_capacity(mesh.face_count());

    for (face, quad) in mesh.faces.iter().enumerate() {
        let start_index = indices.len() as u32;
        let base_vertex = (vertices.len() / 3) as u32;
        // Degenerate faces (zero-length extrusion sides) still get a normal.
        let n = mesh.face_normal(face).unwrap_or_else(nalgebra::Vector3::z);

        for &corner in &quad.corners {
            let p = mesh.positions[corner];
            vertices.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            normals.extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
        }

        // Two triangles: 0-1-2 and 0-2-3
        indices.extend_from_slice(&[
            base_vertex,
            base_vertex + 1,
            base_vertex + 2,
            base_vertex,
            base_vertex + 2,
            base_vertex + 3,
        ]);

        face_ranges.push(FaceRange {
            face,
            start_index,
            end_index: indices.len() as u32,
        });
    }

    RenderMesh {
        vertices,
        normals,
        indices,
        face_ranges,
    }
}
