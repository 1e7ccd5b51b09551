use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

pub use gear_types::FaceRing;

/// Opaque handle to a transform node in the host scene.
/// Valid only for the host session that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformHandle(u64);

/// Opaque handle to a mesh-producing primitive in the host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(u64);

/// Opaque handle to an extrusion modifier attached to a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtrudeOpHandle(u64);

macro_rules! raw_handle {
    ($($name:ident),*) => {
        $(
            impl $name {
                /// Wrap a host-assigned identifier.
                pub fn from_raw(raw: u64) -> Self {
                    Self(raw)
                }

                /// The host-assigned identifier.
                pub fn raw(self) -> u64 {
                    self.0
                }
            }
        )*
    };
}

raw_handle!(TransformHandle, MeshHandle, ExtrudeOpHandle);

/// One entry of the host's active selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionItem {
    Transform(TransformHandle),
    Face { mesh: MeshHandle, face: usize },
}

/// Errors reported by the host geometry environment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("{subdivisions} subdivisions is degenerate (minimum {min})")]
    DegenerateSubdivisions { subdivisions: u32, min: u32 },

    #[error("{subdivisions} subdivisions exceeds the host limit of {max}")]
    ResourceLimit { subdivisions: u32, max: u32 },

    #[error("face {face} out of range (mesh has {face_count} faces)")]
    FaceOutOfRange { face: usize, face_count: usize },

    #[error("extrusion requires at least one face")]
    EmptyFaceList,

    #[error("translation {value} is not finite")]
    InvalidTranslate { value: f64 },

    #[error("unknown transform: {0:?}")]
    UnknownTransform(TransformHandle),

    #[error("unknown mesh: {0:?}")]
    UnknownMesh(MeshHandle),

    #[error("unknown extrusion: {0:?}")]
    UnknownExtrude(ExtrudeOpHandle),

    #[error("host rejected {operation}: {reason}")]
    Rejected { operation: String, reason: String },
}

/// Where a face of an evaluated mesh came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceOrigin {
    /// A face of the base primitive, tagged with its ring.
    Primitive(FaceRing),
    /// A connecting face created by extruding the given face.
    ExtrudeSide { source: usize },
}

/// A quad face of an evaluated mesh, wound counter-clockwise seen from outside.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshFace {
    pub corners: [usize; 4],
    pub origin: FaceOrigin,
}

/// A polygon mesh with its construction history applied.
///
/// Faces of the base primitive keep their indices through every modifier;
/// faces created by modifiers are appended after them.
#[derive(Debug, Clone, Default)]
pub struct EvaluatedMesh {
    pub positions: Vec<Point3<f64>>,
    pub faces: Vec<MeshFace>,
}

impl EvaluatedMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Unit normal of a face (Newell's method), or `None` for an unknown
    /// or degenerate face.
    pub fn face_normal(&self, face: usize) -> Option<Vector3<f64>> {
        let corners = self.faces.get(face)?.corners;
        let mut n = Vector3::zeros();
        for i in 0..corners.len() {
            let a = self.positions.get(corners[i])?;
            let b = self.positions.get(corners[(i + 1) % corners.len()])?;
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
        }
        n.try_normalize(1e-12)
    }

    /// Average of a face's corners.
    pub fn face_centroid(&self, face: usize) -> Option<Point3<f64>> {
        let corners = self.faces.get(face)?.corners;
        let mut sum = Vector3::zeros();
        for &c in &corners {
            sum += self.positions.get(c)?.coords;
        }
        Some(Point3::from(sum / corners.len() as f64))
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        let mut edges = std::collections::HashSet::new();
        for face in &self.faces {
            for i in 0..4 {
                let a = face.corners[i];
                let b = face.corners[(i + 1) % 4];
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.len()
    }
}

/// Tessellated triangle mesh for a viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Flat array of vertex normals [nx0, ny0, nz0, nx1, ny1, nz1, ...].
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
    /// Mapping from triangle ranges to faces of the evaluated mesh.
    pub face_ranges: Vec<FaceRange>,
}

/// Maps a contiguous range of triangle indices to a mesh face.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceRange {
    /// Index of the face in the evaluated mesh.
    pub face: usize,
    /// Start index in the indices array (inclusive).
    pub start_index: u32,
    /// End index in the indices array (exclusive).
    pub end_index: u32,
}
