use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gear_types::{GearSpec, ParameterError};
use host_kernel::{ExtrudeOpHandle, HostError, MeshHandle, TransformHandle};

/// Reference to a live gear.
///
/// Carries the host's opaque handles by value; the gear model checks `id`
/// on every call so a handle outliving its gear is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GearHandle {
    /// Unique per `create` call.
    pub id: Uuid,
    /// Transform node of the pipe in the host scene.
    pub transform: TransformHandle,
    /// The pipe primitive.
    pub mesh: MeshHandle,
    /// The single extrusion modifier forming the teeth.
    pub extrude: ExtrudeOpHandle,
}

/// Read-only summary of a gear as the host currently evaluates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearSnapshot {
    pub spec: GearSpec,
    pub subdivisions: u32,
    pub tooth_faces: Vec<usize>,
    pub translate: f64,
    pub extrude_name: String,
    pub vertex_count: usize,
    pub face_count: usize,
}

/// Errors from the gear model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GearError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),

    #[error("no gear has been created, or the handle was discarded")]
    NotInitialized,

    #[error("host operation failed: {0}")]
    HostOperationFailed(#[from] HostError),
}
