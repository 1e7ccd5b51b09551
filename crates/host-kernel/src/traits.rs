use crate::types::*;

/// Mutating side of the host geometry environment.
///
/// Every call either succeeds completely or leaves host state unchanged.
/// Implemented by [`crate::MockHost`]; a real authoring tool plugs in here.
pub trait HostKernel {
    /// Create a closed pipe primitive with `subdivisions` faces around its axis.
    fn create_tube(
        &mut self,
        subdivisions: u32,
    ) -> Result<(TransformHandle, MeshHandle), HostError>;

    /// Remove a pipe from the scene along with its mesh, its modifiers and
    /// any selection that refers to them.
    fn delete_tube(&mut self, transform: TransformHandle) -> Result<(), HostError>;

    /// Re-parameterize an existing pipe in place. Faces are renumbered
    /// following the ring convention of [`FaceRing`].
    fn edit_tube_subdivisions(
        &mut self,
        mesh: MeshHandle,
        subdivisions: u32,
    ) -> Result<(), HostError>;

    /// Attach an extrusion modifier that pushes each listed face out along
    /// its own normal.
    fn extrude_faces(
        &mut self,
        mesh: MeshHandle,
        faces: &[usize],
        translate_along_normal: f64,
    ) -> Result<ExtrudeOpHandle, HostError>;

    /// Update an extrusion modifier. `None` leaves that setting unchanged.
    fn edit_extrude(
        &mut self,
        op: ExtrudeOpHandle,
        faces: Option<&[usize]>,
        translate_along_normal: Option<f64>,
    ) -> Result<(), HostError>;

    /// Add faces of a mesh to the active selection.
    fn select_faces(&mut self, mesh: MeshHandle, faces: &[usize]) -> Result<(), HostError>;

    /// Replace the active selection with a transform node.
    fn select_transform(&mut self, transform: TransformHandle) -> Result<(), HostError>;

    /// Empty the active selection.
    fn clear_selection(&mut self);
}

/// Read-only queries on host state.
pub trait HostIntrospect {
    /// Current subdivision count of a pipe.
    fn subdivisions(&self, mesh: MeshHandle) -> Option<u32>;

    /// Face count of the base primitive, before modifiers.
    fn face_count(&self, mesh: MeshHandle) -> Option<usize>;

    /// Ring of every face of the base primitive, in face order.
    fn face_rings(&self, mesh: MeshHandle) -> Option<Vec<FaceRing>>;

    /// Faces currently targeted by an extrusion.
    fn extrude_faces_of(&self, op: ExtrudeOpHandle) -> Option<Vec<usize>>;

    /// Current displacement of an extrusion.
    fn extrude_translate_of(&self, op: ExtrudeOpHandle) -> Option<f64>;

    /// Scene name of an extrusion modifier.
    fn extrude_name(&self, op: ExtrudeOpHandle) -> Option<String>;

    /// Snapshot of the active selection.
    fn selection(&self) -> Vec<SelectionItem>;

    /// The mesh with its construction history applied.
    fn evaluate(&self, mesh: MeshHandle) -> Result<EvaluatedMesh, HostError>;

    /// Triangulate the evaluated mesh for display.
    fn tessellate(&self, mesh: MeshHandle) -> Result<RenderMesh, HostError>;
}
