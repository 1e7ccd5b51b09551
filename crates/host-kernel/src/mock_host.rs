//! MockHost: deterministic in-process host implementing HostKernel + HostIntrospect.
//!
//! Keeps a construction history per mesh (a pipe primitive plus extrusion
//! modifiers) and evaluates it on demand, the way an authoring tool does.
//! Used by gear-core and gear-panel for testing and headless use.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use tracing::{debug, instrument};

use gear_types::{pipe_face_count, PipeProfile};

use crate::extrude;
use crate::pipe::{self, MIN_SUBDIVISIONS};
use crate::tessellation;
use crate::traits::{HostIntrospect, HostKernel};
use crate::types::*;

new_key_type! {
    struct TransformKey;
    struct MeshKey;
    struct ExtrudeKey;
}

/// Tunables for the mock host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockHostConfig {
    /// Dimensions of every pipe the host creates.
    pub profile: PipeProfile,
    /// Largest subdivision count accepted before reporting a resource limit.
    pub max_subdivisions: u32,
}

impl Default for MockHostConfig {
    fn default() -> Self {
        Self {
            profile: PipeProfile::default(),
            max_subdivisions: 512,
        }
    }
}

/// Host calls that can be made to fail on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    CreateTube,
    DeleteTube,
    EditTubeSubdivisions,
    ExtrudeFaces,
    EditExtrude,
    SelectTransform,
}

#[derive(Debug, Clone)]
struct TransformRecord {
    name: String,
    mesh: MeshKey,
}

#[derive(Debug, Clone)]
struct MeshRecord {
    subdivisions: u32,
    /// Modifiers in application order.
    history: Vec<ExtrudeKey>,
}

#[derive(Debug, Clone)]
struct ExtrudeRecord {
    name: String,
    mesh: MeshKey,
    faces: Vec<usize>,
    translate: f64,
}

/// Deterministic test double for the host geometry environment.
pub struct MockHost {
    config: MockHostConfig,
    transforms: SlotMap<TransformKey, TransformRecord>,
    meshes: SlotMap<MeshKey, MeshRecord>,
    extrudes: SlotMap<ExtrudeKey, ExtrudeRecord>,
    selection: Vec<SelectionItem>,
    next_pipe: u32,
    next_extrude: u32,
    /// Injected failures: the call kind and how many calls of that kind
    /// succeed before it fails once.
    fail_next: Vec<(HostCall, u32)>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::with_config(MockHostConfig::default())
    }

    pub fn with_config(config: MockHostConfig) -> Self {
        Self {
            config,
            transforms: SlotMap::with_key(),
            meshes: SlotMap::with_key(),
            extrudes: SlotMap::with_key(),
            selection: Vec::new(),
            next_pipe: 1,
            next_extrude: 1,
            fail_next: Vec::new(),
        }
    }

    pub fn config(&self) -> &MockHostConfig {
        &self.config
    }

    /// Make the next call of the given kind fail with `HostError::Rejected`.
    pub fn fail_next(&mut self, call: HostCall) {
        self.fail_after(call, 0);
    }

    /// Let `successes` calls of the given kind through, then fail the next one.
    pub fn fail_after(&mut self, call: HostCall, successes: u32) {
        self.fail_next.push((call, successes));
    }

    /// Scene name of a transform node.
    pub fn transform_name(&self, transform: TransformHandle) -> Option<&str> {
        self.transforms
            .get(transform_key(transform))
            .map(|t| t.name.as_str())
    }

    /// Mesh driven by a transform node.
    pub fn transform_mesh(&self, transform: TransformHandle) -> Option<MeshHandle> {
        self.transforms
            .get(transform_key(transform))
            .map(|t| mesh_handle(t.mesh))
    }

    /// Number of pipes in the scene.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Extrusion modifiers attached to a mesh, in application order.
    pub fn history(&self, mesh: MeshHandle) -> Option<Vec<ExtrudeOpHandle>> {
        self.meshes
            .get(mesh_key(mesh))
            .map(|m| m.history.iter().map(|&k| extrude_handle(k)).collect())
    }

    fn check_injected(&mut self, call: HostCall) -> Result<(), HostError> {
        let Some(pos) = self.fail_next.iter().position(|&(c, _)| c == call) else {
            return Ok(());
        };
        let remaining = &mut self.fail_next[pos].1;
        if *remaining > 0 {
            *remaining -= 1;
            return Ok(());
        }
        self.fail_next.remove(pos);
        Err(HostError::Rejected {
            operation: format!("{call:?}"),
            reason: "injected failure".to_string(),
        })
    }

    fn check_subdivisions(&self, subdivisions: u32) -> Result<(), HostError> {
        if subdivisions < MIN_SUBDIVISIONS {
            return Err(HostError::DegenerateSubdivisions {
                subdivisions,
                min: MIN_SUBDIVISIONS,
            });
        }
        if subdivisions > self.config.max_subdivisions {
            return Err(HostError::ResourceLimit {
                subdivisions,
                max: self.config.max_subdivisions,
            });
        }
        Ok(())
    }

    fn mesh(&self, mesh: MeshHandle) -> Result<&MeshRecord, HostError> {
        self.meshes
            .get(mesh_key(mesh))
            .ok_or(HostError::UnknownMesh(mesh))
    }

    /// Validate a face list against the base primitive of `mesh`.
    fn check_faces(&self, mesh: &MeshRecord, faces: &[usize]) -> Result<(), HostError> {
        if faces.is_empty() {
            return Err(HostError::EmptyFaceList);
        }
        let face_count = pipe_face_count(mesh.subdivisions as usize);
        match faces.iter().find(|&&f| f >= face_count) {
            Some(&face) => Err(HostError::FaceOutOfRange { face, face_count }),
            None => Ok(()),
        }
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

fn check_translate(value: f64) -> Result<(), HostError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HostError::InvalidTranslate { value })
    }
}

// Handles carry the slot map key's FFI form so they stay opaque to callers.
fn transform_handle(key: TransformKey) -> TransformHandle {
    TransformHandle::from_raw(key.data().as_ffi())
}

fn transform_key(handle: TransformHandle) -> TransformKey {
    KeyData::from_ffi(handle.raw()).into()
}

fn mesh_handle(key: MeshKey) -> MeshHandle {
    MeshHandle::from_raw(key.data().as_ffi())
}

fn mesh_key(handle: MeshHandle) -> MeshKey {
    KeyData::from_ffi(handle.raw()).into()
}

fn extrude_handle(key: ExtrudeKey) -> ExtrudeOpHandle {
    ExtrudeOpHandle::from_raw(key.data().as_ffi())
}

fn extrude_key(handle: ExtrudeOpHandle) -> ExtrudeKey {
    KeyData::from_ffi(handle.raw()).into()
}

impl HostKernel for MockHost {
    #[instrument(skip(self))]
    fn create_tube(
        &mut self,
        subdivisions: u32,
    ) -> Result<(TransformHandle, MeshHandle), HostError> {
        self.check_injected(HostCall::CreateTube)?;
        self.check_subdivisions(subdivisions)?;

        let mesh = self.meshes.insert(MeshRecord {
            subdivisions,
            history: Vec::new(),
        });
        let name = format!("pipe{}", self.next_pipe);
        self.next_pipe += 1;
        let transform = self.transforms.insert(TransformRecord {
            name: name.clone(),
            mesh,
        });

        debug!(%name, "created pipe");
        Ok((transform_handle(transform), mesh_handle(mesh)))
    }

    #[instrument(skip(self))]
    fn delete_tube(&mut self, transform: TransformHandle) -> Result<(), HostError> {
        self.check_injected(HostCall::DeleteTube)?;
        let record = self
            .transforms
            .remove(transform_key(transform))
            .ok_or(HostError::UnknownTransform(transform))?;
        let mesh = mesh_handle(record.mesh);
        if let Some(mesh_record) = self.meshes.remove(record.mesh) {
            for key in mesh_record.history {
                self.extrudes.remove(key);
            }
        }
        self.selection.retain(|item| match item {
            SelectionItem::Transform(t) => *t != transform,
            SelectionItem::Face { mesh: m, .. } => *m != mesh,
        });

        debug!(name = %record.name, "deleted pipe");
        Ok(())
    }

    #[instrument(skip(self))]
    fn edit_tube_subdivisions(
        &mut self,
        mesh: MeshHandle,
        subdivisions: u32,
    ) -> Result<(), HostError> {
        self.check_injected(HostCall::EditTubeSubdivisions)?;
        self.check_subdivisions(subdivisions)?;
        let record = self
            .meshes
            .get_mut(mesh_key(mesh))
            .ok_or(HostError::UnknownMesh(mesh))?;
        let previous = record.subdivisions;
        record.subdivisions = subdivisions;

        // Faces are renumbered; a face-level selection no longer means anything.
        self.selection
            .retain(|item| !matches!(item, SelectionItem::Face { mesh: m, .. } if *m == mesh));

        debug!(previous, subdivisions, "edited pipe subdivisions");
        Ok(())
    }

    #[instrument(skip(self, faces), fields(count = faces.len()))]
    fn extrude_faces(
        &mut self,
        mesh: MeshHandle,
        faces: &[usize],
        translate_along_normal: f64,
    ) -> Result<ExtrudeOpHandle, HostError> {
        self.check_injected(HostCall::ExtrudeFaces)?;
        check_translate(translate_along_normal)?;
        let record = self.mesh(mesh)?;
        self.check_faces(record, faces)?;

        let name = format!("extrudeFace{}", self.next_extrude);
        self.next_extrude += 1;
        let key = self.extrudes.insert(ExtrudeRecord {
            name: name.clone(),
            mesh: mesh_key(mesh),
            faces: faces.to_vec(),
            translate: translate_along_normal,
        });
        if let Some(record) = self.meshes.get_mut(mesh_key(mesh)) {
            record.history.push(key);
        }

        debug!(%name, translate_along_normal, "attached extrusion");
        Ok(extrude_handle(key))
    }

    #[instrument(skip(self, faces))]
    fn edit_extrude(
        &mut self,
        op: ExtrudeOpHandle,
        faces: Option<&[usize]>,
        translate_along_normal: Option<f64>,
    ) -> Result<(), HostError> {
        self.check_injected(HostCall::EditExtrude)?;
        let record = self
            .extrudes
            .get(extrude_key(op))
            .ok_or(HostError::UnknownExtrude(op))?;
        if let Some(value) = translate_along_normal {
            check_translate(value)?;
        }
        if let Some(faces) = faces {
            let mesh = self
                .meshes
                .get(record.mesh)
                .ok_or(HostError::UnknownMesh(mesh_handle(record.mesh)))?;
            self.check_faces(mesh, faces)?;
        }

        let record = self
            .extrudes
            .get_mut(extrude_key(op))
            .ok_or(HostError::UnknownExtrude(op))?;
        if let Some(faces) = faces {
            record.faces = faces.to_vec();
        }
        if let Some(value) = translate_along_normal {
            record.translate = value;
        }

        debug!(
            name = %record.name,
            faces = record.faces.len(),
            translate = record.translate,
            "edited extrusion"
        );
        Ok(())
    }

    fn select_faces(&mut self, mesh: MeshHandle, faces: &[usize]) -> Result<(), HostError> {
        let record = self.mesh(mesh)?;
        let face_count = pipe_face_count(record.subdivisions as usize);
        if let Some(&face) = faces.iter().find(|&&f| f >= face_count) {
            return Err(HostError::FaceOutOfRange { face, face_count });
        }
        for &face in faces {
            let item = SelectionItem::Face { mesh, face };
            if !self.selection.contains(&item) {
                self.selection.push(item);
            }
        }
        Ok(())
    }

    fn select_transform(&mut self, transform: TransformHandle) -> Result<(), HostError> {
        self.check_injected(HostCall::SelectTransform)?;
        if !self.transforms.contains_key(transform_key(transform)) {
            return Err(HostError::UnknownTransform(transform));
        }
        self.selection = vec![SelectionItem::Transform(transform)];
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

impl HostIntrospect for MockHost {
    fn subdivisions(&self, mesh: MeshHandle) -> Option<u32> {
        self.meshes.get(mesh_key(mesh)).map(|m| m.subdivisions)
    }

    fn face_count(&self, mesh: MeshHandle) -> Option<usize> {
        self.subdivisions(mesh)
            .map(|s| pipe_face_count(s as usize))
    }

    fn face_rings(&self, mesh: MeshHandle) -> Option<Vec<FaceRing>> {
        let record = self.meshes.get(mesh_key(mesh))?;
        let base = pipe::build_pipe(&self.config.profile, record.subdivisions).ok()?;
        base.faces
            .iter()
            .map(|f| match f.origin {
                FaceOrigin::Primitive(ring) => Some(ring),
                FaceOrigin::ExtrudeSide { .. } => None,
            })
            .collect()
    }

    fn extrude_faces_of(&self, op: ExtrudeOpHandle) -> Option<Vec<usize>> {
        self.extrudes.get(extrude_key(op)).map(|e| e.faces.clone())
    }

    fn extrude_translate_of(&self, op: ExtrudeOpHandle) -> Option<f64> {
        self.extrudes.get(extrude_key(op)).map(|e| e.translate)
    }

    fn extrude_name(&self, op: ExtrudeOpHandle) -> Option<String> {
        self.extrudes.get(extrude_key(op)).map(|e| e.name.clone())
    }

    fn selection(&self) -> Vec<SelectionItem> {
        self.selection.clone()
    }

    fn evaluate(&self, mesh: MeshHandle) -> Result<EvaluatedMesh, HostError> {
        let record = self.mesh(mesh)?;
        let mut evaluated = pipe::build_pipe(&self.config.profile, record.subdivisions)?;
        for key in &record.history {
            let op = self
                .extrudes
                .get(*key)
                .ok_or(HostError::UnknownExtrude(extrude_handle(*key)))?;
            extrude::extrude_faces(&mut evaluated, &op.faces, op.translate)?;
        }
        Ok(evaluated)
    }

    fn tessellate(&self, mesh: MeshHandle) -> Result<RenderMesh, HostError> {
        let evaluated = self.evaluate(mesh)?;
        Ok(tessellation::tessellate_quads(&evaluated))
    }
}
