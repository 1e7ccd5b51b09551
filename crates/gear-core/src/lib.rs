pub mod host_ext;
pub mod teeth;
pub mod types;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use gear_types::{check_tooth_count, check_tooth_length, spans_for, GearSpec};
use host_kernel::{ExtrudeOpHandle, HostIntrospect, MeshHandle};

pub use host_ext::HostBundle;
pub use teeth::{derive_tooth_faces, side_face_range};
pub use types::{GearError, GearHandle, GearSnapshot};

/// State of the gear currently tracked by a [`ParametricGear`].
#[derive(Debug, Clone, Copy)]
struct GearState {
    handle: GearHandle,
    spec: GearSpec,
}

/// The parametric gear model.
///
/// Owns the authoritative tooth count and tooth length of one gear and keeps
/// the host's pipe primitive and its tooth extrusion consistent with them.
/// The host is passed into every call; nothing here holds on to it.
#[derive(Debug, Default)]
pub struct ParametricGear {
    current: Option<GearState>,
}

impl ParametricGear {
    /// A model with no gear.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Build a pipe with `2 * tooth_count` spans and extrude every other
    /// outer-wall face by `tooth_length`.
    ///
    /// The host selection is empty when this returns, whether or not it
    /// succeeded, and a failed call leaves no pipe behind. A gear already
    /// tracked by this model is left in the host scene as-is and stops being
    /// tracked.
    #[instrument(skip(self, host))]
    pub fn create(
        &mut self,
        host: &mut dyn HostBundle,
        spec: GearSpec,
    ) -> Result<GearHandle, GearError> {
        spec.validate()?;
        let faces = derive_tooth_faces(spec.tooth_count)?;

        let (transform, mesh) = host.create_tube(spec.spans())?;
        let extrude = match extrude_teeth(host, mesh, &faces, spec.tooth_length) {
            Ok(extrude) => extrude,
            Err(e) => {
                warn!(error = %e, "tooth extrusion failed, removing pipe");
                if let Err(cleanup) = host.delete_tube(transform) {
                    warn!(error = %cleanup, "could not remove pipe");
                }
                return Err(e);
            }
        };

        let handle = GearHandle {
            id: Uuid::new_v4(),
            transform,
            mesh,
            extrude,
        };
        if let Some(previous) = self.current.replace(GearState { handle, spec }) {
            info!(gear = %previous.handle.id, "committed previous gear");
        }

        info!(
            gear = %handle.id,
            teeth = spec.tooth_count,
            length = spec.tooth_length,
            "created gear"
        );
        Ok(handle)
    }

    /// Change the number of teeth, keeping the tooth length.
    ///
    /// The pipe is re-subdivided in place and the existing extrusion is
    /// retargeted to the new tooth faces. If the retarget fails, the previous
    /// subdivision count is restored before the error is returned; if that
    /// fails too the gear is no longer tracked.
    #[instrument(skip(self, host, handle), fields(gear = %handle.id))]
    pub fn set_tooth_count(
        &mut self,
        host: &mut dyn HostBundle,
        handle: &GearHandle,
        tooth_count: u32,
    ) -> Result<(), GearError> {
        let tooth_count = check_tooth_count(tooth_count)?;
        let state = self.state_for(handle)?;
        let faces = derive_tooth_faces(tooth_count)?;
        let previous = state.spec.tooth_count;

        host.edit_tube_subdivisions(handle.mesh, spans_for(tooth_count))?;

        let retargeted = teeth::verify_tooth_faces(host.as_introspect(), handle.mesh, &faces)
            .and_then(|()| {
                host.edit_extrude(handle.extrude, Some(&faces), None)
                    .map_err(GearError::from)
            });
        if let Err(e) = retargeted {
            warn!(error = %e, previous, "retarget failed, restoring subdivisions");
            if let Err(restore) = host.edit_tube_subdivisions(handle.mesh, spans_for(previous)) {
                warn!(error = %restore, "could not restore subdivisions, releasing gear");
                self.current = None;
            }
            return Err(e);
        }

        if let Some(current) = self.current.as_mut() {
            current.spec.tooth_count = tooth_count;
        }
        debug!(previous, tooth_count, "changed tooth count");
        Ok(())
    }

    /// Change how far the teeth protrude. Face targets are untouched.
    #[instrument(skip(self, host, handle), fields(gear = %handle.id))]
    pub fn set_tooth_length(
        &mut self,
        host: &mut dyn HostBundle,
        handle: &GearHandle,
        tooth_length: f64,
    ) -> Result<(), GearError> {
        let tooth_length = check_tooth_length(tooth_length)?;
        self.state_for(handle)?;

        host.edit_extrude(handle.extrude, None, Some(tooth_length))?;

        if let Some(current) = self.current.as_mut() {
            current.spec.tooth_length = tooth_length;
        }
        debug!(tooth_length, "changed tooth length");
        Ok(())
    }

    /// Stop tracking the gear and clear the host selection.
    ///
    /// The geometry stays in the host scene; the handle is consumed.
    #[instrument(skip(self, host, handle), fields(gear = %handle.id))]
    pub fn reset(
        &mut self,
        host: &mut dyn HostBundle,
        handle: GearHandle,
    ) -> Result<(), GearError> {
        self.state_for(&handle)?;
        host.clear_selection();
        self.current = None;
        info!("released gear");
        Ok(())
    }

    /// Whether a gear is currently tracked.
    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Current parameters of the tracked gear.
    pub fn spec(&self) -> Option<GearSpec> {
        self.current.map(|s| s.spec)
    }

    /// Handle of the tracked gear.
    pub fn handle(&self) -> Option<GearHandle> {
        self.current.map(|s| s.handle)
    }

    /// Tooth faces for the tracked gear's current tooth count.
    pub fn tooth_faces(&self) -> Option<Vec<usize>> {
        let spec = self.spec()?;
        derive_tooth_faces(spec.tooth_count).ok()
    }

    /// Summarize the tracked gear as the host evaluates it.
    pub fn snapshot(&self, host: &dyn HostIntrospect) -> Result<GearSnapshot, GearError> {
        let state = self.current.ok_or(GearError::NotInitialized)?;
        let handle = state.handle;
        let unknown_mesh = || host_kernel::HostError::UnknownMesh(handle.mesh);
        let unknown_op = || host_kernel::HostError::UnknownExtrude(handle.extrude);

        let evaluated = host.evaluate(handle.mesh)?;
        Ok(GearSnapshot {
            spec: state.spec,
            subdivisions: host.subdivisions(handle.mesh).ok_or_else(unknown_mesh)?,
            tooth_faces: host.extrude_faces_of(handle.extrude).ok_or_else(unknown_op)?,
            translate: host.extrude_translate_of(handle.extrude).ok_or_else(unknown_op)?,
            extrude_name: host.extrude_name(handle.extrude).ok_or_else(unknown_op)?,
            vertex_count: evaluated.vertex_count(),
            face_count: evaluated.face_count(),
        })
    }

    fn state_for(&self, handle: &GearHandle) -> Result<GearState, GearError> {
        match self.current {
            Some(state) if state.handle.id == handle.id => Ok(state),
            _ => Err(GearError::NotInitialized),
        }
    }
}

/// Check the tooth faces against the host, then select and extrude them.
/// The selection is cleared on both paths.
fn extrude_teeth(
    host: &mut dyn HostBundle,
    mesh: MeshHandle,
    faces: &[usize],
    tooth_length: f64,
) -> Result<ExtrudeOpHandle, GearError> {
    teeth::verify_tooth_faces(host.as_introspect(), mesh, faces)?;

    host.clear_selection();
    let extruded = host
        .select_faces(mesh, faces)
        .and_then(|()| host.extrude_faces(mesh, faces, tooth_length));
    host.clear_selection();
    extruded.map_err(GearError::from)
}
