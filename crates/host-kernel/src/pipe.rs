//! Explicit pipe primitive.
//!
//! The pipe is an annular tube centered on the origin along +Z. Vertices are
//! laid out as four circles of `spans` points each (outer top, outer bottom,
//! inner top, inner bottom); faces follow the [`FaceRing`] order.

use std::f64::consts::TAU;

use gear_types::{FaceRing, PipeProfile};
use nalgebra::Point3;
use tracing::{debug, instrument};

use crate::types::{EvaluatedMesh, FaceOrigin, HostError, MeshFace};

/// Smallest subdivision count that still encloses a volume.
pub const MIN_SUBDIVISIONS: u32 = 3;

/// Build a pipe with `spans` subdivisions around its axis.
#[instrument(skip(profile))]
pub fn build_pipe(profile: &PipeProfile, spans: u32) -> Result<EvaluatedMesh, HostError> {
    if spans < MIN_SUBDIVISIONS {
        return Err(HostError::DegenerateSubdivisions {
            subdivisions: spans,
            min: MIN_SUBDIVISIONS,
        });
    }
    if !profile.is_valid() {
        return Err(HostError::Rejected {
            operation: "create_tube".to_string(),
            reason: format!("invalid pipe profile {profile:?}"),
        });
    }

    let n = spans as usize;
    let half = profile.height / 2.0;
    let circles = [
        (profile.outer_radius, half),
        (profile.outer_radius, -half),
        (profile.inner_radius(), half),
        (profile.inner_radius(), -half),
    ];

    let mut positions = Vec::with_capacity(4 * n);
    for (radius, z) in circles {
        for i in 0..n {
            let angle = TAU * i as f64 / n as f64;
            positions.push(Point3::new(radius * angle.cos(), radius * angle.sin(), z));
        }
    }

    let outer_top = |i: usize| i % n;
    let outer_bottom = |i: usize| n + i % n;
    let inner_top = |i: usize| 2 * n + i % n;
    let inner_bottom = |i: usize| 3 * n + i % n;

    let mut faces = Vec::with_capacity(4 * n);
    for ring in FaceRing::ALL {
        for k in 0..n {
            let corners = match ring {
                FaceRing::TopCap => [
                    inner_top(k),
                    outer_top(k),
                    outer_top(k + 1),
                    inner_top(k + 1),
                ],
                FaceRing::InnerWall => [
                    inner_bottom(k),
                    inner_top(k),
                    inner_top(k + 1),
                    inner_bottom(k + 1),
                ],
                FaceRing::OuterWall => [
                    outer_bottom(k),
                    outer_bottom(k + 1),
                    outer_top(k + 1),
                    outer_top(k),
                ],
                FaceRing::BottomCap => [
                    inner_bottom(k),
                    inner_bottom(k + 1),
                    outer_bottom(k + 1),
                    outer_bottom(k),
                ],
            };
            faces.push(MeshFace {
                corners,
                origin: FaceOrigin::Primitive(ring),
            });
        }
    }

    debug!(vertices = positions.len(), faces = faces.len(), "built pipe");
    Ok(EvaluatedMesh { positions, faces })
}
