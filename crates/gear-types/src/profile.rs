//! Dimensions of the pipe primitive the gear is built from.

use serde::{Deserialize, Serialize};

/// Cross-section and height of a pipe primitive.
///
/// Defaults follow the usual host pipe primitive: outer radius 1, wall
/// thickness 0.5, height 2, centered on the origin along +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeProfile {
    /// Radius of the outer wall.
    pub outer_radius: f64,
    /// Wall thickness; the inner radius is `outer_radius - thickness`.
    pub thickness: f64,
    /// Distance between the two caps.
    pub height: f64,
}

impl Default for PipeProfile {
    fn default() -> Self {
        Self {
            outer_radius: 1.0,
            thickness: 0.5,
            height: 2.0,
        }
    }
}

impl PipeProfile {
    pub fn inner_radius(&self) -> f64 {
        self.outer_radius - self.thickness
    }

    /// True when every dimension is finite and the pipe has a non-empty wall.
    pub fn is_valid(&self) -> bool {
        [self.outer_radius, self.thickness, self.height]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
            && self.inner_radius() > 0.0
    }
}
