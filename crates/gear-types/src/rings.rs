use std::ops::Range;

use serde::{Deserialize, Serialize};

/// One of the four face rings of a pipe primitive.
///
/// A pipe with `spans` subdivisions has `4 * spans` faces, enumerated ring by
/// ring in declaration order: face `k` of ring `r` has index `r * spans + k`
/// and covers the angular sector `[k, k + 1) * 2π / spans`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FaceRing {
    /// Annulus at the top of the pipe, normal +Z.
    TopCap,
    /// Wall facing the axis.
    InnerWall,
    /// Wall facing away from the axis. Teeth are extruded from here.
    OuterWall,
    /// Annulus at the bottom of the pipe, normal -Z.
    BottomCap,
}

impl FaceRing {
    /// All rings in face enumeration order.
    pub const ALL: [FaceRing; 4] = [
        FaceRing::TopCap,
        FaceRing::InnerWall,
        FaceRing::OuterWall,
        FaceRing::BottomCap,
    ];

    /// Position of this ring in the enumeration.
    pub fn ordinal(self) -> usize {
        match self {
            FaceRing::TopCap => 0,
            FaceRing::InnerWall => 1,
            FaceRing::OuterWall => 2,
            FaceRing::BottomCap => 3,
        }
    }

    /// Face indices belonging to this ring for a pipe with `spans` subdivisions.
    pub fn range(self, spans: usize) -> Range<usize> {
        let start = self.ordinal() * spans;
        start..start + spans
    }

    /// Ring containing `face`, or `None` past the last ring.
    pub fn of_face(face: usize, spans: usize) -> Option<FaceRing> {
        if spans == 0 {
            return None;
        }
        Self::ALL.get(face / spans).copied()
    }
}

/// Total face count of a pipe with `spans` subdivisions.
pub fn pipe_face_count(spans: usize) -> usize {
    FaceRing::ALL.len() * spans
}
