use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Squared distance under which a look-at point is treated as coincident
/// with the camera position (no defined facing direction)
pub const MIN_FACING_DISTANCE_SQ: f32 = 1e-10;

/// A camera placement: where it sits and the point it looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Pose {
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    pub fn from_arrays(position: [f32; 3], look_at: [f32; 3]) -> Self {
        Self::new(Vec3::from_array(position), Vec3::from_array(look_at))
    }

    /// Interpolate position and look-at independently
    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            position: self.position.lerp(other.position, t),
            look_at: self.look_at.lerp(other.look_at, t),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.look_at.is_finite()
    }

    /// Whether the look-at point yields a usable orientation
    pub fn has_defined_facing(&self) -> bool {
        (self.look_at - self.position).length_squared() > MIN_FACING_DISTANCE_SQ
    }

    /// Largest of the position and look-at distances
    pub fn distance(&self, other: &Pose) -> f32 {
        self.position
            .distance(other.position)
            .max(self.look_at.distance(other.look_at))
    }
}

// Three decimals, the precision the camera readout is shown with
impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pos ({:.3}, {:.3}, {:.3}) -> look ({:.3}, {:.3}, {:.3})",
            self.position.x,
            self.position.y,
            self.position.z,
            self.look_at.x,
            self.look_at.y,
            self.look_at.z
        )
    }
}
