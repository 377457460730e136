use glam::{Mat4, Vec3};

use crate::math::{Pose, MIN_FACING_DISTANCE_SQ};
use crate::traits::{HasFieldOfView, HasLookAt, HasPosition};

/// Pitch limit keeps `right()` defined when looking straight up or down
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

pub const DEFAULT_FOV: f32 = 45.0;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;

/// Host perspective camera: position plus yaw/pitch orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
}

impl Camera {
    /// Camera at `pose.position`, facing `pose.look_at` where possible
    pub fn new(pose: Pose, fov: f32) -> Self {
        let mut camera = Self {
            position: pose.position,
            yaw: 0.0,
            pitch: 0.0,
            fov,
        };
        camera.look_at(pose.look_at);
        camera
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Pose::new(Vec3::Z, Vec3::ZERO), DEFAULT_FOV)
    }
}

impl HasPosition for Camera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

impl HasLookAt for Camera {
    fn look_at(&mut self, target: Vec3) -> bool {
        let offset = target - self.position;
        if !offset.is_finite() || offset.length_squared() <= MIN_FACING_DISTANCE_SQ {
            return false;
        }

        let dir = offset.normalize();
        self.yaw = dir.x.atan2(dir.z);
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH);
        true
    }
}

impl HasFieldOfView for Camera {
    fn fov(&self) -> f32 {
        self.fov
    }
}
