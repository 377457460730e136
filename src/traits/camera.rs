use glam::Vec3;

/// Readable and writable camera position
pub trait HasPosition {
    /// Camera position in world space
    fn position(&self) -> Vec3;

    /// Move the camera without changing its orientation
    fn set_position(&mut self, position: Vec3);
}

/// Camera orientation driven by a look-at point
pub trait HasLookAt {
    /// Orient the camera towards `target`.
    /// Returns false and keeps the previous orientation when the target
    /// coincides with the camera position.
    fn look_at(&mut self, target: Vec3) -> bool;
}

/// Perspective projection parameter
pub trait HasFieldOfView {
    /// Vertical field of view in degrees
    fn fov(&self) -> f32;
}

/// Everything the motion controller needs from a host camera
pub trait CameraHandle: HasPosition + HasLookAt {}

impl<T: HasPosition + HasLookAt> CameraHandle for T {}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock camera recording the order of writes
    struct MockCamera {
        position: Vec3,
        target: Option<Vec3>,
        writes: Vec<&'static str>,
    }

    impl HasPosition for MockCamera {
        fn position(&self) -> Vec3 {
            self.position
        }

        fn set_position(&mut self, position: Vec3) {
            self.position = position;
            self.writes.push("position");
        }
    }

    impl HasLookAt for MockCamera {
        fn look_at(&mut self, target: Vec3) -> bool {
            if target == self.position {
                return false;
            }
            self.target = Some(target);
            self.writes.push("look_at");
            true
        }
    }

    fn drive<C: CameraHandle>(camera: &mut C, position: Vec3, target: Vec3) -> bool {
        camera.set_position(position);
        camera.look_at(target)
    }

    #[test]
    fn test_blanket_camera_handle() {
        let mut camera = MockCamera {
            position: Vec3::ZERO,
            target: None,
            writes: Vec::new(),
        };

        assert!(drive(&mut camera, Vec3::X, Vec3::Z));
        assert_eq!(camera.position(), Vec3::X);
        assert_eq!(camera.target, Some(Vec3::Z));
        assert_eq!(camera.writes, vec!["position", "look_at"]);
    }

    #[test]
    fn test_degenerate_look_at_rejected() {
        let mut camera = MockCamera {
            position: Vec3::ZERO,
            target: Some(Vec3::Z),
            writes: Vec::new(),
        };

        assert!(!drive(&mut camera, Vec3::ONE, Vec3::ONE));
        assert_eq!(camera.target, Some(Vec3::Z));
    }
}
