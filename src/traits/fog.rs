use crate::math::Rgb;

/// Host fog parameters - linear fog between `near` and `far`
pub trait FogSink {
    /// Replace the scene fog
    fn set_fog(&mut self, color: Rgb, near: f32, far: f32);
}
