/// Ease-out remapping `1 - (1 - t)^exponent`: fast start, slow arrival.
/// Input is clamped to [0, 1]; the end points map to exactly 0 and 1.
pub fn ease_out(t: f32, exponent: i32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(exponent)
}

/// Scalar linear interpolation
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}
