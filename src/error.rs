use thiserror::Error;

/// Rejected motion request. The in-flight motion is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MotionError {
    #[error("motion request has a non-finite {field}")]
    NonFinite { field: &'static str },
}

/// Story configuration that cannot be played
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoryError {
    #[error("story has no views")]
    NoViews,

    #[error("{name} must be a positive number of seconds, got {value}")]
    NonPositiveInterval { name: &'static str, value: f32 },

    #[error("motion rate must be positive and finite, got {0}")]
    InvalidRate(f32),

    #[error("ease exponent must be at least 1, got {0}")]
    InvalidExponent(i32),

    #[error("view {index}: {source}")]
    InvalidView { index: usize, source: MotionError },

    #[error("camera start: {0}")]
    InvalidCamera(MotionError),

    #[error("field of view must be within (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("finale: {0}")]
    InvalidFinale(#[from] MotionError),

    #[error("fog distances must be finite and non-negative")]
    InvalidFog,
}
