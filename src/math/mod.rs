mod color;
mod ease;
mod pose;

pub use color::{ParseColorError, Rgb};
pub use ease::{ease_out, lerp};
pub use pose::{Pose, MIN_FACING_DISTANCE_SQ};
