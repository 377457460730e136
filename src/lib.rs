pub mod camera;
pub mod caption;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod finale;
pub mod fog;
pub mod math;
pub mod motion;
pub mod sequencer;
pub mod story;
pub mod traits;

pub use camera::Camera;
pub use config::StoryConfig;
pub use error::{MotionError, StoryError};
pub use finale::Finale;
pub use fog::{FogDissolve, FogRange, FogState};
pub use math::Pose;
pub use motion::{CameraMotion, MotionComplete, MotionProfile, MotionRequest, Phase, RequestId, Waypoint};
pub use sequencer::{SequencerEvent, ViewSequencer};
pub use story::Story;
