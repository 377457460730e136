use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::motion::MotionProfile;

#[derive(Parser, Debug, Clone)]
#[command(name = "scroll-story")]
#[command(about = "Scroll-story camera choreography", long_about = None)]
pub struct Cli {
    /// Story definition (JSON). Built-in story when omitted
    #[arg(long)]
    pub story: Option<PathBuf>,

    /// Run without a window, on a fixed time step
    #[arg(long, default_value = "false")]
    pub headless: bool,

    /// Headless frame rate
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Headless run length in seconds
    #[arg(long, default_value_t = 90.0)]
    pub duration: f32,

    /// Play the finale as soon as the continue prompt appears
    #[arg(long = "auto-finale", default_value = "false")]
    pub auto_finale: bool,

    /// Override the story's camera motion profile
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileArg {
    Waypoint,
    CameraInfo,
}

impl From<ProfileArg> for MotionProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Waypoint => MotionProfile::WAYPOINT_FLIGHT,
            ProfileArg::CameraInfo => MotionProfile::CAMERA_INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["scroll-story"]);
        assert!(!cli.headless);
        assert_eq!(cli.fps, 60.0);
        assert!(cli.story.is_none());
        assert!(cli.profile.is_none());
    }

    #[test]
    fn headless_run() {
        let cli = Cli::parse_from([
            "scroll-story",
            "--headless",
            "--auto-finale",
            "--duration",
            "120",
            "--profile",
            "camera-info",
        ]);
        assert!(cli.headless);
        assert!(cli.auto_finale);
        assert_eq!(cli.duration, 120.0);
        assert_eq!(cli.profile.map(MotionProfile::from), Some(MotionProfile::CAMERA_INFO));
    }
}
