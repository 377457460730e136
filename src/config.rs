//! Story definition, loaded from JSON or taken from the built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::camera::DEFAULT_FOV;
use crate::caption::TypewriterTimings;
use crate::error::StoryError;
use crate::finale::Finale;
use crate::fog::FogRange;
use crate::math::{Pose, Rgb};
use crate::motion::{MotionProfile, MotionRequest};
use crate::sequencer::{Caption, SequencerTimings, ViewEntry};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start: Pose,
    pub fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start: Pose::from_arrays([-6.774, 0.835, 6.782], [0.0, 0.0, 7.0]),
            fov: DEFAULT_FOV,
        }
    }
}

/// Fog in place before any dissolve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub color: Rgb,
    pub range: FogRange,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            range: FogRange::new(10.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub views: Vec<ViewEntry>,
    pub timings: SequencerTimings,
    pub typewriter: TypewriterTimings,
    pub motion: MotionProfile,
    pub camera: CameraConfig,
    pub fog: FogConfig,
    pub finale: Finale,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            views: default_views(),
            timings: SequencerTimings::default(),
            typewriter: TypewriterTimings::default(),
            motion: MotionProfile::default(),
            camera: CameraConfig::default(),
            fog: FogConfig::default(),
            finale: Finale::default(),
        }
    }
}

fn view(position: [f32; 3], look_at: [f32; 3], title: &str, body: &str) -> ViewEntry {
    ViewEntry {
        pose: Pose::from_arrays(position, look_at),
        caption: Caption {
            title: title.to_string(),
            body: body.to_string(),
        },
    }
}

fn default_views() -> Vec<ViewEntry> {
    vec![
        view(
            [-6.774, 0.835, 6.782],
            [0.0, 0.0, 7.0],
            "Solitude and Persistence",
            "Starting out is feeling your way through the dark, a lonely and brave journey. \
             No one is coming to the rescue; only you can save yourself.",
        ),
        view(
            [-15.683, 3.047, 6.977],
            [0.0, 0.0, 0.0],
            "Courage and Adventure",
            "The joy of building something is that it never stops changing. \
             Life is never dull, so meet every uncertainty with courage.",
        ),
        view(
            [-1.602, -0.267, 13.709],
            [0.0, 0.0, 0.0],
            "A Fearless Heart",
            "In the end your heart decides everything: whether you hold firm, \
             whether you can overcome your fear and truly be fearless...",
        ),
    ]
}

impl StoryConfig {
    /// Read and validate a story from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading story: {:?}", path);

        let text =
            fs::read_to_string(path).context(format!("Failed to read story file: {:?}", path))?;
        let config = Self::from_json(&text).context(format!("Invalid story file: {:?}", path))?;

        log::info!("Story loaded: {} views", config.views.len());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("Failed to parse story JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StoryError> {
        if self.views.is_empty() {
            return Err(StoryError::NoViews);
        }
        for (index, view) in self.views.iter().enumerate() {
            MotionRequest::to(view.pose)
                .validate()
                .map_err(|source| StoryError::InvalidView { index, source })?;
        }
        self.timings.validate()?;
        self.motion.validate()?;

        if !self.typewriter.initial_delay.is_finite() || self.typewriter.initial_delay < 0.0 {
            return Err(StoryError::NonPositiveInterval {
                name: "initial_delay",
                value: self.typewriter.initial_delay,
            });
        }
        if !self.typewriter.char_interval.is_finite() || self.typewriter.char_interval <= 0.0 {
            return Err(StoryError::NonPositiveInterval {
                name: "char_interval",
                value: self.typewriter.char_interval,
            });
        }

        MotionRequest::to(self.camera.start)
            .validate()
            .map_err(StoryError::InvalidCamera)?;
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return Err(StoryError::InvalidFieldOfView(self.camera.fov));
        }

        if !self.fog.range.is_valid() {
            return Err(StoryError::InvalidFog);
        }
        self.finale.validate()
    }
}
