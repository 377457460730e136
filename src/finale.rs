//! The closing flight: a two-leg camera move and a fog dissolve started
//! together. Neither waits for the other.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, StoryError};
use crate::fog::{FogDissolve, FogRange};
use crate::math::{Pose, Rgb};
use crate::motion::{CameraMotion, MotionRequest, RequestId};
use crate::traits::HasPosition;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogRamp {
    pub color: Rgb,
    pub from: FogRange,
    pub to: FogRange,
    pub duration_ms: u64,
}

impl Default for FogRamp {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            from: FogRange::new(10.0, 100.0),
            to: FogRange::new(0.0, 1.0),
            duration_ms: 5000,
        }
    }
}

impl FogRamp {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Finale {
    pub flight: MotionRequest,
    pub fog: FogRamp,
}

impl Default for Finale {
    fn default() -> Self {
        Self {
            flight: MotionRequest::via(
                Pose::from_arrays([0.0, 0.0, 13.709], [0.0, 0.0, -3.0]),
                Pose::from_arrays([0.0, 0.0, -6.0], [0.0, 0.0, -15.0]),
            ),
            fog: FogRamp::default(),
        }
    }
}

impl Finale {
    pub fn validate(&self) -> Result<(), StoryError> {
        self.flight.validate()?;
        if !self.fog.from.is_valid() || !self.fog.to.is_valid() {
            return Err(StoryError::InvalidFog);
        }
        Ok(())
    }

    /// Start the flight and the fog ramp in the same call.
    /// If the flight is rejected the fog is left alone.
    pub fn trigger<C: HasPosition>(
        &self,
        motion: &mut CameraMotion,
        fog: &mut FogDissolve,
        camera: &C,
        now: Duration,
    ) -> Result<RequestId, MotionError> {
        let id = motion.submit(self.flight, camera)?;
        fog.start(self.fog.color, self.fog.from, self.fog.to, self.fog.duration(), now);
        log::info!("Finale started, flight {:?}", id);
        Ok(id)
    }
}
