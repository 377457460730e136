//! Camera motion controller.
//!
//! Moves the live camera towards the most recent [`MotionRequest`] with an
//! eased interpolation, optionally flying through a waypoint first. A new
//! request always starts from wherever the camera is right now, so
//! replacing a request mid-flight never makes the camera jump.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{MotionError, StoryError};
use crate::math::{ease_out, Pose};
use crate::traits::{CameraHandle, HasPosition};

/// Progress at which a leg counts as arrived, absorbs float accumulation
pub const ARRIVAL_THRESHOLD: f32 = 0.999;

/// Blend rate and ease exponent of a camera flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionProfile {
    /// Leg progress gained per second
    pub rate: f32,
    /// Exponent of the ease-out curve
    pub exponent: i32,
}

impl MotionProfile {
    /// Slow two-leg flight used for view changes and the finale
    pub const WAYPOINT_FLIGHT: MotionProfile = MotionProfile {
        rate: 0.8,
        exponent: 2,
    };

    /// Snappier follow with a stronger ease-out
    pub const CAMERA_INFO: MotionProfile = MotionProfile {
        rate: 1.2,
        exponent: 3,
    };

    pub fn validate(&self) -> Result<(), StoryError> {
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(StoryError::InvalidRate(self.rate));
        }
        if self.exponent < 1 {
            return Err(StoryError::InvalidExponent(self.exponent));
        }
        Ok(())
    }

    /// Seconds a single leg takes to arrive
    pub fn leg_duration(&self) -> f32 {
        ARRIVAL_THRESHOLD / self.rate
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::WAYPOINT_FLIGHT
    }
}

/// Intermediate placement in the host's array form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub mid_position: [f32; 3],
    pub mid_look_at: [f32; 3],
}

/// Where the camera should go, optionally through a waypoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionRequest {
    pub target: Pose,
    #[serde(default)]
    pub waypoint: Option<Pose>,
}

impl MotionRequest {
    /// Single leg straight to `target`
    pub fn to(target: Pose) -> Self {
        Self {
            target,
            waypoint: None,
        }
    }

    /// Two legs: to `waypoint`, then on to `target`
    pub fn via(waypoint: Pose, target: Pose) -> Self {
        Self {
            target,
            waypoint: Some(waypoint),
        }
    }

    pub fn from_arrays(position: [f32; 3], look_at: [f32; 3], waypoint: Option<Waypoint>) -> Self {
        Self {
            target: Pose::from_arrays(position, look_at),
            waypoint: waypoint.map(|w| Pose::from_arrays(w.mid_position, w.mid_look_at)),
        }
    }

    pub fn validate(&self) -> Result<(), MotionError> {
        if !self.target.position.is_finite() {
            return Err(MotionError::NonFinite {
                field: "target position",
            });
        }
        if !self.target.look_at.is_finite() {
            return Err(MotionError::NonFinite {
                field: "target look-at",
            });
        }
        if let Some(waypoint) = &self.waypoint {
            if !waypoint.position.is_finite() {
                return Err(MotionError::NonFinite {
                    field: "waypoint position",
                });
            }
            if !waypoint.look_at.is_finite() {
                return Err(MotionError::NonFinite {
                    field: "waypoint look-at",
                });
            }
        }
        Ok(())
    }
}

/// Identifies an accepted request in completion signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Flying to the waypoint
    One,
    /// Flying to the final target
    Two,
}

/// In-flight motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub id: RequestId,
    pub phase: Phase,
    pub progress: f32,
    pub leg_start: Pose,
    pub leg_end: Pose,
    pub final_target: Pose,
}

/// Raised once when a request's final target is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionComplete {
    pub id: RequestId,
}

/// Owns the live camera pose while a request is in flight
#[derive(Debug, Clone)]
pub struct CameraMotion {
    profile: MotionProfile,
    state: Option<MotionState>,
    look_at: Vec3,
    next_id: u64,
}

impl CameraMotion {
    /// `look_at` is the point the host camera faces initially
    pub fn new(profile: MotionProfile, look_at: Vec3) -> Result<Self, StoryError> {
        profile.validate()?;
        Ok(Self {
            profile,
            state: None,
            look_at,
            next_id: 0,
        })
    }

    pub fn profile(&self) -> MotionProfile {
        self.profile
    }

    /// Takes effect from the next tick, including for the in-flight request.
    /// An invalid profile is rejected and the current one kept.
    pub fn set_profile(&mut self, profile: MotionProfile) -> Result<(), StoryError> {
        profile.validate()?;
        self.profile = profile;
        Ok(())
    }

    pub fn state(&self) -> Option<&MotionState> {
        self.state.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Look-at point most recently applied
    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn live_pose<C: HasPosition>(&self, camera: &C) -> Pose {
        Pose::new(camera.position(), self.look_at)
    }

    /// Put the camera at `pose` immediately, dropping any in-flight motion
    pub fn place<C: CameraHandle>(&mut self, pose: Pose, camera: &mut C) {
        self.state = None;
        self.apply(pose, camera);
    }

    /// Replace any in-flight motion with `request`, starting from the live pose
    pub fn submit<C: HasPosition>(
        &mut self,
        request: MotionRequest,
        camera: &C,
    ) -> Result<RequestId, MotionError> {
        if let Err(err) = request.validate() {
            log::warn!("Rejected motion request: {}", err);
            return Err(err);
        }

        let id = RequestId(self.next_id);
        self.next_id += 1;

        let (phase, leg_end) = match request.waypoint {
            Some(waypoint) => (Phase::One, waypoint),
            None => (Phase::Two, request.target),
        };
        let leg_start = self.live_pose(camera);

        if let Some(previous) = &self.state {
            log::debug!("Motion {:?} preempted by {:?}", previous.id, id);
        }
        log::debug!(
            "Motion {:?} from {} to {}, {:.2}s per leg",
            id,
            leg_start,
            request.target,
            self.profile.leg_duration()
        );

        self.state = Some(MotionState {
            id,
            phase,
            progress: 0.0,
            leg_start,
            leg_end,
            final_target: request.target,
        });
        Ok(id)
    }

    /// Advance the in-flight motion by `delta` seconds.
    /// Returns the completion exactly once, on the tick the target is reached.
    pub fn tick<C: CameraHandle>(&mut self, delta: f32, camera: &mut C) -> Option<MotionComplete> {
        let delta = if delta.is_finite() && delta > 0.0 {
            delta
        } else {
            0.0
        };
        let profile = self.profile;
        let mut state = self.state?;

        state.progress = (state.progress + delta * profile.rate).min(1.0);
        let arrived = state.progress >= ARRIVAL_THRESHOLD;

        // Arrival writes the leg end itself, lerp at 1.0 can be off by an ulp
        let pose = if arrived {
            state.leg_end
        } else {
            let t = ease_out(state.progress, profile.exponent);
            state.leg_start.lerp(&state.leg_end, t)
        };
        self.apply(pose, camera);

        if !arrived {
            self.state = Some(state);
            return None;
        }

        match state.phase {
            Phase::One => {
                log::debug!("Motion {:?} reached waypoint {}", state.id, pose);
                state.leg_start = state.leg_end;
                state.leg_end = state.final_target;
                state.phase = Phase::Two;
                state.progress = 0.0;
                self.state = Some(state);
                None
            }
            Phase::Two => {
                log::debug!("Motion {:?} arrived at {}", state.id, pose);
                self.state = None;
                Some(MotionComplete { id: state.id })
            }
        }
    }

    // Position first, then orientation
    fn apply<C: CameraHandle>(&mut self, pose: Pose, camera: &mut C) {
        camera.set_position(pose.position);
        self.look_at = pose.look_at;

        if !pose.has_defined_facing() || !camera.look_at(pose.look_at) {
            log::debug!("Look-at {:?} coincides with camera, holding orientation", pose.look_at);
        }
    }
}
