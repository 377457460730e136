//! Wall-clock fog dissolve.
//!
//! Unlike the camera, the fog ramp is not integrated from frame deltas: each
//! sample recomputes progress from the wall-clock time the ramp started.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::math::{lerp, Rgb};
use crate::traits::FogSink;

/// Linear fog distances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogRange {
    pub near: f32,
    pub far: f32,
}

impl FogRange {
    pub const fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    pub fn lerp(&self, other: &FogRange, t: f32) -> FogRange {
        FogRange {
            near: lerp(self.near, other.near, t),
            far: lerp(self.far, other.far, t),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.near.is_finite() && self.far.is_finite() && self.near >= 0.0 && self.far >= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogState {
    pub color: Rgb,
    pub near: f32,
    pub far: f32,
}

impl FogState {
    pub fn new(color: Rgb, range: FogRange) -> Self {
        Self {
            color,
            near: range.near,
            far: range.far,
        }
    }

    pub fn range(&self) -> FogRange {
        FogRange::new(self.near, self.far)
    }
}

#[derive(Debug, Clone, Copy)]
struct Ramp {
    color: Rgb,
    from: FogRange,
    to: FogRange,
    started: Duration,
    duration: Duration,
}

impl Ramp {
    fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }
}

/// One-shot fog ramp, sampled once per rendered frame
#[derive(Debug, Clone)]
pub struct FogDissolve {
    ramp: Option<Ramp>,
    current: FogState,
}

impl FogDissolve {
    pub fn new(initial: FogState) -> Self {
        Self {
            ramp: None,
            current: initial,
        }
    }

    /// Last emitted fog
    pub fn current(&self) -> FogState {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.ramp.is_some()
    }

    /// Begin a ramp at `now`. A ramp already running is replaced, not queued.
    pub fn start(&mut self, color: Rgb, from: FogRange, to: FogRange, duration: Duration, now: Duration) {
        if self.ramp.is_some() {
            log::debug!("Fog ramp restarted");
        }
        log::debug!(
            "Fog ramp {:?} -> {:?} over {}ms",
            from,
            to,
            duration.as_millis()
        );
        self.ramp = Some(Ramp {
            color,
            from,
            to,
            started: now,
            duration,
        });
    }

    /// Progress of the running ramp at `now`
    pub fn progress(&self, now: Duration) -> Option<f32> {
        self.ramp.map(|ramp| ramp.progress(now))
    }

    /// Fog at `now`. The final sample is exactly the `to` range and ends the
    /// ramp; later samples return None.
    pub fn sample(&mut self, now: Duration) -> Option<FogState> {
        let ramp = self.ramp?;
        let progress = ramp.progress(now);

        let range = if progress >= 1.0 {
            self.ramp = None;
            log::debug!("Fog ramp finished at {:?}", ramp.to);
            ramp.to
        } else {
            ramp.from.lerp(&ramp.to, progress)
        };

        self.current = FogState::new(ramp.color, range);
        Some(self.current)
    }

    /// Sample and push the result to the host. Returns whether a sample was taken.
    pub fn apply<S: FogSink>(&mut self, now: Duration, sink: &mut S) -> bool {
        match self.sample(now) {
            Some(fog) => {
                sink.set_fog(fog.color, fog.near, fog.far);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn dissolve() -> FogDissolve {
        FogDissolve::new(FogState::new(Rgb::BLACK, FogRange::new(10.0, 100.0)))
    }

    #[test]
    fn idle_dissolve_emits_nothing() {
        let mut fog = dissolve();
        assert_eq!(fog.sample(ms(1000)), None);
        assert_eq!(fog.current().range(), FogRange::new(10.0, 100.0));
    }

    #[test]
    fn progress_is_relative_to_start() {
        let mut fog = dissolve();
        fog.start(Rgb::WHITE, FogRange::new(10.0, 100.0), FogRange::new(0.0, 1.0), ms(1000), ms(3000));

        assert_eq!(fog.progress(ms(3000)), Some(0.0));
        assert_eq!(fog.progress(ms(3250)), Some(0.25));
        // Time before the start clamps to zero
        assert_eq!(fog.progress(ms(2000)), Some(0.0));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut fog = dissolve();
        fog.start(Rgb::WHITE, FogRange::new(10.0, 100.0), FogRange::new(0.0, 1.0), Duration::ZERO, ms(0));

        let sample = fog.sample(ms(0)).unwrap();
        assert_eq!(sample.range(), FogRange::new(0.0, 1.0));
        assert!(!fog.is_active());
    }

    #[test]
    fn restart_replaces_running_ramp() {
        let mut fog = dissolve();
        let from = FogRange::new(10.0, 100.0);
        let to = FogRange::new(0.0, 1.0);
        fog.start(Rgb::WHITE, from, to, ms(1000), ms(0));
        fog.sample(ms(900));

        fog.start(Rgb::WHITE, from, to, ms(1000), ms(1000));
        let sample = fog.sample(ms(1500)).unwrap();

        assert_eq!(sample.near, 5.0);
        assert!(fog.is_active());
    }

    #[test]
    fn color_is_applied_with_every_sample() {
        let mut fog = dissolve();
        fog.start(Rgb::WHITE, FogRange::new(10.0, 100.0), FogRange::new(0.0, 1.0), ms(1000), ms(0));

        assert_eq!(fog.sample(ms(10)).unwrap().color, Rgb::WHITE);
        assert_eq!(fog.current().color, Rgb::WHITE);
    }

    #[test]
    fn range_validation() {
        assert!(FogRange::new(0.0, 1.0).is_valid());
        assert!(!FogRange::new(-1.0, 1.0).is_valid());
        assert!(!FogRange::new(0.0, f32::NAN).is_valid());
    }
}
