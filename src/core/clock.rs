use std::time::{Duration, Instant};

/// Frame clock for the story host.
/// Deltas drive timers and camera motion, elapsed time drives the fog ramp.
#[derive(Debug)]
pub struct Clock {
    origin: Instant,
    last_frame: Instant,
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            last_frame: now,
        }
    }

    /// Seconds since the previous frame; marks this frame
    pub fn tick(&mut self) -> f32 {
        let frame = Instant::now();
        let delta = frame.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = frame;
        delta
    }

    /// Wall-clock time from creation to the most recent frame
    pub fn elapsed(&self) -> Duration {
        self.last_frame.saturating_duration_since(self.origin)
    }

    /// Drop the time spent since the last frame from the next delta.
    /// Elapsed time keeps its origin.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn delta_covers_sleep() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        assert!(delta >= 0.01);
        assert!(delta < 0.5);
    }

    #[test]
    fn elapsed_is_frame_time() {
        let mut clock = Clock::new();
        assert_eq!(clock.elapsed(), Duration::ZERO);

        thread::sleep(Duration::from_millis(5));
        let delta = clock.tick();

        let elapsed = clock.elapsed().as_secs_f32();
        assert!((elapsed - delta).abs() < 1e-3);
    }

    #[test]
    fn reset_keeps_origin() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(5));
        clock.reset();
        let delta = clock.tick();

        assert!(clock.elapsed() >= Duration::from_millis(5));
        assert!(clock.elapsed().as_secs_f32() > delta);
    }
}
