use std::time::Duration;

use glam::Vec3;
use scroll_story::math::Rgb;
use scroll_story::motion::RequestId;
use scroll_story::sequencer::SequencerStatus;
use scroll_story::traits::{FogSink, HasLookAt, HasPosition, StoryObserver};
use scroll_story::{Story, StoryConfig};

const STEP: f32 = 0.5;

#[derive(Default)]
struct TestCamera {
    position: Vec3,
    target: Vec3,
}

impl HasPosition for TestCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

impl HasLookAt for TestCamera {
    fn look_at(&mut self, target: Vec3) -> bool {
        if target == self.position {
            return false;
        }
        self.target = target;
        true
    }
}

#[derive(Default)]
struct TestFog {
    last: Option<(Rgb, f32, f32)>,
    writes: usize,
}

impl FogSink for TestFog {
    fn set_fog(&mut self, color: Rgb, near: f32, far: f32) {
        self.last = Some((color, near, far));
        self.writes += 1;
    }
}

#[derive(Default)]
struct Recorder {
    captions: Vec<(bool, usize)>,
    titles: Vec<String>,
    completions: usize,
    arrivals: Vec<RequestId>,
}

impl StoryObserver for Recorder {
    fn on_caption_change(&mut self, active: bool, view_index: usize) {
        self.captions.push((active, view_index));
    }

    fn on_caption_text(&mut self, title: &str, _body: &str) {
        self.titles.push(title.to_string());
    }

    fn on_sequence_complete(&mut self) {
        self.completions += 1;
    }

    fn on_motion_complete(&mut self, id: RequestId) {
        self.arrivals.push(id);
    }
}

struct Harness {
    story: Story,
    camera: TestCamera,
    fog: TestFog,
    recorder: Recorder,
    elapsed: f32,
}

impl Harness {
    fn start() -> Self {
        let mut harness = Self {
            story: Story::new(&StoryConfig::default()).unwrap(),
            camera: TestCamera::default(),
            fog: TestFog::default(),
            recorder: Recorder::default(),
            elapsed: 0.0,
        };
        harness
            .story
            .start(&mut harness.camera, &mut harness.fog, &mut harness.recorder);
        harness
    }

    fn now(&self) -> Duration {
        Duration::from_secs_f32(self.elapsed)
    }

    fn run(&mut self, seconds: f32) {
        let steps = (seconds / STEP) as usize;
        for _ in 0..steps {
            self.elapsed += STEP;
            let now = self.now();
            self.story.frame(
                STEP,
                now,
                &mut self.camera,
                &mut self.fog,
                &mut self.recorder,
            );
        }
    }

    fn finale(&mut self) -> RequestId {
        let now = self.now();
        self.story
            .trigger_finale(now, &self.camera, &mut self.recorder)
            .unwrap()
    }
}

#[cfg(test)]
mod story_tests {
    use super::*;

    #[test]
    fn test_start_places_camera_and_fog() {
        let harness = Harness::start();
        let config = StoryConfig::default();

        assert_eq!(harness.camera.position, config.camera.start.position);
        assert_eq!(harness.camera.target, config.camera.start.look_at);
        assert_eq!(harness.fog.last, Some((Rgb::BLACK, 10.0, 100.0)));
        assert_eq!(harness.recorder.captions, vec![(true, 0)]);
        assert!(!harness.story.continue_available());
    }

    #[test]
    fn test_typewriter_reveals_first_title() {
        let mut harness = Harness::start();

        harness.run(1.5);
        assert!(harness.recorder.titles.is_empty());

        harness.run(10.0);
        assert_eq!(
            harness.recorder.titles.last().map(String::as_str),
            Some("Solitude and Persistence")
        );
    }

    #[test]
    fn test_camera_follows_views() {
        let mut harness = Harness::start();
        let views = StoryConfig::default().views;

        harness.run(30.0);
        assert_eq!(harness.story.sequencer().current_index(), 1);
        assert_eq!(harness.camera.position, views[1].pose.position);

        harness.run(25.0);
        assert_eq!(harness.story.sequencer().current_index(), 2);
        assert_eq!(harness.camera.position, views[2].pose.position);
        assert_eq!(harness.story.motion().look_at(), views[2].pose.look_at);
    }

    #[test]
    fn test_continue_offered_once_sequence_ends() {
        let mut harness = Harness::start();

        harness.run(70.0);
        assert!(!harness.story.continue_available());

        harness.run(0.5);
        assert!(harness.story.continue_available());
        assert_eq!(harness.recorder.completions, 1);
        assert_eq!(harness.recorder.captions.last(), Some(&(false, 2)));

        harness.run(30.0);
        assert_eq!(harness.recorder.completions, 1);
    }

    #[test]
    fn test_full_story_through_finale() {
        let mut harness = Harness::start();
        harness.run(71.0);
        assert!(harness.story.continue_available());
        let fog_writes = harness.fog.writes;

        let id = harness.finale();
        assert!(harness.story.finale_started());
        assert!(!harness.story.continue_available());
        assert_eq!(harness.story.sequencer().status(), SequencerStatus::Stopped);

        // Fog is halfway after 2.5 s of wall-clock time
        harness.run(2.5);
        let (color, near, far) = harness.fog.last.unwrap();
        assert_eq!(color, Rgb::WHITE);
        assert!((near - 5.0).abs() < 1e-3);
        assert!((far - 50.5).abs() < 1e-3);

        harness.run(10.0);
        assert_eq!(harness.fog.last, Some((Rgb::WHITE, 0.0, 1.0)));
        assert_eq!(harness.recorder.arrivals.last(), Some(&id));
        assert_eq!(harness.camera.position, Vec3::new(0.0, 0.0, -6.0));
        assert_eq!(harness.camera.target, Vec3::new(0.0, 0.0, -15.0));

        // The ramp stops writing once it has landed
        let writes = harness.fog.writes;
        assert!(writes > fog_writes);
        harness.run(5.0);
        assert_eq!(harness.fog.writes, writes);
    }

    #[test]
    fn test_early_finale_stops_view_switches() {
        let mut harness = Harness::start();
        harness.run(10.0);

        harness.finale();
        assert_eq!(harness.recorder.captions.last(), Some(&(false, 0)));

        harness.run(100.0);
        assert_eq!(harness.story.sequencer().current_index(), 0);
        assert_eq!(harness.recorder.completions, 0);
        assert_eq!(harness.camera.position, Vec3::new(0.0, 0.0, -6.0));
    }

    #[test]
    fn test_stop_hides_caption_and_freezes_sequence() {
        let mut harness = Harness::start();
        harness.run(5.0);

        harness.story.stop(&mut harness.recorder);
        assert_eq!(harness.recorder.captions, vec![(true, 0), (false, 0)]);
        assert!(!harness.story.sequencer().caption_active());

        harness.run(60.0);
        assert_eq!(harness.story.sequencer().current_index(), 0);
        assert!(!harness.story.continue_available());
    }
}
