//! The playing story: sequencer, camera motion, fog and captions wired
//! together and driven from one frame callback.

use std::time::Duration;

use crate::caption::Typewriter;
use crate::config::StoryConfig;
use crate::error::{MotionError, StoryError};
use crate::finale::Finale;
use crate::fog::{FogDissolve, FogState};
use crate::math::Pose;
use crate::motion::{CameraMotion, MotionRequest, RequestId};
use crate::sequencer::{SequencerEvent, SequencerStatus, ViewSequencer};
use crate::traits::{CameraHandle, FogSink, HasPosition, StoryObserver};

pub struct Story {
    sequencer: ViewSequencer,
    motion: CameraMotion,
    fog: FogDissolve,
    typewriter: Typewriter,
    finale: Finale,
    start_pose: Pose,
    continue_available: bool,
    finale_flight: Option<RequestId>,
}

impl Story {
    pub fn new(config: &StoryConfig) -> Result<Self, StoryError> {
        config.validate()?;

        Ok(Self {
            sequencer: ViewSequencer::new(config.views.clone(), config.timings)?,
            motion: CameraMotion::new(config.motion, config.camera.start.look_at)?,
            fog: FogDissolve::new(FogState::new(config.fog.color, config.fog.range)),
            typewriter: Typewriter::new(config.typewriter),
            finale: config.finale,
            start_pose: config.camera.start,
            continue_available: false,
            finale_flight: None,
        })
    }

    pub fn sequencer(&self) -> &ViewSequencer {
        &self.sequencer
    }

    pub fn motion(&self) -> &CameraMotion {
        &self.motion
    }

    pub fn fog(&self) -> &FogDissolve {
        &self.fog
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// True once the last view is done and until the finale is triggered
    pub fn continue_available(&self) -> bool {
        self.continue_available
    }

    pub fn finale_started(&self) -> bool {
        self.finale_flight.is_some()
    }

    /// Place the camera, set the initial fog and enter the first view
    pub fn start<C, F, O>(&mut self, camera: &mut C, fog_sink: &mut F, observer: &mut O)
    where
        C: CameraHandle,
        F: FogSink,
        O: StoryObserver,
    {
        self.motion.place(self.start_pose, camera);
        let fog = self.fog.current();
        fog_sink.set_fog(fog.color, fog.near, fog.far);

        let events = self.sequencer.start();
        self.dispatch(events, camera, observer);
    }

    /// Cancel the view timers and hide the caption
    pub fn stop<O: StoryObserver>(&mut self, observer: &mut O) {
        self.sequencer.stop();
        self.hide_caption(observer);
    }

    /// Run one rendered frame. `delta` drives timers and motion, `now` the fog.
    pub fn frame<C, F, O>(
        &mut self,
        delta: f32,
        now: Duration,
        camera: &mut C,
        fog_sink: &mut F,
        observer: &mut O,
    ) where
        C: CameraHandle,
        F: FogSink,
        O: StoryObserver,
    {
        let events = self.sequencer.advance(delta);
        self.dispatch(events, camera, observer);

        if self.typewriter.advance(delta) {
            observer.on_caption_text(self.typewriter.title(), self.typewriter.body());
        }

        if let Some(done) = self.motion.tick(delta, camera) {
            if self.finale_flight == Some(done.id) {
                log::info!("Finale flight arrived");
            }
            observer.on_motion_complete(done.id);
        }

        self.fog.apply(now, fog_sink);
    }

    /// Redirect the camera. Replaces whatever motion is in flight.
    pub fn submit<C: HasPosition>(
        &mut self,
        request: MotionRequest,
        camera: &C,
    ) -> Result<RequestId, MotionError> {
        self.motion.submit(request, camera)
    }

    /// Start the closing flight and fog dissolve together. The view sequence
    /// is stopped first so no later view switch takes the camera away.
    pub fn trigger_finale<C, O>(
        &mut self,
        now: Duration,
        camera: &C,
        observer: &mut O,
    ) -> Result<RequestId, MotionError>
    where
        C: HasPosition,
        O: StoryObserver,
    {
        let id = self.finale.trigger(&mut self.motion, &mut self.fog, camera, now)?;

        if self.sequencer.status() == SequencerStatus::Running {
            self.stop(observer);
        }
        self.continue_available = false;
        self.finale_flight = Some(id);
        Ok(id)
    }

    fn hide_caption<O: StoryObserver>(&mut self, observer: &mut O) {
        if self.typewriter.is_visible() {
            self.typewriter.deactivate();
            observer.on_caption_change(false, self.sequencer.current_index());
        }
    }

    fn dispatch<C, O>(&mut self, events: Vec<SequencerEvent>, camera: &C, observer: &mut O)
    where
        C: HasPosition,
        O: StoryObserver,
    {
        for event in events {
            match event {
                SequencerEvent::ViewEntered { index, request } => {
                    if let Err(err) = self.motion.submit(request, camera) {
                        log::warn!("View {} not reachable: {}", index, err);
                    }
                }
                SequencerEvent::CaptionChanged { active, index } => {
                    if active {
                        self.typewriter
                            .activate(&self.sequencer.views()[index].caption);
                    } else {
                        self.typewriter.deactivate();
                    }
                    observer.on_caption_change(active, index);
                }
                SequencerEvent::SequenceComplete => {
                    self.continue_available = true;
                    observer.on_sequence_complete();
                }
            }
        }
    }
}
