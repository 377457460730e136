//! Timed walk over the story's views.
//!
//! The sequencer never calls the camera itself. It reports what happened as
//! [`SequencerEvent`]s and the owner forwards them.

use serde::{Deserialize, Serialize};

use crate::core::timer::{TimerId, TimerQueue};
use crate::error::StoryError;
use crate::math::Pose;
use crate::motion::MotionRequest;

/// Text shown while a view is on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caption {
    pub title: String,
    pub body: String,
}

/// One stop of the story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewEntry {
    pub pose: Pose,
    pub caption: Caption,
}

/// Cadence of the sequencer, all in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerTimings {
    /// Time spent on each view before switching to the next
    pub switch_interval: f32,
    /// Caption lifetime on the first view
    pub first_caption: f32,
    /// Caption lifetime on every later view
    pub caption: f32,
    /// Pause between the last caption fading and the sequence completing
    pub reveal_delay: f32,
}

impl Default for SequencerTimings {
    fn default() -> Self {
        Self {
            switch_interval: 25.0,
            first_caption: 15.0,
            caption: 20.0,
            reveal_delay: 0.5,
        }
    }
}

impl SequencerTimings {
    pub fn validate(&self) -> Result<(), StoryError> {
        let positive = [
            ("switch_interval", self.switch_interval),
            ("first_caption", self.first_caption),
            ("caption", self.caption),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(StoryError::NonPositiveInterval { name, value });
            }
        }
        if !self.reveal_delay.is_finite() || self.reveal_delay < 0.0 {
            return Err(StoryError::NonPositiveInterval {
                name: "reveal_delay",
                value: self.reveal_delay,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    Switch,
    CaptionOff,
    Reveal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerStatus {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerState {
    pub current_index: usize,
    pub caption_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SequencerEvent {
    /// A view became current; the camera should head to its pose
    ViewEntered {
        index: usize,
        request: MotionRequest,
    },
    CaptionChanged {
        active: bool,
        index: usize,
    },
    /// The last view's caption has gone; the host may offer to continue
    SequenceComplete,
}

pub struct ViewSequencer {
    views: Vec<ViewEntry>,
    timings: SequencerTimings,
    timers: TimerQueue<Tick>,
    switch_timer: Option<TimerId>,
    caption_timer: Option<TimerId>,
    reveal_timer: Option<TimerId>,
    state: SequencerState,
    status: SequencerStatus,
    complete: bool,
}

impl ViewSequencer {
    pub fn new(views: Vec<ViewEntry>, timings: SequencerTimings) -> Result<Self, StoryError> {
        if views.is_empty() {
            return Err(StoryError::NoViews);
        }
        for (index, view) in views.iter().enumerate() {
            MotionRequest::to(view.pose)
                .validate()
                .map_err(|source| StoryError::InvalidView { index, source })?;
        }
        timings.validate()?;

        Ok(Self {
            views,
            timings,
            timers: TimerQueue::new(),
            switch_timer: None,
            caption_timer: None,
            reveal_timer: None,
            state: SequencerState {
                current_index: 0,
                caption_active: false,
            },
            status: SequencerStatus::Idle,
            complete: false,
        })
    }

    pub fn views(&self) -> &[ViewEntry] {
        &self.views
    }

    pub fn current_view(&self) -> &ViewEntry {
        &self.views[self.state.current_index]
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn caption_active(&self) -> bool {
        self.state.caption_active
    }

    pub fn status(&self) -> SequencerStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn is_terminal(&self, index: usize) -> bool {
        index + 1 >= self.views.len()
    }

    /// Enter the first view and arm the switch timer. Only valid once.
    pub fn start(&mut self) -> Vec<SequencerEvent> {
        if self.status != SequencerStatus::Idle {
            log::warn!("Sequencer start ignored, status is {:?}", self.status);
            return Vec::new();
        }
        self.status = SequencerStatus::Running;

        let mut events = Vec::new();
        if !self.is_terminal(0) {
            self.switch_timer = Some(self.timers.every(self.timings.switch_interval, Tick::Switch));
        }
        self.enter(0, self.timings.first_caption, &mut events);
        events
    }

    /// Cancel every armed timer and drop the caption. Nothing fires afterwards.
    pub fn stop(&mut self) {
        self.timers.clear();
        self.switch_timer = None;
        self.caption_timer = None;
        self.reveal_timer = None;
        self.state.caption_active = false;
        if self.status == SequencerStatus::Running {
            log::debug!("Sequencer stopped at view {}", self.state.current_index);
        }
        self.status = SequencerStatus::Stopped;
    }

    /// Advance the sequencer timers by `delta` seconds
    pub fn advance(&mut self, delta: f32) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        if self.status != SequencerStatus::Running {
            return events;
        }

        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let until = self.timers.now() + f64::from(delta);
        while let Some((_, tick)) = self.timers.pop_due(until) {
            self.fire(tick, &mut events);
        }
        self.timers.settle(until);
        events
    }

    fn fire(&mut self, tick: Tick, events: &mut Vec<SequencerEvent>) {
        match tick {
            Tick::Switch => {
                let next = self.state.current_index + 1;
                if next < self.views.len() {
                    self.enter(next, self.timings.caption, events);
                } else if let Some(id) = self.switch_timer.take() {
                    self.timers.cancel(id);
                }
            }
            Tick::CaptionOff => {
                self.caption_timer = None;
                self.state.caption_active = false;
                events.push(SequencerEvent::CaptionChanged {
                    active: false,
                    index: self.state.current_index,
                });

                if self.is_terminal(self.state.current_index)
                    && !self.complete
                    && self.reveal_timer.is_none()
                {
                    self.reveal_timer = Some(self.timers.after(self.timings.reveal_delay, Tick::Reveal));
                }
            }
            Tick::Reveal => {
                self.reveal_timer = None;
                self.complete = true;
                log::info!("Story sequence complete");
                events.push(SequencerEvent::SequenceComplete);
            }
        }
    }

    // Index, caption flag and caption timer change together
    fn enter(&mut self, index: usize, caption_delay: f32, events: &mut Vec<SequencerEvent>) {
        self.state = SequencerState {
            current_index: index,
            caption_active: true,
        };

        if let Some(id) = self.caption_timer.take() {
            self.timers.cancel(id);
        }
        self.caption_timer = Some(self.timers.after(caption_delay, Tick::CaptionOff));

        if self.is_terminal(index) {
            if let Some(id) = self.switch_timer.take() {
                self.timers.cancel(id);
            }
        }

        let view = &self.views[index];
        log::info!("View {}: {}", index, view.caption.title);
        events.push(SequencerEvent::ViewEntered {
            index,
            request: MotionRequest::to(view.pose),
        });
        events.push(SequencerEvent::CaptionChanged {
            active: true,
            index,
        });
    }
}
