//! Typewriter reveal of view captions.

use serde::{Deserialize, Serialize};

use crate::core::timer::{TimerId, TimerQueue};
use crate::sequencer::Caption;

/// Typewriter cadence in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterTimings {
    /// Pause between the caption appearing and the first character
    pub initial_delay: f32,
    /// Time per revealed character
    pub char_interval: f32,
}

impl Default for TypewriterTimings {
    fn default() -> Self {
        Self {
            initial_delay: 2.0,
            char_interval: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Begin,
    Type,
}

/// Reveals the title, then after one empty beat the body, a character at a time
pub struct Typewriter {
    timings: TypewriterTimings,
    timers: TimerQueue<Step>,
    pending: Option<TimerId>,
    title: Vec<char>,
    body: Vec<char>,
    title_shown: usize,
    body_shown: usize,
    paused_between: bool,
    revealed_title: String,
    revealed_body: String,
    visible: bool,
}

impl Typewriter {
    pub fn new(timings: TypewriterTimings) -> Self {
        Self {
            timings,
            timers: TimerQueue::new(),
            pending: None,
            title: Vec::new(),
            body: Vec::new(),
            title_shown: 0,
            body_shown: 0,
            paused_between: false,
            revealed_title: String::new(),
            revealed_body: String::new(),
            visible: false,
        }
    }

    /// Show `caption` from scratch, typing starts after the initial delay
    pub fn activate(&mut self, caption: &Caption) {
        self.cancel_pending();
        self.title = caption.title.chars().collect();
        self.body = caption.body.chars().collect();
        self.title_shown = 0;
        self.body_shown = 0;
        self.paused_between = false;
        self.revealed_title.clear();
        self.revealed_body.clear();
        self.visible = true;
        self.pending = Some(self.timers.after(self.timings.initial_delay, Step::Begin));
    }

    /// Hide the caption and stop typing. Revealed text is kept for the fade.
    pub fn deactivate(&mut self) {
        self.cancel_pending();
        self.visible = false;
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn title(&self) -> &str {
        &self.revealed_title
    }

    pub fn body(&self) -> &str {
        &self.revealed_body
    }

    /// Advance by `delta` seconds. Returns true when new characters appeared.
    pub fn advance(&mut self, delta: f32) -> bool {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let until = self.timers.now() + f64::from(delta);
        let mut changed = false;

        while let Some((_, step)) = self.timers.pop_due(until) {
            match step {
                Step::Begin => {
                    self.pending = Some(self.timers.every(self.timings.char_interval, Step::Type));
                }
                Step::Type => changed |= self.type_next(),
            }
        }
        self.timers.settle(until);
        changed
    }

    fn type_next(&mut self) -> bool {
        if let Some(&c) = self.title.get(self.title_shown) {
            self.revealed_title.push(c);
            self.title_shown += 1;
            return true;
        }
        if !self.paused_between {
            self.paused_between = true;
            return false;
        }
        if let Some(&c) = self.body.get(self.body_shown) {
            self.revealed_body.push(c);
            self.body_shown += 1;
            return true;
        }
        self.cancel_pending();
        false
    }
}
