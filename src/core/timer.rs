/// Self-contained timers - advanced by frame delta, no wall-clock dependency
/// Every armed timer is addressed through the handle returned when arming it

/// Handle to an armed timer, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<K> {
    id: TimerId,
    key: K,
    due: f64,
    period: Option<f64>,
}

/// Shortest period a repeating timer may have, keeps `pop_due` finite
const MIN_PERIOD: f64 = 1e-3;

/// Queue of one-shot and repeating timers sharing one logical time line.
///
/// Time only moves when the owner advances it. Due timers are popped one at
/// a time in due order, so a handler may cancel or arm timers and the change
/// is visible to the remainder of the same advance:
///
/// ```
/// use scroll_story::core::timer::TimerQueue;
///
/// let mut timers = TimerQueue::new();
/// timers.after(1.0, "ding");
///
/// let until = timers.now() + 2.0;
/// while let Some((_, key)) = timers.pop_due(until) {
///     assert_eq!(key, "ding");
/// }
/// timers.settle(until);
/// assert!(timers.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    now: f64,
    next_id: u64,
    entries: Vec<Entry<K>>,
}

impl<K: Copy> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Current logical time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Arm a one-shot timer firing `delay` seconds from now
    pub fn after(&mut self, delay: f32, key: K) -> TimerId {
        let due = self.now + f64::from(delay.max(0.0));
        self.push(key, due, None)
    }

    /// Arm a repeating timer, first firing one `period` from now
    pub fn every(&mut self, period: f32, key: K) -> TimerId {
        let period = f64::from(period).max(MIN_PERIOD);
        let due = self.now + period;
        self.push(key, due, Some(period))
    }

    fn push(&mut self, key: K, due: f64, period: Option<f64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            key,
            due,
            period,
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Cancel every armed timer
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Seconds until the timer fires next
    pub fn remaining(&self, id: TimerId) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.due - self.now)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pop the earliest timer due at or before `until`, moving time to its due point.
    /// Repeating timers are re-armed one period later, one-shots are removed.
    pub fn pop_due(&mut self, until: f64) -> Option<(TimerId, K)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(index, _)| index)?;

        let entry = &mut self.entries[index];
        let fired = (entry.id, entry.key);
        self.now = self.now.max(entry.due);

        match entry.period {
            Some(period) => entry.due += period,
            None => {
                self.entries.swap_remove(index);
            }
        }

        Some(fired)
    }

    /// Move time to `until` once every due timer has been popped
    pub fn settle(&mut self, until: f64) {
        self.now = self.now.max(until);
    }

    /// Advance by `delta` seconds and collect every key that fired, in order.
    /// Only suitable when firing never arms or cancels timers.
    pub fn advance(&mut self, delta: f32) -> Vec<K> {
        let until = self.now + f64::from(delta.max(0.0));
        let mut fired = Vec::new();
        while let Some((_, key)) = self.pop_due(until) {
            fired.push(key);
        }
        self.settle(until);
        fired
    }
}

impl<K: Copy> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Throttled timer - minimum interval between fires
#[derive(Debug, Clone, Copy)]
pub struct Throttled {
    min_interval: f32,
    time_since_last: f32,
}

impl Throttled {
    /// Create throttled timer with minimum interval
    pub fn new(min_interval: f32) -> Self {
        Self {
            min_interval,
            time_since_last: min_interval,
        }
    }

    /// Attempt to fire, returns true if enough time has passed
    pub fn try_tick(&mut self, delta: f32) -> bool {
        self.time_since_last += delta;

        if self.time_since_last >= self.min_interval {
            self.time_since_last = 0.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        Once,
        Repeat,
        Late,
    }

    #[test]
    fn one_shot_fires_once_at_due_time() {
        let mut timers = TimerQueue::new();
        timers.after(1.0, Key::Once);

        assert!(timers.advance(0.5).is_empty());
        assert_eq!(timers.advance(0.5), vec![Key::Once]);
        assert!(timers.advance(10.0).is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn repeating_fires_every_period() {
        let mut timers = TimerQueue::new();
        timers.every(1.0, Key::Repeat);

        // A large delta catches up every missed period
        assert_eq!(timers.advance(3.5), vec![Key::Repeat; 3]);
        assert_eq!(timers.advance(0.5), vec![Key::Repeat]);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn fires_in_due_order() {
        let mut timers = TimerQueue::new();
        timers.after(2.0, Key::Late);
        timers.every(1.5, Key::Repeat);
        timers.after(0.5, Key::Once);

        assert_eq!(
            timers.advance(3.0),
            vec![Key::Once, Key::Repeat, Key::Late, Key::Repeat]
        );
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = TimerQueue::new();
        let id = timers.after(1.0, Key::Once);

        assert!(timers.is_armed(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.advance(5.0).is_empty());
    }

    #[test]
    fn handler_can_rearm_relative_to_fire_time() {
        let mut timers = TimerQueue::new();
        timers.after(1.0, Key::Once);

        let until = timers.now() + 3.0;
        let mut fired = Vec::new();
        while let Some((_, key)) = timers.pop_due(until) {
            fired.push((key, timers.now()));
            if key == Key::Once {
                timers.after(1.5, Key::Late);
            }
        }
        timers.settle(until);

        assert_eq!(fired, vec![(Key::Once, 1.0), (Key::Late, 2.5)]);
        assert_eq!(timers.now(), 3.0);
    }

    #[test]
    fn remaining_counts_down() {
        let mut timers = TimerQueue::new();
        let id = timers.after(2.0, Key::Once);
        timers.advance(0.5);

        assert_eq!(timers.remaining(id), Some(1.5));
    }

    #[test]
    fn clear_cancels_everything() {
        let mut timers = TimerQueue::new();
        timers.after(1.0, Key::Once);
        timers.every(1.0, Key::Repeat);
        timers.clear();

        assert!(timers.advance(10.0).is_empty());
    }

    #[test]
    fn throttled_enforces_minimum() {
        let mut timer = Throttled::new(0.1);

        assert!(timer.try_tick(0.05)); // First fire immediate
        assert!(!timer.try_tick(0.05)); // Too soon
        assert!(timer.try_tick(0.06)); // Enough time
    }
}
