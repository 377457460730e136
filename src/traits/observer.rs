use crate::motion::RequestId;

/// Host callbacks raised while the story plays.
/// Every method defaults to a no-op so hosts only implement what they show.
pub trait StoryObserver {
    /// Caption for `view_index` became visible or hidden
    fn on_caption_change(&mut self, _active: bool, _view_index: usize) {}

    /// Typewriter revealed more caption text
    fn on_caption_text(&mut self, _title: &str, _body: &str) {}

    /// Last view finished; the host may offer the continue action
    fn on_sequence_complete(&mut self) {}

    /// Camera arrived at the target of request `id`
    fn on_motion_complete(&mut self, _id: RequestId) {}
}

/// Observer that ignores every event
impl StoryObserver for () {}
