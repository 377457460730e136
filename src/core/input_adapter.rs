use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// What the viewer can ask the story to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Accept the continue prompt and play the finale
    Continue,
    Quit,
}

/// Adapter that bridges Winit events to story actions
#[derive(Debug, Clone, Copy, Default)]
pub struct WinitInput;

impl WinitInput {
    pub fn new() -> Self {
        Self
    }

    /// Action for a window event, if any. Key repeats are ignored.
    pub fn process_event(&self, event: &WindowEvent) -> Option<Action> {
        match event {
            WindowEvent::CloseRequested => Some(Action::Quit),
            WindowEvent::KeyboardInput { event, .. } => Self::key_action(event),
            _ => None,
        }
    }

    fn key_action(event: &KeyEvent) -> Option<Action> {
        if event.state != ElementState::Pressed || event.repeat {
            return None;
        }
        match event.physical_key {
            PhysicalKey::Code(keycode) => Self::keycode_to_action(keycode),
            _ => None,
        }
    }

    /// Map Winit KeyCode to Action
    pub fn keycode_to_action(keycode: KeyCode) -> Option<Action> {
        match keycode {
            KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space => Some(Action::Continue),
            KeyCode::Escape => Some(Action::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continue_keys() {
        for keycode in [KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::Space] {
            assert_eq!(WinitInput::keycode_to_action(keycode), Some(Action::Continue));
        }
    }

    #[test]
    fn test_escape_quits() {
        assert_eq!(WinitInput::keycode_to_action(KeyCode::Escape), Some(Action::Quit));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(WinitInput::keycode_to_action(KeyCode::KeyW), None);
        assert_eq!(WinitInput::keycode_to_action(KeyCode::ShiftLeft), None);
    }

    #[test]
    fn test_close_requested_quits() {
        let input = WinitInput::new();
        assert_eq!(input.process_event(&WindowEvent::CloseRequested), Some(Action::Quit));
        assert_eq!(input.process_event(&WindowEvent::Focused(true)), None);
    }
}
