use std::collections::HashSet;

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks which keyboard keys are currently held.
#[derive(Default)]
pub struct Input {
    keys_down: HashSet<KeyCode>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event and update the held-key set.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.key_event(key, event.state);
                }
            }
            WindowEvent::Focused(false) => {
                // Avoids stuck keys when focus changes mid-press.
                self.keys_down.clear();
            }
            _ => {}
        }
    }

    pub(crate) fn key_event(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_down.insert(key);
            }
            ElementState::Released => {
                self.keys_down.remove(&key);
            }
        }
    }

    /// Returns true if the key is currently held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_held_until_released() {
        let mut input = Input::new();
        assert!(!input.key_down(KeyCode::ArrowRight));

        input.key_event(KeyCode::ArrowRight, ElementState::Pressed);
        assert!(input.key_down(KeyCode::ArrowRight));

        // Repeated press events keep the key held.
        input.key_event(KeyCode::ArrowRight, ElementState::Pressed);
        assert!(input.key_down(KeyCode::ArrowRight));

        input.key_event(KeyCode::ArrowRight, ElementState::Released);
        assert!(!input.key_down(KeyCode::ArrowRight));
    }

    #[test]
    fn keys_are_tracked_independently() {
        let mut input = Input::new();
        input.key_event(KeyCode::ArrowRight, ElementState::Pressed);
        input.key_event(KeyCode::ArrowUp, ElementState::Pressed);
        input.key_event(KeyCode::ArrowRight, ElementState::Released);

        assert!(!input.key_down(KeyCode::ArrowRight));
        assert!(input.key_down(KeyCode::ArrowUp));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut input = Input::new();
        input.key_event(KeyCode::ArrowLeft, ElementState::Pressed);
        input.key_event(KeyCode::ArrowDown, ElementState::Pressed);

        input.handle_event(&WindowEvent::Focused(false));

        assert!(!input.key_down(KeyCode::ArrowLeft));
        assert!(!input.key_down(KeyCode::ArrowDown));
    }
}
