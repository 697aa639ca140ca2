//! # Input Manager
//!
//! Collects key and mouse events between frames and turns them into one
//! [`ProcessedInputState`] per frame.

use std::collections::HashMap;

use super::input_state::{KeyCode, ProcessedInputState, RawInputState};

/// Manages the state of all tracked keys and the mouse.
pub struct InputManager {
    /// Down flags as of the previous frame
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Down flags as of now
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,
    /// Mouse movement accumulated since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with every tracked key released.
    pub fn new() -> Self {
        let keyboard_inputs_old: HashMap<_, _> =
            KeyCode::ALL.iter().map(|key| (*key, false)).collect();
        let keyboard_inputs_new = keyboard_inputs_old.clone();

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_delta: None,
        }
    }

    /// Records a key going down (`pressed`) or up.
    pub fn intake_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = pressed;
        }
    }

    /// Adds relative mouse motion; several events in one frame accumulate.
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Builds the transitions for the current frame without consuming anything.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_delta: self.mouse_delta,
        }
    }

    /// Returns this frame's input and starts the next frame.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Carries the current key flags over as "previous" and clears the mouse delta.
    pub fn reset_inputs(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }
        self.mouse_delta = None;
    }

    /// Releases every key, e.g. when focus is lost.
    pub fn release_all(&mut self) {
        for key_state in self.keyboard_inputs_new.values_mut() {
            *key_state = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_goes_through_pressed_held_released() {
        let mut input = InputManager::new();

        input.intake_key(KeyCode::KeyW, true);
        let frame = input.get_and_reset_processed_input();
        assert_eq!(frame.get_key_state(KeyCode::KeyW), RawInputState::Pressed);

        let frame = input.get_and_reset_processed_input();
        assert_eq!(frame.get_key_state(KeyCode::KeyW), RawInputState::Held);

        input.intake_key(KeyCode::KeyW, false);
        let frame = input.get_and_reset_processed_input();
        assert_eq!(frame.get_key_state(KeyCode::KeyW), RawInputState::Released);

        let frame = input.get_and_reset_processed_input();
        assert_eq!(frame.get_key_state(KeyCode::KeyW), RawInputState::NotPressed);
    }

    #[test]
    fn test_mouse_motion_accumulates_per_frame() {
        let mut input = InputManager::new();
        input.intake_mouse_motion((3.0, -1.0));
        input.intake_mouse_motion((2.0, 4.0));

        let frame = input.get_and_reset_processed_input();
        assert_eq!(frame.get_mouse_delta(), Some((5.0, 3.0)));
        assert_eq!(input.get_and_reset_processed_input().get_mouse_delta(), None);
    }

    #[test]
    fn test_release_all_releases_held_keys() {
        let mut input = InputManager::new();
        input.intake_key(KeyCode::Space, true);
        input.get_and_reset_processed_input();

        input.release_all();
        let frame = input.get_and_reset_processed_input();
        assert!(frame.get_key_state(KeyCode::Space).is_just_released());
    }
}
