//! # Input State
//!
//! This module defines the input state types used by the input manager.
//! Devices are polled by whatever embeds the engine; the engine only sees the
//! logical keys below plus a relative mouse delta.

use std::collections::HashMap;

/// The keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Walk forward
    KeyW,
    /// Strafe left
    KeyA,
    /// Walk backward
    KeyS,
    /// Strafe right
    KeyD,
    /// Jump
    Space,
    /// Log the player pose
    F3,
    /// Teleport to the centre of the world
    F6,
    /// Quit
    F10,
    /// Quit
    Escape,
}

impl KeyCode {
    /// Every tracked key.
    pub const ALL: [KeyCode; 9] = [
        KeyCode::KeyW,
        KeyCode::KeyA,
        KeyCode::KeyS,
        KeyCode::KeyD,
        KeyCode::Space,
        KeyCode::F3,
        KeyCode::F6,
        KeyCode::F10,
        KeyCode::Escape,
    ];
}

/// Represents the state of a key across two consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Key is up and was up last frame
    #[default]
    NotPressed,
    /// Key went down this frame
    Pressed,
    /// Key is down and was down last frame
    Held,
    /// Key went up this frame
    Released,
}

impl RawInputState {
    /// Pressed or held.
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Went down this frame.
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Went up this frame.
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the transition from last frame's and this frame's down flags.
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A snapshot of one frame of input, with key transitions resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedInputState {
    /// State of every tracked key
    pub keyboard_states: HashMap<KeyCode, RawInputState>,
    /// Mouse movement accumulated over the frame (x, y), if any
    pub mouse_delta: Option<(f64, f64)>,
}

impl ProcessedInputState {
    /// Gets the state of a key; untracked keys read as not pressed.
    pub fn get_key_state(&self, key: KeyCode) -> RawInputState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }

    /// Gets the mouse movement delta since the last frame.
    pub fn get_mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(false, true, RawInputState::Pressed)]
    #[test_case(true, true, RawInputState::Held)]
    #[test_case(true, false, RawInputState::Released)]
    #[test_case(false, false, RawInputState::NotPressed)]
    fn test_transitions(previous: bool, current: bool, expected: RawInputState) {
        assert_eq!(RawInputState::from_raw_states(previous, current), expected);
    }

    #[test]
    fn test_only_pressed_and_held_are_active() {
        assert!(RawInputState::Pressed.is_active());
        assert!(RawInputState::Held.is_active());
        assert!(!RawInputState::Released.is_active());
        assert!(RawInputState::Released.is_just_released());
        assert!(!RawInputState::Held.is_just_pressed());
    }

    #[test]
    fn test_untracked_keys_read_as_not_pressed() {
        let input = ProcessedInputState::default();
        assert_eq!(input.get_key_state(KeyCode::F3), RawInputState::NotPressed);
        assert_eq!(input.get_mouse_delta(), None);
    }
}
