//! Keyboard input
//!
//! Key events arrive at arbitrary times between frames and overwrite the
//! intent; the simulation samples it once per frame.

use serde::{Deserialize, Serialize};

/// Held-key state sampled by `advance_frame`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_held: bool,
}

/// What a physical key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    Jump,
}

impl KeyAction {
    /// Map a `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(KeyAction::Left),
            "ArrowRight" | "KeyD" => Some(KeyAction::Right),
            "ArrowUp" | "KeyW" | "Space" => Some(KeyAction::Jump),
            _ => None,
        }
    }
}

impl InputIntent {
    /// Apply a key event. Returns true if the key is bound, so the caller can
    /// suppress the browser default (page scrolling on arrows/space).
    ///
    /// Auto-repeat key-downs are ignored: the flag is set by the first press
    /// and stays set until the matching key-up.
    pub fn handle_key(&mut self, code: &str, pressed: bool, repeat: bool) -> bool {
        let Some(action) = KeyAction::from_code(code) else {
            return false;
        };
        if repeat {
            return true;
        }
        self.set(action, pressed);
        true
    }

    pub fn set(&mut self, action: KeyAction, held: bool) {
        match action {
            KeyAction::Left => self.move_left = held,
            KeyAction::Right => self.move_right = held,
            KeyAction::Jump => self.jump_held = held,
        }
    }

    /// Release everything (window blur, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        for code in ["ArrowLeft", "KeyA"] {
            assert_eq!(KeyAction::from_code(code), Some(KeyAction::Left));
        }
        for code in ["ArrowRight", "KeyD"] {
            assert_eq!(KeyAction::from_code(code), Some(KeyAction::Right));
        }
        for code in ["ArrowUp", "KeyW", "Space"] {
            assert_eq!(KeyAction::from_code(code), Some(KeyAction::Jump));
        }
        assert_eq!(KeyAction::from_code("KeyQ"), None);
    }

    #[test]
    fn test_press_and_release() {
        let mut intent = InputIntent::default();
        assert!(intent.handle_key("KeyA", true, false));
        assert!(intent.move_left);
        assert!(intent.handle_key("ArrowLeft", false, false));
        assert!(!intent.move_left);
    }

    #[test]
    fn test_repeat_is_ignored() {
        let mut intent = InputIntent::default();
        intent.handle_key("Space", true, false);
        // A stray repeat after release must not re-press
        intent.handle_key("Space", false, false);
        assert!(intent.handle_key("Space", true, true));
        assert!(!intent.jump_held);
    }

    #[test]
    fn test_unbound_key_untouched() {
        let mut intent = InputIntent::default();
        assert!(!intent.handle_key("Escape", true, false));
        assert_eq!(intent, InputIntent::default());
    }

    #[test]
    fn test_clear() {
        let mut intent = InputIntent {
            move_left: true,
            move_right: true,
            jump_held: true,
        };
        intent.clear();
        assert_eq!(intent, InputIntent::default());
    }
}
