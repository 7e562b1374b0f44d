/// Platform-agnostic input handling system
use std::collections::HashSet;

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    // Keyboard events
    KeyDown(String),
    KeyUp(String),

    // Mouse events
    MouseMove { dx: f32, dy: f32 },

    // Window events
    FocusLost,
    VisibilityChanged { visible: bool },
    PointerLockChanged { locked: bool },
}

/// Unified input state, mutated only from event callbacks.
/// The frame loop reads it exactly once per frame, at the top of its update.
pub struct InputState {
    pub pressed_keys: HashSet<String>,
    pub look_delta: (f32, f32),
    pub pointer_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            look_delta: (0.0, 0.0),
            pointer_locked: false,
        }
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.clone());
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(key.as_str());
            }
            InputEvent::MouseMove { dx, dy } => {
                if self.pointer_locked {
                    self.look_delta.0 += dx;
                    self.look_delta.1 += dy;
                }
            }
            InputEvent::FocusLost => {
                self.clear_keys();
            }
            InputEvent::VisibilityChanged { visible: _ } => {
                self.clear_keys();
            }
            InputEvent::PointerLockChanged { locked } => {
                self.pointer_locked = *locked;
                if !self.pointer_locked {
                    self.clear_keys();
                }
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }

    pub fn consume_look(&mut self) -> (f32, f32) {
        let result = self.look_delta;
        self.look_delta = (0.0, 0.0);
        result
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Start-of-frame snapshot of the four logical walk directions.
/// WASD and the arrow keys alias to the same directions; the snapshot is
/// immutable, so key events arriving mid-frame only affect the next frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub fn capture(input: &InputState) -> Self {
        let held = |keys: &[&str]| keys.iter().any(|k| input.is_key_pressed(k));
        Self {
            forward: held(&["w", "W", "ArrowUp"]),
            backward: held(&["s", "S", "ArrowDown"]),
            left: held(&["a", "A", "ArrowLeft"]),
            right: held(&["d", "D", "ArrowRight"]),
        }
    }

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    pub fn keyboard_event_to_input(e: &KeyboardEvent, is_down: bool) -> InputEvent {
        let key = e.key();
        if is_down {
            InputEvent::KeyDown(key)
        } else {
            InputEvent::KeyUp(key)
        }
    }

    pub fn mouse_move_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::MouseMove {
            dx: e.movement_x() as f32,
            dy: e.movement_y() as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_up_round_trip() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown("w".to_string()));
        assert!(input.is_key_pressed("w"));
        input.process_event(&InputEvent::KeyUp("w".to_string()));
        assert!(!input.is_key_pressed("w"));
    }

    #[test]
    fn test_arrow_keys_alias_to_wasd_directions() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown("ArrowUp".to_string()));
        input.process_event(&InputEvent::KeyDown("ArrowLeft".to_string()));
        let intent = MoveIntent::capture(&input);
        assert!(intent.forward);
        assert!(intent.left);
        assert!(!intent.backward);
        assert!(!intent.right);
    }

    #[test]
    fn test_opposite_keys_both_captured() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown("a".to_string()));
        input.process_event(&InputEvent::KeyDown("d".to_string()));
        let intent = MoveIntent::capture(&input);
        assert!(intent.left && intent.right);
    }

    #[test]
    fn test_focus_loss_clears_keys() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown("w".to_string()));
        input.process_event(&InputEvent::FocusLost);
        assert!(!MoveIntent::capture(&input).any());
    }

    #[test]
    fn test_look_delta_gated_on_pointer_lock() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::MouseMove { dx: 3.0, dy: 1.0 });
        assert_eq!(input.consume_look(), (0.0, 0.0));

        input.process_event(&InputEvent::PointerLockChanged { locked: true });
        input.process_event(&InputEvent::MouseMove { dx: 3.0, dy: 1.0 });
        input.process_event(&InputEvent::MouseMove { dx: -1.0, dy: 2.0 });
        assert_eq!(input.consume_look(), (2.0, 3.0));
        // Consuming drains the accumulator
        assert_eq!(input.consume_look(), (0.0, 0.0));
    }

    #[test]
    fn test_capture_does_not_mutate_state() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown("d".to_string()));
        let first = MoveIntent::capture(&input);
        let second = MoveIntent::capture(&input);
        assert_eq!(first, second);
    }
}
