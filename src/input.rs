//! Press/release events folded into per-frame input
//!
//! Hosts feed raw key and pointer events as they arrive; once per frame
//! [`Controls::frame_input`] produces the [`TickInput`] for that frame.
//! Movement and sitting follow held state, jump and fire fire once per press.

use crate::sim::TickInput;

/// Logical game actions, independent of the physical key bound to them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Sit,
    Fire,
}

impl Action {
    /// Default keyboard binding, by `KeyboardEvent.key` name
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Action::Left),
            "ArrowRight" | "d" | "D" => Some(Action::Right),
            "ArrowUp" | "w" | "W" => Some(Action::Up),
            "ArrowDown" | "s" | "S" => Some(Action::Down),
            " " => Some(Action::Jump),
            "Shift" => Some(Action::Sit),
            "Enter" | "f" | "F" => Some(Action::Fire),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
    /// Mouse click or touch anywhere
    Pointer,
}

/// Held keys plus edges seen since the last frame
#[derive(Debug, Clone, Default)]
pub struct Controls {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    sit: bool,
    jump_pressed: bool,
    fire_pressed: bool,
    any_pressed: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(action) => {
                self.any_pressed = true;
                match action {
                    Action::Jump => self.jump_pressed = true,
                    Action::Fire => self.fire_pressed = true,
                    _ => self.set_held(action, true),
                }
            }
            InputEvent::Released(action) => self.set_held(action, false),
            InputEvent::Pointer => self.any_pressed = true,
        }
    }

    fn set_held(&mut self, action: Action, held: bool) {
        match action {
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Up => self.up = held,
            Action::Down => self.down = held,
            Action::Sit => self.sit = held,
            // Edge-triggered only
            Action::Jump | Action::Fire => {}
        }
    }

    /// Input for the next frame. Consumes the edges.
    pub fn frame_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            jump: self.jump_pressed,
            sit: self.sit,
            fire: self.fire_pressed,
            restart: self.any_pressed,
        };
        self.jump_pressed = false;
        self.fire_pressed = false;
        self.any_pressed = false;
        input
    }

    /// Forget everything held, e.g. when the window loses focus
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_movement_persists() {
        let mut controls = Controls::new();
        controls.handle(InputEvent::Pressed(Action::Right));

        let first = controls.frame_input();
        assert!(first.right);
        assert!(first.restart);

        let second = controls.frame_input();
        assert!(second.right);
        assert!(!second.restart);

        controls.handle(InputEvent::Released(Action::Right));
        assert!(!controls.frame_input().right);
    }

    #[test]
    fn test_jump_and_fire_are_edges() {
        let mut controls = Controls::new();
        controls.handle(InputEvent::Pressed(Action::Jump));
        controls.handle(InputEvent::Pressed(Action::Fire));

        let input = controls.frame_input();
        assert!(input.jump && input.fire);

        // Still physically held, but no new press
        let input = controls.frame_input();
        assert!(!input.jump && !input.fire);
    }

    #[test]
    fn test_press_and_release_within_a_frame_still_jumps() {
        let mut controls = Controls::new();
        controls.handle(InputEvent::Pressed(Action::Jump));
        controls.handle(InputEvent::Released(Action::Jump));
        assert!(controls.frame_input().jump);
    }

    #[test]
    fn test_pointer_only_restarts() {
        let mut controls = Controls::new();
        controls.handle(InputEvent::Pointer);
        let input = controls.frame_input();
        assert_eq!(
            input,
            TickInput {
                restart: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(Action::from_key("ArrowLeft"), Some(Action::Left));
        assert_eq!(Action::from_key(" "), Some(Action::Jump));
        assert_eq!(Action::from_key("Escape"), None);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut controls = Controls::new();
        controls.handle(InputEvent::Pressed(Action::Sit));
        controls.handle(InputEvent::Pressed(Action::Left));
        controls.clear();
        assert_eq!(controls.frame_input(), TickInput::default());
    }
}
