use chaser_core::{Direction, HeldKeys};
use chaser_rendering::FrameInput;
use macroquad::input::{is_key_down, is_key_pressed, is_quit_requested, KeyCode};

/// Arrow keys steer the player while held down.
pub(crate) const HELD_BINDINGS: [(KeyCode, Direction); 4] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
];

/// W/A/S/D step the player once per press.
pub(crate) const PRESSED_BINDINGS: [(KeyCode, Direction); 4] = [
    (KeyCode::W, Direction::Up),
    (KeyCode::S, Direction::Down),
    (KeyCode::A, Direction::Left),
    (KeyCode::D, Direction::Right),
];

/// Samples the keyboard and the window for the current frame.
pub(crate) fn poll() -> FrameInput {
    gather_frame_input(is_key_down, is_key_pressed, is_quit_requested())
}

/// Maps raw key observations onto the backend-agnostic frame input.
pub(crate) fn gather_frame_input(
    is_down: impl Fn(KeyCode) -> bool,
    is_pressed: impl Fn(KeyCode) -> bool,
    close_requested: bool,
) -> FrameInput {
    let held: HeldKeys = HELD_BINDINGS
        .iter()
        .filter(|(key, _)| is_down(*key))
        .map(|(_, direction)| *direction)
        .collect();
    let pressed = PRESSED_BINDINGS
        .iter()
        .filter(|(key, _)| is_pressed(*key))
        .map(|(_, direction)| *direction)
        .collect();

    FrameInput {
        quit_requested: close_requested || is_pressed(KeyCode::Escape),
        held,
        pressed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_map_to_held_directions() {
        let input = gather_frame_input(
            |key| matches!(key, KeyCode::Up | KeyCode::Right),
            |_| false,
            false,
        );

        assert_eq!(
            input.held,
            HeldKeys::none().with(Direction::Up).with(Direction::Right)
        );
        assert!(input.pressed.is_empty());
        assert!(!input.quit_requested);
    }

    #[test]
    fn wasd_presses_map_to_steps() {
        let input = gather_frame_input(
            |_| false,
            |key| matches!(key, KeyCode::A | KeyCode::S),
            false,
        );

        assert_eq!(input.pressed, vec![Direction::Down, Direction::Left]);
        assert!(input.held.is_empty());
    }

    #[test]
    fn held_wasd_keys_do_not_steer() {
        let input = gather_frame_input(
            |key| matches!(key, KeyCode::W | KeyCode::D),
            |_| false,
            false,
        );

        assert!(input.held.is_empty());
        assert!(input.pressed.is_empty());
    }

    #[test]
    fn escape_or_window_close_requests_quit() {
        let escape = gather_frame_input(|_| false, |key| key == KeyCode::Escape, false);
        let close = gather_frame_input(|_| false, |_| false, true);

        assert!(escape.quit_requested);
        assert!(close.quit_requested);
    }

    #[test]
    fn other_keys_are_ignored() {
        let input = gather_frame_input(|key| key == KeyCode::Space, |key| key == KeyCode::Q, false);

        assert_eq!(input, FrameInput::default());
    }
}
