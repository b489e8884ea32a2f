//! Key mapping from terminal events to game intents and front-end commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::InputIntent;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forwarded to the engine
    Game(InputIntent),
    Pause,
    Restart,
    Quit,
}

/// Map a key press. Unbound keys map to `None`.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyAction> {
    if should_quit(key) {
        return Some(KeyAction::Quit);
    }

    let intent = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => InputIntent::MoveLeft,
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => InputIntent::MoveRight,
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => InputIntent::SoftDrop,

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W' | 'x' | 'X') => InputIntent::RotateCw,
        KeyCode::Char('z' | 'Z' | 'y' | 'Y') => InputIntent::RotateCcw,

        KeyCode::Char(' ') => InputIntent::HardDrop,
        KeyCode::Char('c' | 'C') => InputIntent::Hold,

        KeyCode::Char('p' | 'P') | KeyCode::Esc => return Some(KeyAction::Pause),
        KeyCode::Char('r' | 'R') => return Some(KeyAction::Restart),
        _ => return None,
    };
    Some(KeyAction::Game(intent))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(code: KeyCode) -> Option<KeyAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(map(KeyCode::Left), Some(KeyAction::Game(InputIntent::MoveLeft)));
        assert_eq!(map(KeyCode::Right), Some(KeyAction::Game(InputIntent::MoveRight)));
        assert_eq!(map(KeyCode::Down), Some(KeyAction::Game(InputIntent::SoftDrop)));
        assert_eq!(map(KeyCode::Char('H')), Some(KeyAction::Game(InputIntent::MoveLeft)));
        assert_eq!(map(KeyCode::Char('d')), Some(KeyAction::Game(InputIntent::MoveRight)));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map(KeyCode::Up), Some(KeyAction::Game(InputIntent::RotateCw)));
        assert_eq!(map(KeyCode::Char('x')), Some(KeyAction::Game(InputIntent::RotateCw)));
        assert_eq!(map(KeyCode::Char('z')), Some(KeyAction::Game(InputIntent::RotateCcw)));
        assert_eq!(map(KeyCode::Char('Y')), Some(KeyAction::Game(InputIntent::RotateCcw)));
    }

    #[test]
    fn test_action_and_command_keys() {
        assert_eq!(map(KeyCode::Char(' ')), Some(KeyAction::Game(InputIntent::HardDrop)));
        assert_eq!(map(KeyCode::Char('c')), Some(KeyAction::Game(InputIntent::Hold)));
        assert_eq!(map(KeyCode::Char('p')), Some(KeyAction::Pause));
        assert_eq!(map(KeyCode::Esc), Some(KeyAction::Pause));
        assert_eq!(map(KeyCode::Char('r')), Some(KeyAction::Restart));
        assert_eq!(map(KeyCode::Char('m')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(should_quit(ctrl_c));
        assert_eq!(handle_key_event(ctrl_c), Some(KeyAction::Quit));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
