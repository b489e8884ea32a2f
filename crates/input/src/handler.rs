//! DAS/ARR auto-repeat for terminal environments.
//!
//! Works on intents rather than key codes, so it does not care which keys
//! were bound. Terminals that never report key releases are handled with a
//! timeout: a held direction is dropped once no press has arrived for
//! `key_release_timeout_ms` of game time.

use arrayvec::ArrayVec;

use crate::types::{InputIntent, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS};

// Terminal key-repeat refreshes a held key well inside this window.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Soft drop repeats without an initial delay.
const SOFT_DROP_DAS_MS: u32 = 0;

pub type Repeats = ArrayVec<InputIntent, 32>;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn intent(self) -> Option<InputIntent> {
        match self {
            HorizontalDirection::Left => Some(InputIntent::MoveLeft),
            HorizontalDirection::Right => Some(InputIntent::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// One repeating key: delay, then a steady rate.
#[derive(Debug, Clone, Copy, Default)]
struct Repeater {
    das_timer: u32,
    arr_accumulator: u32,
}

impl Repeater {
    /// Count the repeats due after `elapsed_ms` more of holding.
    fn advance(&mut self, elapsed_ms: u32, das: u32, arr: u32) -> u32 {
        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < das {
            return 0;
        }

        let held = if prev_das < das {
            self.das_timer - das
        } else {
            elapsed_ms
        };
        self.arr_accumulator = self.arr_accumulator.saturating_add(held);

        let arr = arr.max(1);
        let due = self.arr_accumulator / arr;
        self.arr_accumulator %= arr;
        due
    }
}

/// Tracks held movement keys and produces auto-repeat intents.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    horizontal_repeat: Repeater,
    down_held: bool,
    down_repeat: Repeater,
    since_last_press_ms: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            horizontal_repeat: Repeater::default(),
            down_held: false,
            down_repeat: Repeater::default(),
            since_last_press_ms: 0,
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    /// Register a press. Returns the intent to apply now, or `None` when the
    /// press is a terminal repeat of a key we are already auto-repeating.
    pub fn press(&mut self, intent: InputIntent) -> Option<InputIntent> {
        let direction = match intent {
            InputIntent::MoveLeft => HorizontalDirection::Left,
            InputIntent::MoveRight => HorizontalDirection::Right,
            InputIntent::SoftDrop => {
                self.since_last_press_ms = 0;
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_repeat = Repeater::default();
                return Some(intent);
            }
            _ => return Some(intent),
        };

        self.since_last_press_ms = 0;
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.horizontal_repeat = Repeater::default();
        Some(intent)
    }

    pub fn release(&mut self, intent: InputIntent) {
        match intent {
            InputIntent::MoveLeft if self.horizontal == HorizontalDirection::Left => {
                self.release_horizontal()
            }
            InputIntent::MoveRight if self.horizontal == HorizontalDirection::Right => {
                self.release_horizontal()
            }
            InputIntent::SoftDrop => self.release_down(),
            _ => {}
        }
    }

    /// Advance by `elapsed_ms` and collect the repeats that fell due.
    pub fn update(&mut self, elapsed_ms: u32) -> Repeats {
        let mut repeats = Repeats::new();

        self.since_last_press_ms = self.since_last_press_ms.saturating_add(elapsed_ms);
        if self.since_last_press_ms > self.key_release_timeout_ms {
            self.release_horizontal();
            self.release_down();
        }

        if let Some(intent) = self.horizontal.intent() {
            let due = self
                .horizontal_repeat
                .advance(elapsed_ms, self.das_delay, self.arr_rate);
            for _ in 0..due.min(repeats.remaining_capacity() as u32) {
                repeats.push(intent);
            }
        }

        if self.down_held {
            let due = self
                .down_repeat
                .advance(elapsed_ms, SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS);
            for _ in 0..due.min(repeats.remaining_capacity() as u32) {
                repeats.push(InputIntent::SoftDrop);
            }
        }

        repeats
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.since_last_press_ms = 0;
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.horizontal_repeat = Repeater::default();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_repeat = Repeater::default();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.press(InputIntent::MoveLeft), Some(InputIntent::MoveLeft));

        // Before DAS expires: no repeats.
        assert!(ih.update(99).is_empty());

        // Exactly at DAS: still nothing accumulated for ARR.
        assert!(ih.update(1).is_empty());

        assert_eq!(ih.update(25).as_slice(), &[InputIntent::MoveLeft]);
        assert_eq!(ih.update(25).as_slice(), &[InputIntent::MoveLeft]);
    }

    #[test]
    fn test_terminal_repeat_presses_are_swallowed() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.press(InputIntent::MoveRight), Some(InputIntent::MoveRight));
        assert_eq!(ih.press(InputIntent::MoveRight), None);

        // Switching direction is a fresh press.
        assert_eq!(ih.press(InputIntent::MoveLeft), Some(InputIntent::MoveLeft));
        assert_eq!(ih.horizontal(), HorizontalDirection::Left);
    }

    #[test]
    fn test_non_repeating_intents_pass_through() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.press(InputIntent::HardDrop), Some(InputIntent::HardDrop));
        assert_eq!(ih.press(InputIntent::HardDrop), Some(InputIntent::HardDrop));
        assert_eq!(ih.press(InputIntent::RotateCw), Some(InputIntent::RotateCw));
    }

    #[test]
    fn test_auto_release_after_timeout() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        ih.press(InputIntent::MoveLeft);
        assert!(ih.update(51).is_empty());
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn test_soft_drop_repeats_use_zero_das_and_50ms_arr() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(ih.press(InputIntent::SoftDrop), Some(InputIntent::SoftDrop));
        assert!(ih.update(49).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[InputIntent::SoftDrop]);
        assert_eq!(
            ih.update(100).as_slice(),
            &[InputIntent::SoftDrop, InputIntent::SoftDrop]
        );
    }

    #[test]
    fn test_release_and_reset_stop_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        ih.press(InputIntent::MoveRight);
        assert!(!ih.update(200).is_empty());
        ih.release(InputIntent::MoveRight);
        assert!(ih.update(200).is_empty());

        ih.press(InputIntent::MoveLeft);
        ih.press(InputIntent::SoftDrop);
        ih.reset();
        assert!(ih.update(200).is_empty());
    }

    #[test]
    fn test_long_stall_caps_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(u32::MAX);

        ih.press(InputIntent::MoveRight);
        assert_eq!(ih.update(u32::MAX).len(), 32);
        assert_eq!(ih.update(u32::MAX).len(), 32);
    }
}
