//! Keypad-driven duration calculator state machine.
//!
//! # Responsibility
//! - Accumulate typed keystrokes into a duration expression.
//! - Produce the display and secondary texts rendered by the keypad screen.
//!
//! # Invariants
//! - `display` is the raw buffer, `"0"`, a formatted duration or `"Error"`.
//! - `accumulated` is set only after a confirmed `+`.
//! - A failed parse clears the buffer but never touches `accumulated`.

use crate::model::duration::{Duration, TimeUnit};
use log::debug;
use serde::{Deserialize, Serialize};

/// Display token shown after a rejected input.
pub const ERROR_DISPLAY: &str = "Error";
const EMPTY_DISPLAY: &str = "0";

/// One keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Unit(TimeUnit),
    Plus,
    Equals,
    Clear,
}

impl Key {
    /// Maps a keypad label (`0`-`9`, `d`, `h`, `m`, `+`, `=`, `C`) to a key.
    pub fn from_label(label: &str) -> Option<Self> {
        let mut chars = label.trim().chars();
        let first = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match first {
            '+' => Some(Self::Plus),
            '=' => Some(Self::Equals),
            'C' | 'c' => Some(Self::Clear),
            digit if digit.is_ascii_digit() => Some(Self::Digit(digit as u8 - b'0')),
            letter => TimeUnit::from_letter(letter).map(Self::Unit),
        }
    }
}

/// Whether a running total is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorMode {
    Idle,
    Accumulating,
}

/// Snapshot of what the keypad screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorView {
    pub display: String,
    pub secondary: String,
}

/// Calculator state owned by one keypad session.
#[derive(Debug, Clone)]
pub struct CalculatorState {
    buffer: String,
    accumulated: Option<Duration>,
    display: String,
    secondary: String,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            buffer: String::new(),
            accumulated: None,
            display: EMPTY_DISPLAY.to_string(),
            secondary: String::new(),
        }
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn secondary(&self) -> &str {
        &self.secondary
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn accumulated(&self) -> Option<Duration> {
        self.accumulated
    }

    pub fn mode(&self) -> CalculatorMode {
        if self.accumulated.is_some() {
            CalculatorMode::Accumulating
        } else {
            CalculatorMode::Idle
        }
    }

    pub fn view(&self) -> CalculatorView {
        CalculatorView {
            display: self.display.clone(),
            secondary: self.secondary.clone(),
        }
    }

    /// Dispatches one key press.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(digit) => self.digit(digit),
            Key::Unit(unit) => self.unit(unit),
            Key::Plus => self.plus(),
            Key::Equals => self.equals(),
            Key::Clear => self.clear(),
        }
    }

    /// Appends a decimal digit; values above 9 are ignored.
    pub fn digit(&mut self, digit: u8) {
        let Some(symbol) = char::from_digit(u32::from(digit), 10) else {
            debug!("event=calculator_key module=calculator status=ignored reason=invalid_digit");
            return;
        };
        self.buffer.push(symbol);
        self.show_buffer();
    }

    pub fn unit(&mut self, unit: TimeUnit) {
        if self.buffer.is_empty() {
            return;
        }
        self.buffer.push(unit.letter());
        self.show_buffer();
    }

    pub fn plus(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let Some(parsed) = self.take_buffer() else {
            return;
        };

        let running = self.running_total(parsed);
        self.accumulated = Some(running);
        self.secondary = running.format();
        self.display = EMPTY_DISPLAY.to_string();
    }

    pub fn equals(&mut self) {
        if self.buffer.is_empty() {
            if let Some(accumulated) = self.accumulated {
                self.display = accumulated.format();
                self.secondary.clear();
            }
            return;
        }
        let Some(parsed) = self.take_buffer() else {
            return;
        };

        let result = self.running_total(parsed);
        self.display = result.format();
        self.secondary.clear();
        self.accumulated = None;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.accumulated = None;
        self.display = EMPTY_DISPLAY.to_string();
        self.secondary.clear();
    }

    fn show_buffer(&mut self) {
        self.display = if self.buffer.is_empty() {
            EMPTY_DISPLAY.to_string()
        } else {
            self.buffer.clone()
        };
    }

    /// Clears the buffer and parses what it held; shows the error token on failure.
    fn take_buffer(&mut self) -> Option<Duration> {
        let raw = std::mem::take(&mut self.buffer);
        match Duration::parse(&raw) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                debug!(
                    "event=calculator_parse module=calculator status=error input_len={} reason={}",
                    raw.len(),
                    err
                );
                self.display = ERROR_DISPLAY.to_string();
                None
            }
        }
    }

    fn running_total(&self, parsed: Duration) -> Duration {
        match self.accumulated {
            Some(accumulated) => accumulated.add(&parsed),
            None => parsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CalculatorMode, CalculatorState, Key, ERROR_DISPLAY};
    use crate::model::duration::{Duration, TimeUnit};

    fn press_all(state: &mut CalculatorState, labels: &str) {
        for label in labels.split_whitespace() {
            let key = Key::from_label(label).expect("known keypad label");
            state.press(key);
        }
    }

    #[test]
    fn from_label_maps_keypad_buttons() {
        assert_eq!(Key::from_label("7"), Some(Key::Digit(7)));
        assert_eq!(Key::from_label("h"), Some(Key::Unit(TimeUnit::Hour)));
        assert_eq!(Key::from_label("+"), Some(Key::Plus));
        assert_eq!(Key::from_label("="), Some(Key::Equals));
        assert_eq!(Key::from_label("C"), Some(Key::Clear));
        assert_eq!(Key::from_label("H"), None);
        assert_eq!(Key::from_label("12"), None);
        assert_eq!(Key::from_label(""), None);
    }

    #[test]
    fn digits_and_units_build_display() {
        let mut state = CalculatorState::new();
        assert_eq!(state.display(), "0");
        press_all(&mut state, "1 2 h");
        assert_eq!(state.display(), "12h");
        assert_eq!(state.buffer(), "12h");
    }

    #[test]
    fn unit_on_empty_buffer_is_ignored() {
        let mut state = CalculatorState::new();
        state.unit(TimeUnit::Day);
        assert_eq!(state.display(), "0");
        assert_eq!(state.buffer(), "");
    }

    #[test]
    fn digit_above_nine_is_ignored() {
        let mut state = CalculatorState::new();
        state.digit(12);
        assert_eq!(state.buffer(), "");
    }

    #[test]
    fn plus_accumulates_and_shows_running_total() {
        let mut state = CalculatorState::new();
        press_all(&mut state, "9 0 m +");
        assert_eq!(state.display(), "0");
        assert_eq!(state.secondary(), "1h 30m");
        assert_eq!(state.mode(), CalculatorMode::Accumulating);

        press_all(&mut state, "3 0 m +");
        assert_eq!(state.secondary(), "2h");
    }

    #[test]
    fn plus_and_equals_on_empty_buffer_without_total_are_noops() {
        let mut state = CalculatorState::new();
        state.plus();
        state.equals();
        assert_eq!(state.display(), "0");
        assert_eq!(state.secondary(), "");
        assert_eq!(state.mode(), CalculatorMode::Idle);
    }

    #[test]
    fn full_expression_evaluates() {
        let mut state = CalculatorState::new();
        press_all(&mut state, "2 d 3 h 4 5 m + 1 h =");
        assert_eq!(state.display(), "2d 4h 45m");
        assert_eq!(state.secondary(), "");
        assert_eq!(state.accumulated(), None);
    }

    #[test]
    fn parse_failure_shows_error_and_keeps_accumulated() {
        let mut state = CalculatorState::new();
        press_all(&mut state, "1 h +");
        press_all(&mut state, "4 5 +");
        assert_eq!(state.display(), ERROR_DISPLAY);
        assert_eq!(state.buffer(), "");
        assert_eq!(state.accumulated(), Duration::new(0, 1, 0).ok());
        assert_eq!(state.secondary(), "1h");
    }

    #[test]
    fn equals_with_bare_digits_is_error() {
        let mut state = CalculatorState::new();
        press_all(&mut state, "5 =");
        assert_eq!(state.display(), ERROR_DISPLAY);
        assert_eq!(state.mode(), CalculatorMode::Idle);
    }

    #[test]
    fn equals_on_empty_buffer_shows_total_and_keeps_it() {
        let mut state = CalculatorState::new();
        press_all(&mut state, "2 h + =");
        assert_eq!(state.display(), "2h");
        assert_eq!(state.secondary(), "");
        assert_eq!(state.mode(), CalculatorMode::Accumulating);

        press_all(&mut state, "3 0 m =");
        assert_eq!(state.display(), "2h 30m");
        assert_eq!(state.mode(), CalculatorMode::Idle);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = CalculatorState::new();
        press_all(&mut state, "1 d + 5");
        state.press(Key::Clear);
        assert_eq!(state.view().display, "0");
        assert_eq!(state.view().secondary, "");
        assert_eq!(state.buffer(), "");
        assert_eq!(state.mode(), CalculatorMode::Idle);
    }
}
