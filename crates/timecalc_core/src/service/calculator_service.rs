//! Calculator use-case service.
//!
//! # Responsibility
//! - Own the keypad `CalculatorState` for one application session.
//! - Publish the rendered `CalculatorView` after every key press.

use crate::model::calculator::{CalculatorMode, CalculatorState, CalculatorView, Key};
use crate::model::duration::TimeUnit;
use crate::observe::{StateCell, SubscriptionId};

/// Keypad service; subscribers see display changes only.
pub struct CalculatorService {
    state: CalculatorState,
    view: StateCell<CalculatorView>,
}

impl Default for CalculatorService {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorService {
    pub fn new() -> Self {
        let state = CalculatorState::new();
        let view = StateCell::new(state.view());
        Self { state, view }
    }

    pub fn view(&self) -> &CalculatorView {
        self.view.get()
    }

    pub fn mode(&self) -> CalculatorMode {
        self.state.mode()
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&CalculatorView) + Send + 'static,
    ) -> SubscriptionId {
        self.view.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.view.unsubscribe(id)
    }

    /// Applies one key press and returns the resulting view.
    pub fn press(&mut self, key: Key) -> &CalculatorView {
        self.state.press(key);
        self.view.set(self.state.view());
        self.view.get()
    }

    pub fn digit(&mut self, digit: u8) -> &CalculatorView {
        self.press(Key::Digit(digit))
    }

    pub fn unit(&mut self, unit: TimeUnit) -> &CalculatorView {
        self.press(Key::Unit(unit))
    }

    pub fn plus(&mut self) -> &CalculatorView {
        self.press(Key::Plus)
    }

    pub fn equals(&mut self) -> &CalculatorView {
        self.press(Key::Equals)
    }

    pub fn clear(&mut self) -> &CalculatorView {
        self.press(Key::Clear)
    }
}

#[cfg(test)]
mod tests {
    use super::CalculatorService;
    use crate::model::duration::TimeUnit;
    use std::sync::{Arc, Mutex};

    #[test]
    fn subscribers_see_each_distinct_display() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut service = CalculatorService::new();
        let sink = Arc::clone(&seen);
        service.subscribe(move |view| sink.lock().unwrap().push(view.display.clone()));

        service.digit(4);
        service.unit(TimeUnit::Hour);
        service.unit(TimeUnit::Hour);
        service.equals();
        service.equals();

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["4".to_string(), "4h".to_string(), "4hh".to_string(), "4h".to_string()]
        );
    }

    #[test]
    fn clear_returns_initial_view() {
        let mut service = CalculatorService::new();
        service.digit(1);
        service.unit(TimeUnit::Day);
        service.plus();
        let view = service.clear();
        assert_eq!(view.display, "0");
        assert_eq!(view.secondary, "");
    }
}
