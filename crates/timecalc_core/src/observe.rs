//! Synchronous observable state cells.
//!
//! # Responsibility
//! - Hold the latest snapshot a service publishes to the presentation layer.
//! - Notify subscribers in-line on every effective change.
//!
//! # Invariants
//! - `set` notifies only when the new value differs from the current one.
//! - Subscribers run in registration order on the caller's thread.

use std::collections::BTreeMap;

/// Handle returned by [`StateCell::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&T) + Send>;

/// Latest-value cell with distinct-until-changed notification.
pub struct StateCell<T> {
    value: T,
    subscribers: BTreeMap<SubscriptionId, Subscriber<T>>,
    next_id: u64,
}

impl<T: PartialEq> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value; returns whether subscribers were notified.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for subscriber in self.subscribers.values_mut() {
            subscriber(&self.value);
        }
        true
    }

    /// Registers a callback. It is not invoked for the current value.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&T) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, Box::new(subscriber));
        id
    }

    /// Removes a callback; returns `false` when the handle is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Default + PartialEq> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::StateCell;
    use std::sync::{Arc, Mutex};

    #[test]
    fn set_notifies_only_on_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut cell = StateCell::new(1);
        let sink = Arc::clone(&seen);
        cell.subscribe(move |value| sink.lock().unwrap().push(*value));

        assert!(cell.set(2));
        assert!(!cell.set(2));
        assert!(cell.set(3));

        assert_eq!(*seen.lock().unwrap(), vec![2, 3]);
        assert_eq!(*cell.get(), 3);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let count = Arc::new(Mutex::new(0));
        let mut cell = StateCell::new(String::new());
        let sink = Arc::clone(&count);
        let id = cell.subscribe(move |_| *sink.lock().unwrap() += 1);

        cell.set("a".to_string());
        assert!(cell.unsubscribe(id));
        assert!(!cell.unsubscribe(id));
        cell.set("b".to_string());

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(cell.subscriber_count(), 0);
    }
}
