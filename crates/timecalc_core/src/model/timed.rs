//! Value annotated with an accumulated duration.
//!
//! # Responsibility
//! - Pair any value with the time spent producing it.
//! - Compose timed values with `map`, `flat_map` and `combine`.
//!
//! # Invariants
//! - `flat_map` is the only operation that adds durations together.
//! - `combine` preserves input order in the value and sums every duration.

use crate::model::duration::Duration;
use serde::{Deserialize, Serialize};

/// A value of type `T` together with its accumulated [`Duration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timed<T> {
    pub duration: Duration,
    pub value: T,
}

impl<T> Timed<T> {
    pub fn new(duration: Duration, value: T) -> Self {
        Self { duration, value }
    }

    /// Lifts a value with zero duration.
    pub fn pure(value: T) -> Self {
        Self::new(Duration::ZERO, value)
    }

    /// Transforms the value, keeping the duration.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timed<U> {
        Timed::new(self.duration, f(self.value))
    }

    /// Chains a timed computation; the resulting duration is the sum of both.
    pub fn flat_map<U>(self, f: impl FnOnce(T) -> Timed<U>) -> Timed<U> {
        let next = f(self.value);
        Timed::new(self.duration.add(&next.duration), next.value)
    }

    /// Folds timed values into one timed list, in input order.
    ///
    /// `combine(vec![])` equals `Timed::pure(vec![])`.
    pub fn combine(items: impl IntoIterator<Item = Timed<T>>) -> Timed<Vec<T>> {
        items
            .into_iter()
            .fold(Timed::pure(Vec::new()), |acc, timed| {
                acc.flat_map(|mut values| {
                    timed.map(|value| {
                        values.push(value);
                        values
                    })
                })
            })
    }
}
