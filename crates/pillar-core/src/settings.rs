//! Shared evaluation date.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::observer::{Observable, Observer};
use crate::types::Date;

/// The "today" that curves with a moving reference date follow.
///
/// There is no process-wide global: each context owns an
/// `Arc<EvaluationDate>` and passes it to the curves that should track it.
pub struct EvaluationDate {
    date: RwLock<Date>,
    observable: Observable,
}

impl EvaluationDate {
    /// Creates an evaluation date set to `date`.
    #[must_use]
    pub fn new(date: Date) -> Arc<Self> {
        Arc::new(Self {
            date: RwLock::new(date),
            observable: Observable::new(),
        })
    }

    /// Current evaluation date.
    #[must_use]
    pub fn value(&self) -> Date {
        *self.date.read()
    }

    /// Moves the evaluation date, notifying observers if it changed.
    pub fn set(&self, date: Date) {
        let changed = {
            let mut current = self.date.write();
            let changed = *current != date;
            *current = date;
            changed
        };
        if changed {
            tracing::debug!(%date, "evaluation date moved");
            self.observable.notify_observers();
        }
    }

    /// Registers an observer of date changes.
    pub fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.observable.register_observer(observer);
    }

    /// The notification registry.
    #[must_use]
    pub fn observable(&self) -> &Observable {
        &self.observable
    }
}

impl std::fmt::Debug for EvaluationDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EvaluationDate").field(&self.value()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);

    impl Observer for Counter {
        fn update(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_set_notifies_on_change() {
        let today = EvaluationDate::new(Date::from_ymd(2025, 1, 2).unwrap());
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let as_dyn: Arc<dyn Observer> = counter.clone();
        today.register_observer(Arc::downgrade(&as_dyn));

        today.set(Date::from_ymd(2025, 1, 2).unwrap());
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);

        today.set(Date::from_ymd(2025, 1, 3).unwrap());
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert_eq!(today.value(), Date::from_ymd(2025, 1, 3).unwrap());
    }
}
