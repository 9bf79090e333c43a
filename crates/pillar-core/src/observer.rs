//! Change notification between market data and dependent objects.
//!
//! An [`Observable`] keeps weak references to its observers, so an
//! observer that has been dropped simply stops receiving updates and is
//! pruned on the next notification. Registration never keeps an observer
//! alive.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

/// Receiver of change notifications.
pub trait Observer: Send + Sync {
    /// Called when an observed object changes.
    fn update(&self);
}

/// Registry of observers to notify on change.
#[derive(Default)]
pub struct Observable {
    observers: RwLock<Vec<Weak<dyn Observer>>>,
}

impl Observable {
    /// Creates an observable with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Registering the same observer twice is a no-op.
    pub fn register_observer(&self, observer: Weak<dyn Observer>) {
        let mut observers = self.observers.write();
        if !observers.iter().any(|o| Weak::ptr_eq(o, &observer)) {
            observers.push(observer);
        }
    }

    /// Removes an observer.
    pub fn unregister_observer(&self, observer: &Weak<dyn Observer>) {
        self.observers.write().retain(|o| !Weak::ptr_eq(o, observer));
    }

    /// Notifies every live observer.
    ///
    /// The lock is released before any `update` runs, so observers may
    /// register or notify further without deadlocking.
    pub fn notify_observers(&self) {
        let live: Vec<Arc<dyn Observer>> = {
            let mut observers = self.observers.write();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer.update();
        }
    }

    /// Number of live registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }
}

impl std::fmt::Debug for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.observer_count())
            .finish()
    }
}
