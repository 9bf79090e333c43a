//! Market quotes and relinkable handles.
//!
//! A [`SimpleQuote`] holds a mutable market value and notifies its
//! observers whenever the value changes. Helpers and curves hold a
//! [`QuoteHandle`] rather than the quote itself so that a missing or
//! invalid quote surfaces as an error at bootstrap time.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::observer::{Observable, Observer};

/// A market observable value.
pub trait Quote: Send + Sync {
    /// Returns the current value, or `None` if the quote is unset.
    fn value(&self) -> Option<f64>;

    /// Returns true if the quote holds a usable value.
    fn is_valid(&self) -> bool {
        self.value().is_some_and(f64::is_finite)
    }

    /// The notification registry of this quote.
    fn observable(&self) -> &Observable;
}

/// A quote whose value is set directly.
///
/// # Example
///
/// ```rust
/// use pillar_core::quotes::{Quote, SimpleQuote};
///
/// let quote = SimpleQuote::new(0.02);
/// assert_eq!(quote.value(), Some(0.02));
/// let diff = quote.set_value(0.025);
/// assert!((diff - 0.005).abs() < 1e-15);
/// ```
pub struct SimpleQuote {
    value: RwLock<Option<f64>>,
    observable: Observable,
}

impl SimpleQuote {
    /// Creates a quote holding `value`.
    #[must_use]
    pub fn new(value: f64) -> Arc<Self> {
        Arc::new(Self {
            value: RwLock::new(Some(value)),
            observable: Observable::new(),
        })
    }

    /// Creates a quote with no value.
    #[must_use]
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            value: RwLock::new(None),
            observable: Observable::new(),
        })
    }

    /// Sets a new value and returns the difference to the old one.
    ///
    /// Observers are notified only if the value actually changed. The
    /// returned difference is `0.0` when the quote was previously empty.
    pub fn set_value(&self, value: f64) -> f64 {
        let previous = {
            let mut current = self.value.write();
            let previous = *current;
            *current = Some(value);
            previous
        };
        if previous != Some(value) {
            tracing::trace!(?previous, value, "quote value changed");
            self.observable.notify_observers();
        }
        previous.map_or(0.0, |p| value - p)
    }

    /// Clears the value and notifies observers.
    pub fn reset(&self) {
        let was_set = self.value.write().take().is_some();
        if was_set {
            self.observable.notify_observers();
        }
    }
}

impl Quote for SimpleQuote {
    fn value(&self) -> Option<f64> {
        *self.value.read()
    }

    fn observable(&self) -> &Observable {
        &self.observable
    }
}

impl fmt::Debug for SimpleQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleQuote")
            .field("value", &self.value())
            .finish()
    }
}

/// A shared, possibly empty, reference to a quote.
#[derive(Clone, Default)]
pub struct QuoteHandle {
    link: Option<Arc<dyn Quote>>,
}

impl QuoteHandle {
    /// Creates a handle linked to `quote`.
    pub fn new(quote: Arc<dyn Quote>) -> Self {
        Self { link: Some(quote) }
    }

    /// Creates a handle with no linked quote.
    #[must_use]
    pub fn empty() -> Self {
        Self { link: None }
    }

    /// Returns true if no quote is linked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.link.is_none()
    }

    /// Returns the linked quote, if any.
    #[must_use]
    pub fn quote(&self) -> Option<&Arc<dyn Quote>> {
        self.link.as_ref()
    }

    /// Current value of the linked quote.
    ///
    /// # Errors
    ///
    /// `CoreError::EmptyHandle` when nothing is linked, and
    /// `CoreError::InvalidQuote` when the quote is unset or not finite.
    pub fn value(&self) -> CoreResult<f64> {
        let quote = self.link.as_ref().ok_or(CoreError::EmptyHandle)?;
        match quote.value() {
            Some(v) if v.is_finite() => Ok(v),
            Some(v) => Err(CoreError::invalid_quote(format!("non-finite value {v}"))),
            None => Err(CoreError::invalid_quote("quote has no value")),
        }
    }

    /// Registers `observer` with the linked quote. Does nothing when empty.
    pub fn register_observer(&self, observer: Weak<dyn Observer>) {
        if let Some(quote) = &self.link {
            quote.observable().register_observer(observer);
        }
    }
}

impl<Q: Quote + 'static> From<Arc<Q>> for QuoteHandle {
    fn from(quote: Arc<Q>) -> Self {
        Self::new(quote)
    }
}

impl fmt::Debug for QuoteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.link {
            Some(q) => write!(f, "QuoteHandle({:?})", q.value()),
            None => write!(f, "QuoteHandle(empty)"),
        }
    }
}
