//! Notification hooks for chip and text changes.
//!
//! ## Usage
//!
//! Register closures on [`ChipsView`](crate::ChipsView) with
//! `set_chip_added_listener`, `set_chip_deleted_listener` and
//! `set_text_changed_listener`. They run synchronously before the mutating
//! call returns.

use std::sync::Arc;

/// Stable, comparable handle for a `Fn(&T)` notification.
///
/// `Listener` compares by identity (`Arc::ptr_eq`), so replacing a listener
/// with a clone of itself can be detected without comparing closures.
///
/// ```
/// use chipsview::listener::Listener;
///
/// let listener: Listener<str> = Listener::new(|text: &str| assert_eq!(text, "hi"));
/// let copy = listener.clone();
/// assert_eq!(listener, copy);
/// listener.call("hi");
/// ```
pub struct Listener<T: ?Sized> {
    handler: Arc<dyn Fn(&T) + Send + Sync>,
}

impl<T: ?Sized> Listener<T> {
    /// Creates a listener from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Invokes the listener.
    pub fn call(&self, value: &T) {
        (self.handler)(value);
    }
}

impl<T: ?Sized> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T: ?Sized> PartialEq for Listener<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T: ?Sized> Eq for Listener<T> {}

impl<T: ?Sized> std::fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener").finish_non_exhaustive()
    }
}

/// The three hooks a chips control exposes.
pub(crate) struct Listeners<V> {
    pub(crate) chip_added: Option<Listener<V>>,
    pub(crate) chip_deleted: Option<Listener<V>>,
    pub(crate) text_changed: Option<Listener<str>>,
}

impl<V> Default for Listeners<V> {
    fn default() -> Self {
        Self {
            chip_added: None,
            chip_deleted: None,
            text_changed: None,
        }
    }
}

impl<V> Listeners<V> {
    pub(crate) fn chip_added(&self, data: &V) {
        if let Some(listener) = &self.chip_added {
            listener.call(data);
        }
    }

    pub(crate) fn chip_deleted(&self, data: &V) {
        if let Some(listener) = &self.chip_deleted {
            listener.call(data);
        }
    }

    pub(crate) fn text_changed(&self, text: &str) {
        if let Some(listener) = &self.text_changed {
            listener.call(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn listeners_compare_by_identity() {
        let a: Listener<u32> = Listener::new(|_| {});
        let b: Listener<u32> = Listener::new(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn missing_listener_is_skipped() {
        let listeners: Listeners<u32> = Listeners::default();
        listeners.chip_added(&1);
        listeners.chip_deleted(&1);
        listeners.text_changed("x");
    }

    #[test]
    fn registered_listener_receives_payload() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listeners = Listeners {
            chip_deleted: Some(Listener::new(move |value: &u32| sink.lock().push(*value))),
            ..Listeners::default()
        };

        listeners.chip_deleted(&7);
        listeners.chip_added(&8);
        assert_eq!(*seen.lock(), vec![7]);
    }
}
