//! Publish-on-change notifications
//!
//! Every observable piece of state owns a [`Signal`]. Observers subscribe
//! with a closure and receive a [`SubscriptionId`]; the observer owns that id
//! and is responsible for calling [`Signal::unsubscribe`] when it no longer
//! wants callbacks. Dropping the signal's owner drops all subscriptions.
//!
//! ```rust
//! use uct_desktop::notify::Signal;
//!
//! let mut changed: Signal<u32> = Signal::new();
//! let id = changed.subscribe(|value| println!("value is now {value}"));
//! changed.emit(&7);
//! changed.unsubscribe(id);
//! ```

use std::fmt;

/// Handle returned by [`Signal::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

/// A list of callbacks invoked synchronously, in subscription order
pub struct Signal<T> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T> Signal<T> {
    /// Create a signal with no subscribers
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Register a callback
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if the id was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Invoke every subscriber with `value`
    pub fn emit(&mut self, value: &T) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(value);
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_subscribers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut signal: Signal<i32> = Signal::new();

        let a = Rc::clone(&log);
        signal.subscribe(move |v| a.borrow_mut().push(("a", *v)));
        let b = Rc::clone(&log);
        signal.subscribe(move |v| b.borrow_mut().push(("b", *v)));

        signal.emit(&3);
        assert_eq!(*log.borrow(), vec![("a", 3), ("b", 3)]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut signal: Signal<()> = Signal::new();

        let c = Rc::clone(&count);
        let id = signal.subscribe(move |_| *c.borrow_mut() += 1);
        signal.emit(&());
        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        signal.emit(&());

        assert_eq!(*count.borrow(), 1);
        assert_eq!(signal.subscriber_count(), 0);
    }
}
