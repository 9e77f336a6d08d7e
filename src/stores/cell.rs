//! Publish-subscribe single-value state container
//!
//! A `StateCell` holds one current value and notifies subscribers whenever
//! it changes. It is initialized once and lives for the duration of the
//! process; there is no explicit teardown.

use tokio::sync::watch;

/// A single-value state container with change subscription
///
/// Backed by a `tokio::sync::watch` channel: readers either take a snapshot
/// of the current value with [`StateCell::get`] or observe every update
/// through [`StateCell::subscribe`].
///
/// # Examples
///
/// ```
/// use namunamu::stores::StateCell;
///
/// let cell = StateCell::new(0u32);
/// cell.set(5);
/// assert_eq!(cell.get(), 5);
///
/// cell.update(|v| *v += 1);
/// assert_eq!(cell.get(), 6);
/// ```
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + Send + Sync + 'static> StateCell<T> {
    /// Create a cell holding `initial`
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Snapshot the current value
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the current value, notifying subscribers
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Modify the current value in place, notifying subscribers
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Subscribe to value changes
    ///
    /// The receiver observes the value at subscription time and every
    /// subsequent update.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}
