//! Observable view state shared between the managers and their consumers.
//!
//! Managers own an [`Observable`] and publish a fresh [`ViewState`] after every
//! load. Consumers either take a snapshot with [`Observable::get`] or
//! [`Observable::subscribe`] and await changes on the returned receiver.

use tokio::sync::watch;

/// The `{items, loading, error}` projection a UI renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<T> {
    /// Last successfully loaded list
    pub items: Vec<T>,
    /// Whether a load is in flight
    pub loading: bool,
    /// Human-readable message from the most recent failure
    pub error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// A value whose changes can be observed.
///
/// Every [`Observable::update`] notifies all subscribers, even if the closure
/// leaves the value unchanged. Code paths that must stay silent simply don't
/// call it.
#[derive(Debug)]
pub struct Observable<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Returns a snapshot of the current value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Mutates the value in place and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.sender.send_modify(f);
    }

    /// Returns a receiver that sees every subsequent update.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_is_visible_in_snapshot() {
        let state: Observable<ViewState<u32>> = Observable::default();
        state.update(|s| {
            s.items.push(7);
            s.loading = true;
        });

        let snapshot = state.get();
        assert_eq!(snapshot.items, vec![7]);
        assert!(snapshot.loading);
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_subscriber_sees_only_later_updates() {
        let state = Observable::new(0u32);
        let mut rx = state.subscribe();
        assert!(!rx.has_changed().unwrap());

        state.update(|v| *v += 1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_update_without_subscribers_still_applies() {
        let state = Observable::new(String::from("a"));
        state.update(|s| s.push('b'));
        assert_eq!(state.get(), "ab");
    }
}
