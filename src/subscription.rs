// SPDX-License-Identifier: MPL-2.0
//! Observer registry and subscription guard.
//!
//! The registry keeps observers in registration order and notifies them
//! from a snapshot of the list, so subscribing or unsubscribing from
//! inside an observer callback never skips or double-invokes the
//! observers that were registered when the dispatch began.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::trace;

use crate::state::StoreState;

pub(crate) type Observer = dyn Fn(&StoreState) + Send + Sync;

/// Ordered set of observer callbacks.
#[derive(Default)]
pub(crate) struct SubscriberSet {
    entries: Mutex<Vec<(u64, Arc<Observer>)>>,
    next_token: AtomicU64,
}

impl SubscriberSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers an observer, returning its removal token.
    pub(crate) fn add(&self, observer: Arc<Observer>) -> u64 {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().push((token, observer));
        token
    }

    /// Deregisters the observer with the given token, if still present.
    pub(crate) fn remove(&self, token: u64) {
        self.entries.lock().retain(|(t, _)| *t != token);
    }

    /// Invokes every registered observer with the given state, in
    /// registration order.
    ///
    /// Iterates over a snapshot taken outside the lock, so observers are
    /// free to subscribe or unsubscribe while being notified.
    pub(crate) fn notify(&self, state: &StoreState) {
        let snapshot: Vec<Arc<Observer>> = self
            .entries
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        trace!(observers = snapshot.len(), "notifying observers");
        for observer in snapshot {
            observer(state);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

/// RAII guard for a registered observer.
///
/// Dropping the guard deregisters the observer. Use
/// [`detach`](Subscription::detach) to keep the observer registered for
/// the store's lifetime instead.
#[must_use = "dropping a Subscription unsubscribes its observer"]
pub struct Subscription {
    set: Weak<SubscriberSet>,
    token: u64,
    detached: bool,
}

impl Subscription {
    pub(crate) fn new(set: Weak<SubscriberSet>, token: u64) -> Self {
        Self {
            set,
            token,
            detached: false,
        }
    }

    /// Deregisters the observer now.
    ///
    /// Equivalent to dropping the guard; provided for call sites where
    /// the intent should be explicit.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Keeps the observer registered for the store's lifetime.
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.detached {
            return;
        }
        if let Some(set) = self.set.upgrade() {
            set.remove(self.token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex as PlMutex;

    fn observed(log: &Arc<PlMutex<Vec<&'static str>>>, tag: &'static str) -> Arc<Observer> {
        let log = Arc::clone(log);
        Arc::new(move |_: &StoreState| log.lock().push(tag))
    }

    #[test]
    fn notify_runs_in_registration_order() {
        let set = SubscriberSet::new();
        let log = Arc::new(PlMutex::new(Vec::new()));
        set.add(observed(&log, "first"));
        set.add(observed(&log, "second"));
        set.notify(&StoreState::default());
        assert_eq!(*log.lock(), vec!["first", "second"]);
    }

    #[test]
    fn removed_observer_is_not_notified() {
        let set = SubscriberSet::new();
        let log = Arc::new(PlMutex::new(Vec::new()));
        let token = set.add(observed(&log, "first"));
        set.add(observed(&log, "second"));
        set.remove(token);
        set.notify(&StoreState::default());
        assert_eq!(*log.lock(), vec!["second"]);
    }

    #[test]
    fn observer_may_mutate_the_registry_mid_notify() {
        let set = Arc::new(SubscriberSet::new());
        let log = Arc::new(PlMutex::new(Vec::new()));

        let inner_set = Arc::clone(&set);
        let inner_log = Arc::clone(&log);
        set.add(Arc::new(move |_: &StoreState| {
            inner_log.lock().push("first");
            inner_set.add({
                let log = Arc::clone(&inner_log);
                Arc::new(move |_: &StoreState| log.lock().push("late"))
            });
        }));
        set.add(observed(&log, "second"));

        set.notify(&StoreState::default());
        // Observers present before the dispatch ran exactly once; the one
        // registered mid-notify waits for the next dispatch.
        assert_eq!(*log.lock(), vec!["first", "second"]);

        log.lock().clear();
        set.notify(&StoreState::default());
        assert_eq!(*log.lock(), vec!["first", "second", "late"]);
    }

    #[test]
    fn subscription_drop_deregisters() {
        let set = Arc::new(SubscriberSet::new());
        let token = set.add(Arc::new(|_: &StoreState| {}));
        let guard = Subscription::new(Arc::downgrade(&set), token);
        assert_eq!(set.len(), 1);
        drop(guard);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn detached_subscription_stays_registered() {
        let set = Arc::new(SubscriberSet::new());
        let token = set.add(Arc::new(|_: &StoreState| {}));
        Subscription::new(Arc::downgrade(&set), token).detach();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn subscription_outliving_the_set_is_a_noop() {
        let set = Arc::new(SubscriberSet::new());
        let token = set.add(Arc::new(|_: &StoreState| {}));
        let guard = Subscription::new(Arc::downgrade(&set), token);
        drop(set);
        drop(guard);
    }
}
