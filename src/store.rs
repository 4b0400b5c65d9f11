// SPDX-License-Identifier: MPL-2.0
//! The toast store: dispatcher, public API, and capability handles.
//!
//! A [`ToastStore`] owns the toast sequence, the observer registry, and
//! the removal scheduler. Every state change funnels through the private
//! dispatch path: the pure transition computes the next state under the
//! state lock, dismissals schedule their deferred removal, and every
//! registered observer receives a snapshot of the new state in
//! registration order.
//!
//! Stores are explicitly constructed rather than process-global, so
//! tests build a fresh instance each. Cloning a store clones a handle to
//! the same shared instance.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::debug;

use crate::config::StoreConfig;
use crate::scheduler::RemovalScheduler;
use crate::state::{transition, Action, StoreState};
use crate::subscription::{Observer, SubscriberSet, Subscription};
use crate::toast::{IdAllocator, Toast, ToastContent, ToastId, ToastPatch};

struct StoreInner {
    config: StoreConfig,
    state: Mutex<StoreState>,
    subscribers: Arc<SubscriberSet>,
    scheduler: RemovalScheduler,
    ids: IdAllocator,
}

/// In-memory store of transient user notifications.
///
/// The store keeps at most the configured capacity of toasts, newest
/// first. Dismissing a toast marks it as closing and schedules its
/// removal after the configured delay; the delay is a backstop, with
/// explicit dismissal by the user or application as the primary path.
///
/// All operations are total: unknown ids are no-ops, never failures.
///
/// # Example
///
/// ```no_run
/// use toast_store::{ToastContent, ToastStore};
///
/// # async fn demo() {
/// let store = ToastStore::new();
/// let saved = store.create(ToastContent::new().with_title("Saved"));
/// // ... later, when the user closes it:
/// saved.on_open_change(false);
/// # }
/// ```
#[derive(Clone)]
pub struct ToastStore {
    inner: Arc<StoreInner>,
}

impl ToastStore {
    /// Creates a store with the default configuration on the ambient
    /// Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime. Use
    /// [`with_runtime`](Self::with_runtime) to inject a handle instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_runtime(StoreConfig::default(), Handle::current())
    }

    /// Creates a store with the given configuration on the ambient
    /// Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime. Use
    /// [`with_runtime`](Self::with_runtime) to inject a handle instead.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_runtime(config, Handle::current())
    }

    /// Creates a store that spawns its removal timers on the given
    /// runtime handle.
    #[must_use]
    pub fn with_runtime(config: StoreConfig, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                config,
                state: Mutex::new(StoreState::default()),
                subscribers: Arc::new(SubscriberSet::new()),
                scheduler: RemovalScheduler::new(runtime, config.remove_delay()),
                ids: IdAllocator::new(),
            }),
        }
    }

    /// Creates a toast and returns a capability handle bound to it.
    ///
    /// The toast is added open, on top of the sequence; the oldest
    /// entries beyond capacity are dropped. The handle carries
    /// `update`/`dismiss` for that one toast, so the visual layer never
    /// needs the store itself.
    pub fn create(&self, content: ToastContent) -> ToastHandle {
        let id = self.inner.ids.allocate();
        debug!(%id, "creating toast");
        Self::dispatch(&self.inner, Action::Add(Toast::new(id, content)));
        ToastHandle {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Merges a patch over the toast with the given id.
    ///
    /// Fields the patch leaves unset are untouched. No-op for unknown
    /// ids.
    pub fn update(&self, id: ToastId, patch: ToastPatch) {
        Self::dispatch(&self.inner, Action::Update { id, patch });
    }

    /// Marks the toast with the given id as closing and schedules its
    /// removal.
    ///
    /// The toast stays in the state with `open == false` until the
    /// removal fires. Dismissing an unknown id leaves the toasts
    /// unchanged, aside from an inert timer that clears itself.
    pub fn dismiss(&self, id: ToastId) {
        Self::dispatch(&self.inner, Action::Dismiss(Some(id)));
    }

    /// Marks every current toast as closing and schedules removal for
    /// each.
    pub fn dismiss_all(&self) {
        Self::dispatch(&self.inner, Action::Dismiss(None));
    }

    /// Registers an observer for subsequent state changes.
    ///
    /// Observers run synchronously on the dispatching call, in
    /// registration order, and receive a snapshot of the new state. They
    /// only see changes dispatched after registration; read
    /// [`state`](Self::state) for the current value. Observers may
    /// subscribe, unsubscribe, or call back into the store. A panicking
    /// observer propagates to the dispatching caller and suppresses the
    /// observers after it for that dispatch.
    ///
    /// The returned guard deregisters the observer on drop.
    pub fn subscribe(&self, observer: impl Fn(&StoreState) + Send + Sync + 'static) -> Subscription {
        let observer: Arc<Observer> = Arc::new(observer);
        let token = self.inner.subscribers.add(observer);
        Subscription::new(Arc::downgrade(&self.inner.subscribers), token)
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> StoreState {
        self.inner.state.lock().clone()
    }

    /// Returns the number of toasts with a pending removal timer.
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.inner.scheduler.pending()
    }

    /// Applies an action, schedules removals for dismissed ids, and
    /// fans the new state out to observers.
    ///
    /// The state lock is released before scheduling and notification,
    /// so observers can re-enter the store without deadlocking.
    fn dispatch(inner: &Arc<StoreInner>, action: Action) {
        debug!(?action, "dispatching");
        let dismissed: Vec<ToastId>;
        let snapshot = {
            let mut state = inner.state.lock();
            dismissed = match &action {
                Action::Dismiss(Some(id)) => vec![*id],
                Action::Dismiss(None) => state.ids(),
                _ => Vec::new(),
            };
            *state = transition(&state, action, inner.config.capacity());
            state.clone()
        };

        for id in dismissed {
            let store = Arc::downgrade(inner);
            inner.scheduler.schedule(id, move || {
                if let Some(inner) = store.upgrade() {
                    Self::dispatch(&inner, Action::Remove(Some(id)));
                }
            });
        }

        inner.subscribers.notify(&snapshot);
    }
}

/// Capability handle for one toast, returned by [`ToastStore::create`].
///
/// The handle holds a weak reference to its store; once the store is
/// dropped every method degrades to a no-op, matching the store's
/// no-failure surface.
#[derive(Clone)]
pub struct ToastHandle {
    id: ToastId,
    store: Weak<StoreInner>,
}

impl ToastHandle {
    /// Returns the id of the toast this handle controls.
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Merges a patch over this toast.
    pub fn update(&self, patch: ToastPatch) {
        if let Some(inner) = self.store.upgrade() {
            ToastStore::dispatch(&inner, Action::Update { id: self.id, patch });
        }
    }

    /// Marks this toast as closing and schedules its removal.
    pub fn dismiss(&self) {
        if let Some(inner) = self.store.upgrade() {
            ToastStore::dispatch(&inner, Action::Dismiss(Some(self.id)));
        }
    }

    /// Reports a visibility change from the visual layer.
    ///
    /// Closing (`open == false`) dismisses the toast; anything else is
    /// a no-op.
    pub fn on_open_change(&self, open: bool) {
        if !open {
            self.dismiss();
        }
    }
}
