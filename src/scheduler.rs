// SPDX-License-Identifier: MPL-2.0
//! Deferred removal of dismissed toasts.
//!
//! The scheduler keeps at most one pending removal task per toast id.
//! Scheduling an id that already has a pending task is a no-op, so
//! repeated dismissals never stack timers. The map entry is cleared
//! before the removal callback runs, so a callback that re-enters the
//! scheduler observes the id as unscheduled.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::toast::ToastId;

/// One-shot removal timers, keyed by toast id.
///
/// Dropping the scheduler aborts every pending task, so no task outlives
/// the store that owns it.
pub(crate) struct RemovalScheduler {
    runtime: Handle,
    delay: Duration,
    timers: Arc<Mutex<HashMap<ToastId, AbortHandle>>>,
}

impl RemovalScheduler {
    pub(crate) fn new(runtime: Handle, delay: Duration) -> Self {
        Self {
            runtime,
            delay,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Schedules `on_fire` to run after the removal delay.
    ///
    /// No-op if a task for `id` is already pending. The timer entry is
    /// removed before `on_fire` is invoked.
    pub(crate) fn schedule(&self, id: ToastId, on_fire: impl FnOnce() + Send + 'static) {
        let mut timers = self.timers.lock();
        if timers.contains_key(&id) {
            debug!(%id, "removal already scheduled");
            return;
        }

        let delay = self.delay;
        let map = Arc::clone(&self.timers);
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            map.lock().remove(&id);
            debug!(%id, "removal timer fired");
            on_fire();
        });
        timers.insert(id, task.abort_handle());
        debug!(%id, ?delay, "removal scheduled");
    }

    /// Returns the number of pending removal tasks.
    pub(crate) fn pending(&self) -> usize {
        self.timers.lock().len()
    }
}

impl Drop for RemovalScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.timers.lock().drain() {
            handle.abort();
        }
    }
}
