// SPDX-License-Identifier: MPL-2.0
//! Store state and the pure transition function.
//!
//! Every state change goes through [`transition`], which maps the current
//! state and an [`Action`] to a fresh state value. The function performs
//! no I/O and starts no timers; the removal-scheduling side effect of a
//! dismissal belongs to the dispatcher, keeping the reducer testable
//! without a runtime.

use crate::config::ToastCapacity;
use crate::toast::{Toast, ToastId, ToastPatch};

/// The store's observable state: the current toasts, newest first.
///
/// After any transition the sequence holds at most the configured
/// capacity; overflow drops the oldest (tail) entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    toasts: Vec<Toast>,
}

impl StoreState {
    /// Returns the current toasts, newest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Returns the toast with the given id, if present.
    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id() == id)
    }

    /// Returns the number of toasts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Returns true if there are no toasts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub(crate) fn ids(&self) -> Vec<ToastId> {
        self.toasts.iter().map(Toast::id).collect()
    }
}

/// A state change request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Prepend a toast, truncating to capacity.
    Add(Toast),
    /// Merge a patch over the toast with the given id; no-op if absent.
    Update {
        /// Target toast.
        id: ToastId,
        /// Fields to replace.
        patch: ToastPatch,
    },
    /// Mark the given toast (or every toast, if `None`) as closing.
    Dismiss(Option<ToastId>),
    /// Delete the given toast (or every toast, if `None`) from the state.
    Remove(Option<ToastId>),
}

/// Applies an action to a state, returning the new state.
///
/// Pure: the input state is never mutated. Unknown ids are no-ops for
/// `Update`, `Dismiss`, and `Remove`.
#[must_use]
pub fn transition(state: &StoreState, action: Action, capacity: ToastCapacity) -> StoreState {
    match action {
        Action::Add(toast) => {
            let mut toasts = Vec::with_capacity(state.toasts.len() + 1);
            toasts.push(toast);
            toasts.extend(state.toasts.iter().cloned());
            toasts.truncate(capacity.value());
            StoreState { toasts }
        }
        Action::Update { id, patch } => StoreState {
            toasts: state
                .toasts
                .iter()
                .map(|t| if t.id() == id { t.merged(&patch) } else { t.clone() })
                .collect(),
        },
        Action::Dismiss(target) => StoreState {
            toasts: state
                .toasts
                .iter()
                .map(|t| {
                    if target.is_none() || target == Some(t.id()) {
                        t.closed()
                    } else {
                        t.clone()
                    }
                })
                .collect(),
        },
        Action::Remove(Some(id)) => StoreState {
            toasts: state
                .toasts
                .iter()
                .filter(|t| t.id() != id)
                .cloned()
                .collect(),
        },
        Action::Remove(None) => StoreState::default(),
    }
}
