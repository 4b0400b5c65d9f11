// SPDX-License-Identifier: MPL-2.0
//! `toast_store` is a capacity-bounded, in-memory store of transient user
//! notifications ("toasts") for UI layers to render.
//!
//! The store keeps the newest toasts up to a fixed capacity, applies
//! every change through a pure transition function, fans each new state
//! out synchronously to registered observers, and removes dismissed
//! toasts after a deferred backstop delay. Rendering is out of scope:
//! the visual layer consumes [`StoreState`] snapshots and reports user
//! intent back through the [`ToastHandle`] returned by
//! [`ToastStore::create`].

#![doc(html_root_url = "https://docs.rs/toast_store/0.1.0")]

mod config;
mod scheduler;
mod state;
mod store;
mod subscription;
mod toast;

pub use config::{
    StoreConfig, ToastCapacity, DEFAULT_REMOVE_DELAY_MS, DEFAULT_TOAST_CAPACITY,
    MIN_TOAST_CAPACITY,
};
pub use state::{transition, Action, StoreState};
pub use store::{ToastHandle, ToastStore};
pub use subscription::Subscription;
pub use toast::{Toast, ToastAction, ToastContent, ToastId, ToastPatch};
