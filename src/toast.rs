// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the [`Toast`] record held by the store, its
//! creation payload [`ToastContent`], the partial update [`ToastPatch`],
//! and the per-store identifier allocator.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Unique identifier for a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates an identifier from a raw value.
    ///
    /// Store-allocated identifiers come from the store itself; this
    /// constructor exists for driving [`transition`](crate::transition)
    /// directly in tests and benchmarks.
    #[must_use]
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Allocates monotonically increasing toast identifiers.
///
/// Each store owns its own allocator, so identifiers are unique per store
/// instance. The counter starts at 1 and wraps at the `u64` bound, which
/// only recurs after astronomically many allocations.
#[derive(Debug)]
pub(crate) struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub(crate) fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Returns the next identifier, advancing the counter.
    pub(crate) fn allocate(&self) -> ToastId {
        ToastId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// An opaque UI affordance attached to a toast.
///
/// The store never invokes the callback; the visual layer calls
/// [`trigger`](ToastAction::trigger) when the user activates the action.
/// Equality and `Debug` consider the label only.
#[derive(Clone)]
pub struct ToastAction {
    label: String,
    on_select: Arc<dyn Fn() + Send + Sync>,
}

impl ToastAction {
    /// Creates an action with a display label and a selection callback.
    pub fn new(label: impl Into<String>, on_select: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_select: Arc::new(on_select),
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Invokes the selection callback.
    pub fn trigger(&self) {
        (self.on_select)();
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ToastAction {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for ToastAction {}

/// A toast held by the store.
///
/// A toast with `open == false` has begun its closing transition but is
/// still present in the state; it leaves the sequence only through a
/// distinct removal, either timer-driven or explicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: ToastId,
    title: Option<String>,
    description: Option<String>,
    action: Option<ToastAction>,
    open: bool,
}

impl Toast {
    /// Creates an open toast from a creation payload.
    #[must_use]
    pub fn new(id: ToastId, content: ToastContent) -> Self {
        Self {
            id,
            title: content.title,
            description: content.description,
            action: content.action,
            open: true,
        }
    }

    /// Returns the toast's unique ID.
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Returns the title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the attached action, if any.
    #[must_use]
    pub fn action(&self) -> Option<&ToastAction> {
        self.action.as_ref()
    }

    /// Returns whether the toast is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns a copy with the patch merged over this toast, field-wise.
    ///
    /// Fields the patch leaves as `None` are untouched; the identity is
    /// preserved.
    #[must_use]
    pub(crate) fn merged(&self, patch: &ToastPatch) -> Self {
        Self {
            id: self.id,
            title: patch.title.clone().or_else(|| self.title.clone()),
            description: patch
                .description
                .clone()
                .or_else(|| self.description.clone()),
            action: patch.action.clone().or_else(|| self.action.clone()),
            open: patch.open.unwrap_or(self.open),
        }
    }

    /// Returns a copy marked as closing (`open == false`).
    #[must_use]
    pub(crate) fn closed(&self) -> Self {
        Self {
            open: false,
            ..self.clone()
        }
    }
}

/// Creation payload for a toast.
///
/// The store assigns the identifier and forces `open:true`; everything
/// else is opaque display payload.
///
/// # Example
///
/// ```
/// use toast_store::ToastContent;
///
/// let content = ToastContent::new()
///     .with_title("Saved")
///     .with_description("Your board was saved.");
/// assert_eq!(content.title(), Some("Saved"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastContent {
    title: Option<String>,
    description: Option<String>,
    action: Option<ToastAction>,
}

impl ToastContent {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches an action.
    #[must_use]
    pub fn with_action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Returns the title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the attached action, if any.
    #[must_use]
    pub fn action(&self) -> Option<&ToastAction> {
        self.action.as_ref()
    }
}

/// Partial update for an existing toast.
///
/// `None` fields are untouched; `Some` fields replace the current value.
/// Clearing a field back to `None` is intentionally not expressible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastPatch {
    title: Option<String>,
    description: Option<String>,
    action: Option<ToastAction>,
    open: Option<bool>,
}

impl ToastPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the action.
    #[must_use]
    pub fn with_action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Replaces the open flag.
    #[must_use]
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }
}
