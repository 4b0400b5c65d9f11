// SPDX-License-Identifier: MPL-2.0
//! Centralized default values and per-store configuration.
//!
//! This module is the single source of truth for the store's tunable
//! constants. There is no runtime configuration file; a [`StoreConfig`]
//! is fixed at store construction time.

use std::time::Duration;

// ==========================================================================
// Capacity Defaults
// ==========================================================================

/// Default maximum number of toasts retained simultaneously.
pub const DEFAULT_TOAST_CAPACITY: usize = 1;

/// Minimum allowed toast capacity.
pub const MIN_TOAST_CAPACITY: usize = 1;

// ==========================================================================
// Removal Defaults
// ==========================================================================

/// Default delay before a dismissed toast is removed from the state (in ms).
///
/// Deliberately large: explicit dismissal followed by the visual layer's
/// close transition is the primary removal path, and the timer acts as a
/// backstop that eventually clears entries nothing else removed.
pub const DEFAULT_REMOVE_DELAY_MS: u64 = 1_000_000;

/// Maximum number of toasts retained at once.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always at least [`MIN_TOAST_CAPACITY`].
///
/// # Example
///
/// ```
/// use toast_store::ToastCapacity;
///
/// let capacity = ToastCapacity::new(3);
/// assert_eq!(capacity.value(), 3);
///
/// // Zero is clamped up to the minimum
/// assert_eq!(ToastCapacity::new(0).value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastCapacity(usize);

impl ToastCapacity {
    /// Creates a new capacity value, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.max(MIN_TOAST_CAPACITY))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for ToastCapacity {
    fn default() -> Self {
        Self(DEFAULT_TOAST_CAPACITY)
    }
}

/// Per-store configuration, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    capacity: ToastCapacity,
    remove_delay: Duration,
}

impl StoreConfig {
    /// Creates a configuration with the default capacity and removal delay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of toasts retained at once.
    #[must_use]
    pub fn with_capacity(mut self, capacity: ToastCapacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the delay between dismissal and removal from the state.
    #[must_use]
    pub fn with_remove_delay(mut self, delay: Duration) -> Self {
        self.remove_delay = delay;
        self
    }

    /// Returns the configured capacity.
    #[must_use]
    pub fn capacity(&self) -> ToastCapacity {
        self.capacity
    }

    /// Returns the configured removal delay.
    #[must_use]
    pub fn remove_delay(&self) -> Duration {
        self.remove_delay
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: ToastCapacity::default(),
            remove_delay: Duration::from_millis(DEFAULT_REMOVE_DELAY_MS),
        }
    }
}
