//! State cells that are either owned by a component or delegated to its caller.
//!
//! Many widgets accept an optional binding: when the caller passes one, the
//! caller is the source of truth; when it does not, the widget keeps the value
//! itself. [`Controlled`] models the two cases as separate variants that are
//! chosen once, at construction.
//!
//! Switching between the two modes over the lifetime of a component hides
//! bugs (a value suddenly stops responding to the caller, or the caller's
//! writes are silently ignored), so [`Controlled::reconcile`] rejects it.
//!
//! ```ignore
//! use nami::binding;
//!
//! let owned = Controlled::new(None, false);
//! let shared = binding(true);
//! let delegated = Controlled::new(Some(shared.clone()), false);
//!
//! assert!(!owned.get());
//! assert!(delegated.get());
//! ```

use core::fmt;

use nami::{Binding, Signal};
use thiserror::Error;

/// Which party holds authority over a [`Controlled`] value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMode {
    /// The component owns the value.
    Owned,
    /// The caller owns the value through a binding.
    Delegated,
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owned => f.write_str("uncontrolled"),
            Self::Delegated => f.write_str("controlled"),
        }
    }
}

/// Errors raised by [`Controlled`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// A re-render attempted to change who owns the value.
    #[error("value cannot switch from {from} to {to} after construction")]
    ModeSwitch {
        /// Mode chosen at construction.
        from: ControlMode,
        /// Mode the caller attempted to switch to.
        to: ControlMode,
    },
}

/// A value that is either owned locally or delegated to a caller's binding.
pub enum Controlled<T: 'static> {
    /// The component keeps the value.
    Owned(T),
    /// The caller's binding is the source of truth.
    Delegated(Binding<T>),
}

impl<T: Clone + 'static> Controlled<T> {
    /// Chooses the mode from whether the caller supplied a binding.
    #[must_use]
    pub fn new(external: Option<Binding<T>>, default: T) -> Self {
        external.map_or(Self::Owned(default), Self::Delegated)
    }

    /// Returns the authority mode fixed at construction.
    #[must_use]
    pub const fn mode(&self) -> ControlMode {
        match self {
            Self::Owned(_) => ControlMode::Owned,
            Self::Delegated(_) => ControlMode::Delegated,
        }
    }

    /// Returns true if the caller owns the value.
    #[must_use]
    pub const fn is_delegated(&self) -> bool {
        matches!(self, Self::Delegated(_))
    }

    /// Reads the current value from whichever party owns it.
    #[must_use]
    pub fn get(&self) -> T {
        match self {
            Self::Owned(value) => value.clone(),
            Self::Delegated(binding) => binding.get(),
        }
    }

    /// Writes the value.
    ///
    /// For a delegated cell this writes through the caller's binding, so only
    /// call it on behalf of the caller.
    pub fn set(&mut self, value: T) {
        match self {
            Self::Owned(slot) => *slot = value,
            Self::Delegated(binding) => binding.set(value),
        }
    }

    /// Checks that a re-render keeps the mode chosen at construction.
    ///
    /// `supplied` is whether the new configuration carries a caller binding.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::ModeSwitch`] if the mode would change.
    pub fn reconcile(&self, supplied: bool) -> Result<(), ControlError> {
        let to = if supplied {
            ControlMode::Delegated
        } else {
            ControlMode::Owned
        };
        let from = self.mode();
        if from == to {
            Ok(())
        } else {
            tracing::warn!(%from, %to, "rejected control mode switch");
            Err(ControlError::ModeSwitch { from, to })
        }
    }
}

impl<T: 'static> fmt::Debug for Controlled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owned(_) => f.debug_tuple("Owned").finish_non_exhaustive(),
            Self::Delegated(_) => f.debug_tuple("Delegated").finish_non_exhaustive(),
        }
    }
}
