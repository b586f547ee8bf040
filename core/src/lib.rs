//! Core primitives for the `tideui` floating-surface engine.
//!
//! This crate holds the pieces every other `tideui` crate agrees on:
//!
//! - [`layout`]: absolute screen geometry ([`Rect`], [`Size`], [`Point`], [`Axis`]),
//! - [`id`]: the [`OverlayId`] under which a surface registers with the host,
//! - [`controlled`]: the owned-or-delegated state cell used for `is_open`,
//! - [`slot`]: header/content/footer assignment for composite surfaces.

pub mod controlled;
pub mod id;
pub mod layout;
pub mod slot;

pub use controlled::{ControlError, ControlMode, Controlled};
pub use id::OverlayId;
pub use layout::{Axis, Point, Rect, Size};
pub use slot::{SlotKind, Slots, Slotted};
