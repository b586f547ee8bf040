//! Anchor measurement.
//!
//! Reading an element's absolute rectangle is asynchronous on most platforms:
//! the layout system answers on the next frame, not during the pass that
//! asked. The [`LayoutBridge`] trait is the seam to that platform primitive,
//! and [`AnchorTracker`] is the bookkeeping that keeps late or superseded
//! answers from being applied.
//!
//! # Flow
//!
//! 1. The controller calls [`AnchorTracker::request`] and hands the returned
//!    [`MeasureTicket`] to [`LayoutBridge::request_measure`].
//! 2. Some time later the platform reports the rectangle for that ticket.
//! 3. [`AnchorTracker::resolve`] decides whether the answer is new
//!    ([`MeasureOutcome::Changed`]), identical to what we already have
//!    ([`MeasureOutcome::Unchanged`]), or out of date ([`MeasureOutcome::Stale`]).
//!
//! Only the most recently requested ticket is ever applied, and nothing is
//! applied once the tracker has been deactivated.

use core::fmt;

use tideui_core::Rect;

/// Platform-issued handle to an anchor element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorHandle(u64);

impl AnchorHandle {
    /// Wraps a platform handle.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the platform handle.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnchorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// Receipt for one in-flight measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeasureTicket {
    anchor: AnchorHandle,
    generation: u64,
}

impl MeasureTicket {
    /// The anchor being measured.
    #[must_use]
    pub const fn anchor(&self) -> AnchorHandle {
        self.anchor
    }

    /// Monotonic request number; later requests have larger numbers.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Environment changes that can move an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutEvent {
    /// The window (and therefore the viewport) changed size.
    Resize,
    /// Some ancestor scroll container of the anchor scrolled.
    Scroll,
}

/// The platform's layout system, as seen by a floating surface.
///
/// Implementations live in the rendering backend. All methods are called on
/// the UI thread.
pub trait LayoutBridge {
    /// Asks for the absolute rectangle of `ticket.anchor()`.
    ///
    /// The answer is delivered later, by the backend calling
    /// [`SurfaceController::on_anchor_measured`](crate::SurfaceController::on_anchor_measured)
    /// with the same ticket. Report `None` if the anchor is no longer mounted.
    fn request_measure(&mut self, ticket: MeasureTicket);

    /// Starts forwarding resize events and ancestor scroll events for
    /// `anchor`.
    ///
    /// Scroll listening must use the capture phase: the container that
    /// scrolls can sit anywhere between the anchor and the viewport root.
    fn subscribe(&mut self, anchor: AnchorHandle);

    /// Stops forwarding events for `anchor`.
    fn unsubscribe(&mut self, anchor: AnchorHandle);

    /// The visible viewport, if the backend knows it.
    fn viewport(&self) -> Option<Rect> {
        None
    }
}

/// Result of feeding a measurement into an [`AnchorTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeasureOutcome {
    /// The anchor moved, appeared, or disappeared. `None` means the anchor is
    /// unmounted or has zero extent.
    Changed(Option<Rect>),
    /// Identical in all four fields to the current rectangle.
    Unchanged,
    /// Superseded by a newer request, or arrived after deactivation.
    Stale,
}

/// Tracks the latest anchor rectangle and filters measurement replies.
#[derive(Debug, Clone)]
pub struct AnchorTracker {
    anchor: AnchorHandle,
    generation: u64,
    current: Option<Rect>,
    active: bool,
}

impl AnchorTracker {
    /// Creates an inactive tracker for `anchor`.
    #[must_use]
    pub const fn new(anchor: AnchorHandle) -> Self {
        Self {
            anchor,
            generation: 0,
            current: None,
            active: false,
        }
    }

    /// The anchor this tracker measures.
    #[must_use]
    pub const fn anchor(&self) -> AnchorHandle {
        self.anchor
    }

    /// The most recently applied rectangle.
    #[must_use]
    pub const fn current(&self) -> Option<Rect> {
        self.current
    }

    /// Returns true between [`activate`](Self::activate) and
    /// [`deactivate`](Self::deactivate).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Starts accepting measurements. The previous rectangle is forgotten.
    pub const fn activate(&mut self) {
        self.active = true;
        self.current = None;
    }

    /// Stops accepting measurements and invalidates every outstanding ticket.
    pub const fn deactivate(&mut self) {
        self.active = false;
        self.current = None;
        self.generation += 1;
    }

    /// Issues a ticket for a new measurement.
    ///
    /// Returns `None` while inactive: a closed surface does no background work.
    pub const fn request(&mut self) -> Option<MeasureTicket> {
        if !self.active {
            return None;
        }
        self.generation += 1;
        Some(MeasureTicket {
            anchor: self.anchor,
            generation: self.generation,
        })
    }

    /// Applies a measurement reply.
    pub fn resolve(&mut self, ticket: MeasureTicket, rect: Option<Rect>) -> MeasureOutcome {
        if !self.active || ticket.anchor != self.anchor || ticket.generation != self.generation {
            tracing::debug!(
                anchor = %ticket.anchor,
                generation = ticket.generation,
                latest = self.generation,
                active = self.active,
                "discarding stale anchor measurement"
            );
            return MeasureOutcome::Stale;
        }

        let rect = rect.filter(|rect| !rect.is_empty());
        if rect == self.current {
            return MeasureOutcome::Unchanged;
        }

        tracing::trace!(anchor = %self.anchor, ?rect, "anchor moved");
        self.current = rect;
        MeasureOutcome::Changed(rect)
    }
}
