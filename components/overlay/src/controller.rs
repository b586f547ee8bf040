//! The floating surface controller.
//!
//! A [`SurfaceController`] drives one popover (menu, tooltip, dropdown)
//! through its lifecycle:
//!
//! ```text
//!            open request                first visible placement
//!   Closed ───────────────▶ Opening ─────────────────────────────▶ Open
//!     ▲                                                             │
//!     │          unmounted from host                close request   │
//!     └──────────────────────────── Closing ◀───────────────────────┘
//! ```
//!
//! On `Opening` the surface is mounted hidden, so the renderer can lay it out
//! and report its size; the anchor is measured; and resize/scroll
//! subscriptions are taken. Each new anchor rectangle or surface size
//! recomputes the placement. Closing synchronously drops the subscriptions,
//! invalidates pending measurements, and unmounts the layer.
//!
//! # Controlled surfaces
//!
//! When the caller supplies an `is_open` binding, the binding decides whether
//! the surface is open. The controller watches it and re-reads it at every
//! entry point, so a binding flipped from outside takes effect before any
//! further measurement or layout work. [`SurfaceController::needs_sync`]
//! tells a renderer that the binding moved since the last check. Close
//! requests (dismissals) are forwarded to the caller's `on_close`; without
//! one they are dropped and the surface stays open.

use core::{cell::Cell, fmt};
use std::rc::Rc;

use nami::{Binding, Signal};
use tideui_core::{ControlError, Controlled, OverlayId, Rect, Size};
use tideui_placement::{ComputedPlacement, PlacementInput, PlacementRequest, compute};

use crate::{
    AnchorHandle, AnchorTracker, BackdropStyle, DismissPolicy, Interaction, LayoutBridge,
    LayoutEvent, MeasureOutcome, MeasureTicket, OverlayHost, SurfaceLayer,
};

/// Callback invoked when a surface asks to be closed.
pub type CloseHandler = Box<dyn FnMut()>;

/// Lifecycle phase of a floating surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SurfacePhase {
    /// Nothing mounted, nothing subscribed.
    #[default]
    Closed,
    /// Mounted hidden, waiting for the first complete measurement.
    Opening,
    /// Mounted and positioned.
    Open,
    /// Tearing down.
    Closing,
}

impl fmt::Display for SurfacePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        })
    }
}

/// State of one open-to-closed cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSession {
    anchor: Option<Rect>,
    overlay: Option<Size>,
    placement: Rc<ComputedPlacement>,
}

impl SurfaceSession {
    fn new() -> Self {
        Self {
            anchor: None,
            overlay: None,
            placement: Rc::new(ComputedPlacement::hidden()),
        }
    }

    /// The anchor's last applied rectangle.
    #[must_use]
    pub const fn anchor(&self) -> Option<Rect> {
        self.anchor
    }

    /// The surface's last reported size.
    #[must_use]
    pub const fn overlay(&self) -> Option<Size> {
        self.overlay
    }

    /// The current placement.
    #[must_use]
    pub fn placement(&self) -> Rc<ComputedPlacement> {
        Rc::clone(&self.placement)
    }

    /// The surface's absolute frame, once it is both measured and placed.
    #[must_use]
    pub fn surface_frame(&self) -> Option<Rect> {
        self.overlay
            .filter(|_| self.placement.is_visible())
            .map(|size| self.placement.frame(size))
    }
}

/// Construction parameters for a [`SurfaceController`].
pub struct SurfaceOptions {
    /// The element the surface is positioned against.
    pub anchor: AnchorHandle,
    /// Where the surface goes relative to the anchor.
    pub request: PlacementRequest,
    /// How outside interactions dismiss the surface.
    pub dismiss: DismissPolicy,
    /// Cosmetic backdrop style, used when `dismiss` is [`DismissPolicy::Backdrop`].
    pub backdrop_style: Option<BackdropStyle>,
    /// Caller-owned open state. `None` makes the surface uncontrolled.
    pub is_open: Option<Binding<bool>>,
    /// Called when the surface asks to close.
    pub on_close: Option<CloseHandler>,
}

impl SurfaceOptions {
    /// Uncontrolled options with the default request and outside-press dismissal.
    #[must_use]
    pub fn new(anchor: AnchorHandle) -> Self {
        Self {
            anchor,
            request: PlacementRequest::default(),
            dismiss: DismissPolicy::default(),
            backdrop_style: None,
            is_open: None,
            on_close: None,
        }
    }
}

impl fmt::Debug for SurfaceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceOptions")
            .field("anchor", &self.anchor)
            .field("request", &self.request)
            .field("dismiss", &self.dismiss)
            .field("backdrop_style", &self.backdrop_style)
            .field("controlled", &self.is_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// Owns the lifecycle of one floating surface.
///
/// The backend feeds it three kinds of input: measurement replies
/// ([`on_anchor_measured`](Self::on_anchor_measured)), the surface's laid-out
/// size ([`on_surface_layout`](Self::on_surface_layout)), and environment
/// changes ([`on_layout_event`](Self::on_layout_event)). User interactions go
/// through [`dismiss`](Self::dismiss).
pub struct SurfaceController<C> {
    id: OverlayId,
    host: OverlayHost<SurfaceLayer<C>>,
    bridge: Box<dyn LayoutBridge>,
    tracker: AnchorTracker,
    request: PlacementRequest,
    dismiss: DismissPolicy,
    backdrop_style: Option<BackdropStyle>,
    open: Controlled<bool>,
    // Set by the `is_open` watcher, cleared by `sync`.
    open_changed: Rc<Cell<bool>>,
    _open_watch: Option<<Binding<bool> as Signal>::Guard>,
    on_close: Option<CloseHandler>,
    content: Rc<C>,
    phase: SurfacePhase,
    session: Option<SurfaceSession>,
}

impl<C> fmt::Debug for SurfaceController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceController")
            .field("id", &self.id)
            .field("anchor", &self.tracker.anchor())
            .field("phase", &self.phase)
            .field("request", &self.request)
            .field("dismiss", &self.dismiss)
            .field("open", &self.open)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<C> SurfaceController<C> {
    /// Creates a controller and, if a controlled `is_open` binding is already
    /// `true`, opens the surface right away.
    pub fn new(
        options: SurfaceOptions,
        content: C,
        host: OverlayHost<SurfaceLayer<C>>,
        bridge: impl LayoutBridge + 'static,
    ) -> Self {
        let open_changed = Rc::new(Cell::new(false));
        let open_watch = options.is_open.as_ref().map(|is_open| {
            let changed = Rc::clone(&open_changed);
            Signal::watch(is_open, move |_| changed.set(true))
        });
        let mut controller = Self {
            id: OverlayId::new(),
            host,
            bridge: Box::new(bridge),
            tracker: AnchorTracker::new(options.anchor),
            request: options.request,
            dismiss: options.dismiss,
            backdrop_style: options.backdrop_style,
            open: Controlled::new(options.is_open, false),
            open_changed,
            _open_watch: open_watch,
            on_close: options.on_close,
            content: Rc::new(content),
            phase: SurfacePhase::Closed,
            session: None,
        };
        controller.sync();
        controller
    }

    /// Identity under which the surface mounts.
    #[must_use]
    pub const fn id(&self) -> OverlayId {
        self.id
    }

    /// The anchor the surface is positioned against.
    #[must_use]
    pub const fn anchor(&self) -> AnchorHandle {
        self.tracker.anchor()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> SurfacePhase {
        self.phase
    }

    /// Returns true while a session exists (`Opening` or `Open`).
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Returns true if the caller owns the open state.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.open.is_delegated()
    }

    /// The active placement request.
    #[must_use]
    pub const fn request(&self) -> &PlacementRequest {
        &self.request
    }

    /// The dismissal policy.
    #[must_use]
    pub const fn dismiss_policy(&self) -> DismissPolicy {
        self.dismiss
    }

    /// The current session, if open.
    #[must_use]
    pub const fn session(&self) -> Option<&SurfaceSession> {
        self.session.as_ref()
    }

    /// The current placement, if open.
    ///
    /// The returned pointer only changes when the placement value changes, so
    /// renderers can compare it with [`Rc::ptr_eq`] to skip work.
    #[must_use]
    pub fn placement(&self) -> Option<Rc<ComputedPlacement>> {
        self.session.as_ref().map(SurfaceSession::placement)
    }

    /// Returns true if the caller's `is_open` binding changed since the
    /// controller last followed it. Renderers call [`sync`](Self::sync) then.
    #[must_use]
    pub fn needs_sync(&self) -> bool {
        self.open_changed.get()
    }

    /// Opens an uncontrolled surface.
    ///
    /// Controlled surfaces open when their binding becomes `true`; calling
    /// this on one only follows the binding.
    pub fn open(&mut self) {
        if self.open.is_delegated() {
            self.sync();
            tracing::debug!(id = %self.id, "open() ignored on a controlled surface");
            return;
        }
        self.open.set(true);
        self.sync();
    }

    /// Opens a closed uncontrolled surface, or requests close of an open one.
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.request_close();
        } else {
            self.open();
        }
    }

    /// Asks the surface to close.
    ///
    /// An uncontrolled surface closes immediately and then notifies
    /// `on_close`, if any. A controlled surface notifies `on_close` and closes
    /// once the caller's binding turns `false`; without an `on_close` the
    /// request is dropped.
    pub fn request_close(&mut self) {
        self.sync();
        if !self.is_open() {
            return;
        }

        if self.open.is_delegated() {
            match self.on_close.as_mut() {
                Some(on_close) => on_close(),
                None => {
                    tracing::debug!(id = %self.id, "close request dropped: no on_close handler");
                    return;
                }
            }
        } else {
            self.open.set(false);
            if let Some(on_close) = self.on_close.as_mut() {
                on_close();
            }
        }
        self.sync();
    }

    /// Feeds a user interaction through the dismissal policy.
    ///
    /// Returns true if the interaction was treated as a close request. For a
    /// controlled surface without `on_close` the surface still stays open.
    pub fn dismiss(&mut self, interaction: Interaction) -> bool {
        self.sync();
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if !self
            .dismiss
            .should_dismiss(interaction, session.anchor, session.surface_frame())
        {
            return false;
        }
        tracing::debug!(id = %self.id, ?interaction, "dismissing surface");
        self.request_close();
        true
    }

    /// Brings the phase in line with whoever owns the open state.
    ///
    /// Every entry point calls this first. Renderers also call it when
    /// [`needs_sync`](Self::needs_sync) reports a binding change, so a
    /// controlled surface closes even when no other input arrives.
    pub fn sync(&mut self) {
        self.open_changed.set(false);
        let wanted = self.open.get();
        match (wanted, self.session.is_some()) {
            (true, false) => self.begin_session(),
            (false, true) => self.end_session(),
            _ => {}
        }
    }

    /// Checks that a re-render keeps the controlled/uncontrolled mode.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::ModeSwitch`] if `controlled` differs from the
    /// mode chosen at construction.
    pub fn reconcile_control(&self, controlled: bool) -> Result<(), ControlError> {
        self.open.reconcile(controlled)
    }

    /// Replaces the placement request and repositions an open surface.
    pub fn set_request(&mut self, request: PlacementRequest) {
        self.sync();
        if request == self.request {
            return;
        }
        let inverted_changed = request.inverted() != self.request.inverted();
        self.request = request;
        if self.session.is_some() {
            self.recompute();
            if inverted_changed {
                self.mount_layer();
            }
        }
    }

    /// Replaces the surface content.
    pub fn set_content(&mut self, content: C) {
        self.sync();
        self.content = Rc::new(content);
        if self.session.is_some() {
            self.mount_layer();
        }
    }

    /// Applies a measurement reply from the backend.
    pub fn on_anchor_measured(&mut self, ticket: MeasureTicket, rect: Option<Rect>) {
        self.sync();
        if self.session.is_none() {
            tracing::trace!(id = %self.id, "measurement after close ignored");
            return;
        }
        match self.tracker.resolve(ticket, rect) {
            MeasureOutcome::Changed(anchor) => {
                if let Some(session) = self.session.as_mut() {
                    session.anchor = anchor;
                }
                self.recompute();
            }
            MeasureOutcome::Unchanged | MeasureOutcome::Stale => {}
        }
    }

    /// Records the surface's laid-out size.
    pub fn on_surface_layout(&mut self, size: Size) {
        self.sync();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.overlay == Some(size) {
            return;
        }
        session.overlay = Some(size);
        self.recompute();
    }

    /// Reacts to a resize or ancestor scroll.
    pub fn on_layout_event(&mut self, event: LayoutEvent) {
        self.sync();
        if self.session.is_none() {
            return;
        }
        tracing::trace!(id = %self.id, ?event, "remeasuring anchor");
        if event == LayoutEvent::Resize {
            // The viewport may have moved even if the anchor did not.
            self.recompute();
        }
        self.remeasure();
    }

    fn begin_session(&mut self) {
        tracing::debug!(id = %self.id, anchor = %self.tracker.anchor(), "opening surface");
        self.phase = SurfacePhase::Opening;
        self.session = Some(SurfaceSession::new());
        self.tracker.activate();
        self.bridge.subscribe(self.tracker.anchor());
        self.mount_layer();
        self.remeasure();
    }

    fn end_session(&mut self) {
        tracing::debug!(id = %self.id, "closing surface");
        self.phase = SurfacePhase::Closing;
        self.bridge.unsubscribe(self.tracker.anchor());
        self.tracker.deactivate();
        self.session = None;
        self.host.unmount(self.id);
        self.phase = SurfacePhase::Closed;
    }

    fn remeasure(&mut self) {
        if let Some(ticket) = self.tracker.request() {
            self.bridge.request_measure(ticket);
        }
    }

    fn recompute(&mut self) {
        let viewport = self.bridge.viewport();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let input = PlacementInput {
            anchor: session.anchor,
            overlay: session.overlay,
            viewport,
        };
        let placement = compute(&input, &self.request);
        if *session.placement == placement {
            return;
        }
        session.placement = Rc::new(placement);

        if self.phase == SurfacePhase::Opening && placement.is_visible() {
            tracing::debug!(id = %self.id, left = placement.left, top = placement.top, "surface open");
            self.phase = SurfacePhase::Open;
        }
        self.mount_layer();
    }

    fn mount_layer(&self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let layer = SurfaceLayer {
            content: Rc::clone(&self.content),
            placement: session.placement(),
            backdrop: self
                .dismiss
                .uses_backdrop()
                .then(|| self.backdrop_style.unwrap_or_default()),
            inverted: self.request.inverted(),
        };
        self.host.mount(self.id, layer);
    }
}

impl<C> Drop for SurfaceController<C> {
    fn drop(&mut self) {
        if self.session.is_some() {
            self.end_session();
        }
    }
}
