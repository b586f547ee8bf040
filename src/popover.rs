//! The caller-facing popover builder and its presets.
//!
//! A [`Popover`] collects everything a floating surface needs (anchor,
//! content, placement, dismissal and open-state ownership) and
//! [`attach`](Popover::attach)es it to an [`OverlayHost`], yielding the
//! [`SurfaceController`] that drives it.
//!
//! ```ignore
//! let host = OverlayHost::new();
//! let mut tooltip = Popover::tooltip(anchor, "Copy to clipboard")
//!     .attach(&host, bridge)?;
//! tooltip.open();
//! ```

use core::fmt;

use nami::Binding;
use tideui_core::{Slots, Slotted};
use tideui_overlay::{
    AnchorHandle, BackdropStyle, CloseHandler, DismissPolicy, LayoutBridge, OverlayHost,
    SurfaceController, SurfaceLayer, SurfaceOptions,
};
use tideui_placement::{
    Align, Overflow, PlacementError, PlacementRequest, PlacementRequestBuilder, Position,
};

use crate::PopoverConfig;

/// Gap the presets leave between anchor and surface, in points.
pub const PRESET_OFFSET: f32 = 4.0;

/// Builder for an anchored floating surface.
#[must_use]
pub struct Popover<C> {
    anchor: AnchorHandle,
    content: C,
    request: PlacementRequestBuilder,
    dismiss: DismissPolicy,
    backdrop_style: Option<BackdropStyle>,
    is_open: Option<Binding<bool>>,
    on_close: Option<CloseHandler>,
}

impl<C> fmt::Debug for Popover<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Popover")
            .field("anchor", &self.anchor)
            .field("request", &self.request)
            .field("dismiss", &self.dismiss)
            .field("backdrop_style", &self.backdrop_style)
            .field("controlled", &self.is_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish_non_exhaustive()
    }
}

impl<C> Popover<C> {
    /// An uncontrolled popover below the anchor, start-aligned, with no
    /// offset and outside-press dismissal.
    pub fn new(anchor: AnchorHandle, content: C) -> Self {
        Self {
            anchor,
            content,
            request: PlacementRequest::builder(),
            dismiss: DismissPolicy::default(),
            backdrop_style: None,
            is_open: None,
            on_close: None,
        }
    }

    /// A popover seeded with `config`'s defaults.
    pub fn with_config(anchor: AnchorHandle, content: C, config: &PopoverConfig) -> Self {
        Self {
            request: config.request_builder(),
            dismiss: config.dismiss_policy(),
            backdrop_style: config.backdrop_style,
            ..Self::new(anchor, content)
        }
    }

    /// A tooltip: centered above the anchor with an arrow.
    pub fn tooltip(anchor: AnchorHandle, content: C) -> Self {
        Self::new(anchor, content)
            .position(Position::Top)
            .align(Align::Center)
            .offset(PRESET_OFFSET)
            .show_arrow(true)
    }

    /// A select-style dropdown: below the anchor, kept inside the viewport.
    pub fn dropdown(anchor: AnchorHandle, content: C) -> Self {
        Self::new(anchor, content)
            .position(Position::Bottom)
            .align(Align::Start)
            .offset(PRESET_OFFSET)
            .overflow(Overflow::Shift)
    }

    /// Hands the open state to the caller.
    ///
    /// The surface is then open exactly when `is_open` is `true`; dismissals
    /// are reported through [`on_close`](Self::on_close) and the caller
    /// decides whether to flip the binding.
    pub fn is_open(mut self, is_open: &Binding<bool>) -> Self {
        self.is_open = Some(is_open.clone());
        self
    }

    /// Called whenever the surface asks to close.
    pub fn on_close(mut self, on_close: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    /// Side of the anchor the surface sits on.
    pub const fn position(mut self, position: Position) -> Self {
        self.request = self.request.position(position);
        self
    }

    /// Cross-axis alignment with the anchor.
    pub const fn align(mut self, align: Align) -> Self {
        self.request = self.request.align(align);
        self
    }

    /// Gap between anchor and surface, in points. Must be non-negative.
    pub const fn offset(mut self, offset: f32) -> Self {
        self.request = self.request.offset(offset);
        self
    }

    /// Draw an arrow pointing at the anchor.
    pub const fn show_arrow(mut self, show: bool) -> Self {
        self.request = self.request.arrow(show);
        self
    }

    /// Arrow size, in points. Must be non-negative.
    pub const fn arrow_size(mut self, size: f32) -> Self {
        self.request = self.request.arrow_size(size);
        self
    }

    /// Render the surface in the opposite color scheme.
    pub const fn inverted(mut self, inverted: bool) -> Self {
        self.request = self.request.inverted(inverted);
        self
    }

    /// Viewport overflow handling.
    pub const fn overflow(mut self, overflow: Overflow) -> Self {
        self.request = self.request.overflow(overflow);
        self
    }

    /// Distance kept from the viewport edges under [`Overflow::Shift`].
    pub const fn viewport_margin(mut self, margin: f32) -> Self {
        self.request = self.request.viewport_margin(margin);
        self
    }

    /// Dismiss through a full-screen backdrop instead of outside presses.
    pub const fn with_backdrop_dismiss(mut self, enabled: bool) -> Self {
        self.dismiss = DismissPolicy::from_backdrop_flag(enabled);
        self
    }

    /// Look of the dismissal backdrop.
    pub const fn backdrop_style(mut self, style: BackdropStyle) -> Self {
        self.backdrop_style = Some(style);
        self
    }

    /// Validates the configuration and creates the controller.
    ///
    /// A controlled popover whose binding is already `true` opens right away.
    ///
    /// # Errors
    ///
    /// Returns a [`PlacementError`] if the offset, arrow size or viewport
    /// margin is negative or not finite.
    pub fn attach(
        self,
        host: &OverlayHost<SurfaceLayer<C>>,
        bridge: impl LayoutBridge + 'static,
    ) -> Result<SurfaceController<C>, PlacementError> {
        let request = self.request.build()?;
        let options = SurfaceOptions {
            anchor: self.anchor,
            request,
            dismiss: self.dismiss,
            backdrop_style: self.backdrop_style,
            is_open: self.is_open,
            on_close: self.on_close,
        };
        tracing::trace!(anchor = %self.anchor, ?request, "attaching popover");
        Ok(SurfaceController::new(
            options,
            self.content,
            host.clone(),
            bridge,
        ))
    }
}

impl<T> Popover<Slots<T>> {
    /// A menu: below the anchor, start-aligned, dismissed by its backdrop.
    ///
    /// `fragments` are grouped into header, content and footer slots.
    pub fn menu(anchor: AnchorHandle, fragments: impl IntoIterator<Item = Slotted<T>>) -> Self {
        Self::new(anchor, Slots::assign(fragments))
            .position(Position::Bottom)
            .align(Align::Start)
            .offset(PRESET_OFFSET)
            .with_backdrop_dismiss(true)
    }
}
