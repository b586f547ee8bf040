//! What a floating surface mounts into the overlay host.

use std::rc::Rc;

use tideui_placement::ComputedPlacement;

/// Cosmetic description of a dismissal backdrop.
///
/// The engine does not interpret these values; they are handed to the
/// renderer as-is.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackdropStyle {
    /// Backdrop color as `0xRRGGBB`.
    pub color: u32,
    /// Backdrop opacity in `0.0..=1.0`. The default backdrop is invisible but
    /// still receives presses.
    pub opacity: f32,
}

impl BackdropStyle {
    /// A dimming backdrop of the given color and opacity.
    #[must_use]
    pub const fn new(color: u32, opacity: f32) -> Self {
        Self { color, opacity }
    }
}

/// One mounted floating surface.
#[derive(Debug)]
pub struct SurfaceLayer<C> {
    /// The surface's content.
    pub content: Rc<C>,
    /// Where to paint it. While `placement.opacity` is zero the renderer lays
    /// the content out (so its size can be reported) but paints nothing.
    pub placement: Rc<ComputedPlacement>,
    /// Backdrop to paint behind the surface, full-screen, if any.
    pub backdrop: Option<BackdropStyle>,
    /// Color-scheme inversion flag for the theming provider.
    pub inverted: bool,
}

impl<C> Clone for SurfaceLayer<C> {
    fn clone(&self) -> Self {
        Self {
            content: Rc::clone(&self.content),
            placement: Rc::clone(&self.placement),
            backdrop: self.backdrop,
            inverted: self.inverted,
        }
    }
}

impl<C> SurfaceLayer<C> {
    /// Returns true once the surface has a real position.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.placement.is_visible()
    }
}
