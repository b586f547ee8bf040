//! The placement calculator.
//!
//! [`compute`] maps an anchor rectangle, the surface's measured size, and a
//! [`PlacementRequest`] to absolute screen coordinates. It is a pure function:
//! identical inputs always produce a bit-identical [`ComputedPlacement`].

use tideui_core::{Axis, Point, Rect, Size};

use crate::{Align, Overflow, PlacementRequest, Position};

/// One edge of the floating surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
    /// Right edge.
    Right,
}

impl Edge {
    /// The axis the edge runs along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Horizontal,
            Self::Left | Self::Right => Axis::Vertical,
        }
    }
}

/// Where the arrow is drawn on the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowPlacement {
    /// Surface edge that faces the anchor.
    pub edge: Edge,
    /// Distance of the arrow tip from the start of `edge`, in surface-local points.
    pub offset: f32,
}

/// Everything the calculator needs to know about the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PlacementInput {
    /// The anchor's absolute rectangle, if it has been measured.
    pub anchor: Option<Rect>,
    /// The surface's size, if it has been laid out once.
    pub overlay: Option<Size>,
    /// The visible viewport. Only consulted under [`Overflow::Shift`].
    pub viewport: Option<Rect>,
}

impl PlacementInput {
    /// Input with a known anchor and surface size and no viewport.
    #[must_use]
    pub const fn new(anchor: Rect, overlay: Size) -> Self {
        Self {
            anchor: Some(anchor),
            overlay: Some(overlay),
            viewport: None,
        }
    }

    /// Sets the viewport.
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = Some(viewport);
        self
    }
}

/// The resolved screen position of a floating surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputedPlacement {
    /// Absolute x of the surface's left edge.
    pub left: f32,
    /// Absolute y of the surface's top edge.
    pub top: f32,
    /// `0.0` until anchor and surface have both been measured, `1.0` after.
    pub opacity: f32,
    /// Arrow position, when the request asked for one.
    pub arrow: Option<ArrowPlacement>,
}

impl ComputedPlacement {
    /// The placement used while measurements are incomplete.
    ///
    /// Renderers must not rely on `left`/`top` while `opacity` is zero.
    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            opacity: 0.0,
            arrow: None,
        }
    }

    /// Returns true once the surface can be shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Top-left corner of the surface.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The surface's absolute frame for the given size.
    #[must_use]
    pub const fn frame(&self, size: Size) -> Rect {
        Rect::new(self.origin(), size)
    }
}

impl Default for ComputedPlacement {
    fn default() -> Self {
        Self::hidden()
    }
}

/// Computes where the surface goes.
///
/// Returns [`ComputedPlacement::hidden`] when the anchor or surface size is
/// unknown, or when the anchor has no extent (a hidden anchor is treated as no
/// anchor at all). A surface with a zero or negative dimension counts as
/// unmeasured.
#[must_use]
pub fn compute(input: &PlacementInput, request: &PlacementRequest) -> ComputedPlacement {
    let (Some(anchor), Some(overlay)) = (input.anchor, input.overlay) else {
        return ComputedPlacement::hidden();
    };
    if anchor.is_empty() || overlay.is_empty() {
        return ComputedPlacement::hidden();
    }

    let main = request.position().axis();
    let cross = main.cross();

    let mut main_start = primary_offset(anchor, overlay, request);
    let mut cross_start = cross_offset(anchor, overlay, cross, request.align());

    if request.overflow() == Overflow::Shift
        && let Some(viewport) = input.viewport
    {
        let margin = request.viewport_margin();
        main_start = shift_into(main_start, overlay.along(main), viewport, main, margin);
        cross_start = shift_into(cross_start, overlay.along(cross), viewport, cross, margin);
    }

    let (left, top) = match main {
        Axis::Vertical => (cross_start, main_start),
        Axis::Horizontal => (main_start, cross_start),
    };

    let arrow = request.show_arrow().then(|| ArrowPlacement {
        edge: request.position().facing_edge(),
        offset: arrow_offset(
            anchor,
            overlay.along(cross),
            cross_start,
            cross,
            request.arrow_size(),
        ),
    });

    ComputedPlacement {
        left,
        top,
        opacity: 1.0,
        arrow,
    }
}

fn primary_offset(anchor: Rect, overlay: Size, request: &PlacementRequest) -> f32 {
    let offset = request.offset();
    match request.position() {
        Position::Bottom => anchor.max_y() + offset,
        Position::Top => anchor.y() - overlay.height - offset,
        Position::Right => anchor.max_x() + offset,
        Position::Left => anchor.x() - overlay.width - offset,
    }
}

fn cross_offset(anchor: Rect, overlay: Size, cross: Axis, align: Align) -> f32 {
    let length = overlay.along(cross);
    match align {
        Align::Start => anchor.start(cross),
        Align::Center => anchor.start(cross) + (anchor.length(cross) - length) / 2.0,
        Align::End => anchor.end(cross) - length,
    }
}

// A surface larger than the viewport is pinned to the viewport's start edge.
fn shift_into(start: f32, length: f32, viewport: Rect, axis: Axis, margin: f32) -> f32 {
    let low = viewport.start(axis) + margin;
    let high = viewport.end(axis) - margin - length;
    if high < low {
        low
    } else {
        start.max(low).min(high)
    }
}

// The arrow points at the anchor's center but never enters the rounded
// corners; on a surface too short for that it sits in the middle.
fn arrow_offset(
    anchor: Rect,
    surface_length: f32,
    surface_start: f32,
    cross: Axis,
    size: f32,
) -> f32 {
    let target = anchor.mid(cross) - surface_start;
    let low = size;
    let high = surface_length - size;
    if high < low {
        surface_length / 2.0
    } else {
        target.max(low).min(high)
    }
}
