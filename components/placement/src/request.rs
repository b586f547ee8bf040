//! Caller-facing placement configuration.

use core::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tideui_core::Axis;

use crate::{PlacementError, compute::Edge};

/// Default arrow size in points.
pub const DEFAULT_ARROW_SIZE: f32 = 8.0;

/// Which side of the anchor the surface sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Position {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    #[default]
    Bottom,
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    Right,
}

impl Position {
    /// The axis along which the surface is pushed away from the anchor.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// The surface edge that faces the anchor (where an arrow is drawn).
    #[must_use]
    pub const fn facing_edge(self) -> Edge {
        match self {
            Self::Top => Edge::Bottom,
            Self::Bottom => Edge::Top,
            Self::Left => Edge::Right,
            Self::Right => Edge::Left,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(PlacementError::UnknownPosition(other.to_owned())),
        }
    }
}

/// How the surface lines up with the anchor on the cross axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    /// Leading edges line up.
    #[default]
    Start,
    /// Centers line up.
    Center,
    /// Trailing edges line up.
    End,
}

impl Align {
    const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Align {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => Err(PlacementError::UnknownAlign(other.to_owned())),
        }
    }
}

/// What happens when the requested placement runs past the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Overflow {
    /// Nothing; the caller picked a position that fits.
    #[default]
    Allow,
    /// Slide the surface back inside the viewport on both axes.
    Shift,
}

/// A validated placement configuration.
///
/// Build one with [`PlacementRequest::builder`]. A `PlacementRequest` that
/// exists is always valid, so [`compute`](crate::compute) never fails.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementRequest {
    position: Position,
    align: Align,
    offset: f32,
    show_arrow: bool,
    arrow_size: f32,
    inverted: bool,
    overflow: Overflow,
    viewport_margin: f32,
}

impl Default for PlacementRequest {
    fn default() -> Self {
        Self::new(Position::default(), Align::default())
    }
}

impl PlacementRequest {
    /// A request with no offset and no arrow.
    #[must_use]
    pub const fn new(position: Position, align: Align) -> Self {
        Self {
            position,
            align,
            offset: 0.0,
            show_arrow: false,
            arrow_size: DEFAULT_ARROW_SIZE,
            inverted: false,
            overflow: Overflow::Allow,
            viewport_margin: 0.0,
        }
    }

    /// Starts a builder from the default request (`bottom`, `start`).
    #[must_use]
    pub fn builder() -> PlacementRequestBuilder {
        PlacementRequestBuilder {
            request: Self::default(),
        }
    }

    /// Reopens this request for modification.
    #[must_use]
    pub const fn to_builder(self) -> PlacementRequestBuilder {
        PlacementRequestBuilder { request: self }
    }

    /// Side of the anchor.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Cross-axis alignment.
    #[must_use]
    pub const fn align(&self) -> Align {
        self.align
    }

    /// Gap between anchor and surface, in points.
    #[must_use]
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Whether an arrow pointing at the anchor is drawn.
    #[must_use]
    pub const fn show_arrow(&self) -> bool {
        self.show_arrow
    }

    /// Arrow size, in points.
    #[must_use]
    pub const fn arrow_size(&self) -> f32 {
        self.arrow_size
    }

    /// Color-scheme inversion flag, passed through to the theming provider.
    #[must_use]
    pub const fn inverted(&self) -> bool {
        self.inverted
    }

    /// Viewport overflow handling.
    #[must_use]
    pub const fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// Minimum distance kept from the viewport edges under [`Overflow::Shift`].
    #[must_use]
    pub const fn viewport_margin(&self) -> f32 {
        self.viewport_margin
    }
}

/// Builder for [`PlacementRequest`].
///
/// ```ignore
/// let request = PlacementRequest::builder()
///     .position(Position::Top)
///     .align(Align::Center)
///     .offset(8.0)
///     .arrow(true)
///     .build()?;
/// ```
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct PlacementRequestBuilder {
    request: PlacementRequest,
}

impl PlacementRequestBuilder {
    /// Sets the side of the anchor.
    pub const fn position(mut self, position: Position) -> Self {
        self.request.position = position;
        self
    }

    /// Sets the cross-axis alignment.
    pub const fn align(mut self, align: Align) -> Self {
        self.request.align = align;
        self
    }

    /// Sets the gap between anchor and surface.
    pub const fn offset(mut self, offset: f32) -> Self {
        self.request.offset = offset;
        self
    }

    /// Enables or disables the arrow.
    pub const fn arrow(mut self, show: bool) -> Self {
        self.request.show_arrow = show;
        self
    }

    /// Sets the arrow size.
    pub const fn arrow_size(mut self, size: f32) -> Self {
        self.request.arrow_size = size;
        self
    }

    /// Sets the color-scheme inversion flag.
    pub const fn inverted(mut self, inverted: bool) -> Self {
        self.request.inverted = inverted;
        self
    }

    /// Sets viewport overflow handling.
    pub const fn overflow(mut self, overflow: Overflow) -> Self {
        self.request.overflow = overflow;
        self
    }

    /// Sets the margin kept from the viewport edges under [`Overflow::Shift`].
    pub const fn viewport_margin(mut self, margin: f32) -> Self {
        self.request.viewport_margin = margin;
        self
    }

    /// Validates and returns the request.
    ///
    /// # Errors
    ///
    /// Returns a [`PlacementError`] if any numeric field is negative or not
    /// finite.
    pub fn build(self) -> Result<PlacementRequest, PlacementError> {
        let request = self.request;
        check_non_negative("offset", request.offset, PlacementError::NegativeOffset)?;
        check_non_negative(
            "arrow_size",
            request.arrow_size,
            PlacementError::NegativeArrowSize,
        )?;
        check_non_negative(
            "viewport_margin",
            request.viewport_margin,
            PlacementError::NegativeMargin,
        )?;
        Ok(request)
    }
}

fn check_non_negative(
    field: &'static str,
    value: f32,
    negative: fn(f32) -> PlacementError,
) -> Result<(), PlacementError> {
    if !value.is_finite() {
        return Err(PlacementError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(negative(value));
    }
    Ok(())
}
