//! Placement math for `tideui` floating surfaces.
//!
//! This crate answers one question: given where the anchor is on screen and
//! how big the surface is, where does the surface go? It does so with a
//! single pure function, [`compute`], and a validated configuration type,
//! [`PlacementRequest`].
//!
//! # Example
//!
//! ```rust,ignore
//! use tideui_core::{Rect, Size};
//! use tideui_placement::{Align, PlacementInput, PlacementRequest, Position, compute};
//!
//! let request = PlacementRequest::builder()
//!     .position(Position::Bottom)
//!     .align(Align::Center)
//!     .offset(8.0)
//!     .build()?;
//!
//! let input = PlacementInput::new(
//!     Rect::from_xywh(100.0, 50.0, 80.0, 30.0),
//!     Size::new(160.0, 40.0),
//! );
//! let placement = compute(&input, &request);
//! assert_eq!((placement.left, placement.top), (60.0, 88.0));
//! ```
//!
//! Until both the anchor rectangle and the surface size are known the result
//! is [`ComputedPlacement::hidden`]: opacity zero, so the surface never
//! flashes at a wrong position during its first layout pass.

pub mod compute;
mod error;
pub mod request;

pub use compute::{ArrowPlacement, ComputedPlacement, Edge, PlacementInput, compute};
pub use error::PlacementError;
pub use request::{
    Align, DEFAULT_ARROW_SIZE, Overflow, PlacementRequest, PlacementRequestBuilder, Position,
};
