#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod log;
pub mod popover;
pub mod theme;

pub use config::{ConfigError, PopoverConfig};
pub use popover::Popover;
pub use theme::ColorScheme;

pub use nami as reactive;
#[doc(inline)]
pub use reactive::{Binding, Signal, binding};

pub use tideui_core as primitives;
pub use tideui_overlay as overlay;
pub use tideui_placement as placement;

#[doc(inline)]
pub use tideui_overlay::{
    AnchorHandle, BackdropStyle, DismissPolicy, Interaction, LayoutBridge, LayoutEvent,
    MeasureTicket, OverlayHost, SurfaceController, SurfaceLayer, SurfacePhase,
};
#[doc(inline)]
pub use tideui_placement::{
    Align, ComputedPlacement, Overflow, PlacementError, PlacementRequest, Position,
};

pub mod prelude {
    //! Commonly used types for building popovers.
    //!
    //! ```rust,ignore
    //! use tideui::prelude::*;
    //! ```
    pub use crate::{
        Align, AnchorHandle, Binding, ColorScheme, DismissPolicy, Interaction, LayoutBridge,
        LayoutEvent, Overflow, OverlayHost, Popover, PopoverConfig, Position, Signal,
        SurfaceController, binding,
    };
    pub use tideui_core::{Point, Rect, Size, SlotKind, Slots, Slotted};
}
