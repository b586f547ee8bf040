//! Overlay plumbing for `tideui` floating surfaces.
//!
//! - [`OverlayHost`]: the single mount point that paints every open surface
//!   above the application, whatever depth it was declared at.
//! - [`measure`]: anchor measurement through the backend's [`LayoutBridge`],
//!   with stale-reply filtering in [`AnchorTracker`].
//! - [`SurfaceController`]: the open/close state machine tying measurement,
//!   placement and mounting together.
//! - [`DismissPolicy`]: outside-press versus backdrop dismissal.
//!
//! Everything here runs on the UI thread; the types hold `Rc`s and are
//! `!Send`.

pub mod controller;
pub mod dismiss;
pub mod host;
pub mod layer;
pub mod measure;

pub use controller::{CloseHandler, SurfaceController, SurfaceOptions, SurfacePhase, SurfaceSession};
pub use dismiss::{DismissPolicy, Interaction};
pub use host::{HostRegistration, OverlayHost};
pub use layer::{BackdropStyle, SurfaceLayer};
pub use measure::{
    AnchorHandle, AnchorTracker, LayoutBridge, LayoutEvent, MeasureOutcome, MeasureTicket,
};

#[cfg(test)]
mod tests;
