//! Errors for misconfigured placement requests.

use thiserror::Error;

/// A placement request that cannot be honoured as written.
///
/// These are programming errors in the calling component. They are reported
/// when the request is built rather than being clamped into range, so the bug
/// surfaces at the call site.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// The gap between anchor and surface was negative.
    #[error("placement offset must be non-negative, got {0}")]
    NegativeOffset(f32),
    /// The arrow size was negative.
    #[error("arrow size must be non-negative, got {0}")]
    NegativeArrowSize(f32),
    /// The viewport margin was negative.
    #[error("viewport margin must be non-negative, got {0}")]
    NegativeMargin(f32),
    /// A numeric field was NaN or infinite.
    #[error("placement field `{field}` must be finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A position name that is not one of `top`, `bottom`, `left`, `right`.
    #[error("unrecognized position `{0}` (expected top, bottom, left or right)")]
    UnknownPosition(String),
    /// An alignment name that is not one of `start`, `center`, `end`.
    #[error("unrecognized alignment `{0}` (expected start, center or end)")]
    UnknownAlign(String),
}
