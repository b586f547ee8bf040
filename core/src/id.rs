//! Opaque identities for overlay registrations.

use core::fmt;

use uuid::Uuid;

/// Identity under which a floating surface registers with the overlay host.
///
/// A controller allocates one `OverlayId` when it is created and reuses it for
/// every mount, so re-rendering the same logical popover replaces its own
/// layer instead of stacking a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(Uuid);

impl OverlayId {
    /// Allocates a fresh, globally unique identity.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OverlayId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for OverlayId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay-{}", self.0.simple())
    }
}
