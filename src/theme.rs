//! Color-scheme pass-through for floating surfaces.
//!
//! Tooltips are commonly drawn in the opposite scheme from the screen behind
//! them (a dark bubble over a light page). The placement engine does not
//! style anything; it only carries the request's `inverted` flag on the
//! mounted [`SurfaceLayer`], and the theming provider resolves the scheme with
//! [`ColorScheme::for_layer`].

use serde::{Deserialize, Serialize};
use tideui_overlay::SurfaceLayer;

/// Light or dark appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Dark content on light surfaces.
    #[default]
    Light,
    /// Light content on dark surfaces.
    Dark,
}

impl ColorScheme {
    /// The opposite scheme.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// `self`, or its opposite when `invert` is set.
    #[must_use]
    pub const fn resolve(self, invert: bool) -> Self {
        if invert { self.inverted() } else { self }
    }

    /// The scheme a mounted surface should be drawn in, given the scheme of
    /// the screen behind it.
    #[must_use]
    pub const fn for_layer<C>(self, layer: &SurfaceLayer<C>) -> Self {
        self.resolve(layer.inverted)
    }
}
