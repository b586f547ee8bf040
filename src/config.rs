//! Library-wide popover defaults.
//!
//! Hosts usually ship one [`PopoverConfig`] per design system and hand it to
//! [`Popover::with_config`](crate::Popover::with_config). It can be loaded
//! from JSON; missing fields keep their defaults.
//!
//! ```json
//! { "offset": 6.0, "show_arrow": true, "overflow": "shift", "viewport_margin": 8.0 }
//! ```

use serde::{Deserialize, Serialize};
use tideui_overlay::{BackdropStyle, DismissPolicy};
use tideui_placement::{
    Align, DEFAULT_ARROW_SIZE, Overflow, PlacementError, PlacementRequest,
    PlacementRequestBuilder, Position,
};

/// Errors raised while loading a [`PopoverConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input was not a valid configuration document.
    #[error("failed to parse popover config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but describes an impossible placement.
    #[error("invalid popover config: {0}")]
    Invalid(#[from] PlacementError),
}

/// Defaults applied to every popover built from this config.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopoverConfig {
    /// Side of the anchor.
    pub position: Position,
    /// Cross-axis alignment.
    pub align: Align,
    /// Gap between anchor and surface, in points.
    pub offset: f32,
    /// Draw an arrow pointing at the anchor.
    pub show_arrow: bool,
    /// Arrow size, in points.
    pub arrow_size: f32,
    /// Dismiss through a backdrop instead of outside presses.
    pub with_backdrop_dismiss: bool,
    /// Backdrop look, when backdrop dismissal is on.
    pub backdrop_style: Option<BackdropStyle>,
    /// Viewport overflow handling.
    pub overflow: Overflow,
    /// Distance kept from the viewport edges under [`Overflow::Shift`].
    pub viewport_margin: f32,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            position: Position::default(),
            align: Align::default(),
            offset: 0.0,
            show_arrow: false,
            arrow_size: DEFAULT_ARROW_SIZE,
            with_backdrop_dismiss: false,
            backdrop_style: None,
            overflow: Overflow::default(),
            viewport_margin: 0.0,
        }
    }
}

impl PopoverConfig {
    /// Parses a config from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown enum
    /// values, and [`ConfigError::Invalid`] for negative or non-finite sizes.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the config describes a buildable placement.
    ///
    /// # Errors
    ///
    /// Returns the [`PlacementError`] the request builder would raise.
    pub fn validate(&self) -> Result<(), PlacementError> {
        self.request_builder().build().map(drop)
    }

    /// The dismissal policy this config selects.
    #[must_use]
    pub const fn dismiss_policy(&self) -> DismissPolicy {
        DismissPolicy::from_backdrop_flag(self.with_backdrop_dismiss)
    }

    /// A request builder seeded with this config's placement fields.
    pub fn request_builder(&self) -> PlacementRequestBuilder {
        PlacementRequest::builder()
            .position(self.position)
            .align(self.align)
            .offset(self.offset)
            .arrow(self.show_arrow)
            .arrow_size(self.arrow_size)
            .overflow(self.overflow)
            .viewport_margin(self.viewport_margin)
    }
}
