//! When an open surface closes.

use tideui_core::{Point, Rect};

/// How a surface is dismissed by interactions outside it.
///
/// The two mechanisms are exclusive. With a backdrop, the backdrop itself
/// receives presses outside the surface, so outside-press detection is turned
/// off; running both would close the surface twice for one tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DismissPolicy {
    /// A pointer press outside both the anchor and the surface closes it.
    #[default]
    OutsidePress,
    /// Only a press on the backdrop closes it.
    Backdrop,
}

/// Something the user did while a surface was open.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    /// Pointer went down at an absolute screen position.
    PointerDown(Point),
    /// The backdrop behind the surface was pressed.
    BackdropPress,
    /// An explicit close from the surface's own content (a menu item, a
    /// close button).
    Close,
    /// The platform's back gesture or the escape key.
    SystemBack,
}

impl DismissPolicy {
    /// Picks the policy from the `with_backdrop_dismiss` flag.
    #[must_use]
    pub const fn from_backdrop_flag(with_backdrop_dismiss: bool) -> Self {
        if with_backdrop_dismiss {
            Self::Backdrop
        } else {
            Self::OutsidePress
        }
    }

    /// Whether the surface should listen for presses outside itself.
    #[must_use]
    pub const fn listens_outside(self) -> bool {
        matches!(self, Self::OutsidePress)
    }

    /// Whether a backdrop has to be mounted behind the surface.
    #[must_use]
    pub const fn uses_backdrop(self) -> bool {
        matches!(self, Self::Backdrop)
    }

    /// Decides whether `interaction` should close the surface.
    ///
    /// `anchor` and `surface` are the current absolute rectangles, when known.
    /// A press on the anchor never dismisses: the anchor's own handler is
    /// expected to toggle the surface.
    #[must_use]
    pub fn should_dismiss(
        self,
        interaction: Interaction,
        anchor: Option<Rect>,
        surface: Option<Rect>,
    ) -> bool {
        match interaction {
            Interaction::Close | Interaction::SystemBack => true,
            Interaction::BackdropPress => self.uses_backdrop(),
            Interaction::PointerDown(point) => {
                self.listens_outside()
                    && !anchor.is_some_and(|rect| rect.contains(point))
                    && !surface.is_some_and(|rect| rect.contains(point))
            }
        }
    }
}
