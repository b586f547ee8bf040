//! The overlay host: one mount point for every floating surface.
//!
//! Surfaces are declared deep inside the component tree but must paint above
//! everything else, outside any ancestor's clipping, scrolling, or transform.
//! Instead of rendering in place they register their content here under an
//! [`OverlayId`], and the application renders the host once, above its root
//! view.
//!
//! ```text
//! ┌──────────── window ─────────────┐
//! │  root view                      │
//! │    └─ scroll view (clips)       │
//! │         └─ button  ── anchor    │
//! │                                 │
//! │  OverlayHost  (painted last)    │
//! │    ├─ layer #1  menu            │
//! │    └─ layer #2  tooltip (top)   │
//! └─────────────────────────────────┘
//! ```
//!
//! The host is a cheap, clonable handle. Create it once when the application
//! starts and hand a clone to every controller.

use core::{cell::RefCell, fmt};
use std::rc::Rc;

use tideui_core::OverlayId;

/// An entry in the host's mount table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostRegistration {
    /// Identity the content was mounted under.
    pub id: OverlayId,
    /// Mount order; higher values paint on top.
    pub sequence: u64,
}

struct Layer<T> {
    registration: HostRegistration,
    content: T,
}

struct HostState<T> {
    // Kept sorted by `registration.sequence`.
    layers: Vec<Layer<T>>,
    next_sequence: u64,
    revision: u64,
}

/// Application-wide mount point for overlay content.
///
/// Layers paint in insertion order: the first mounted layer is at the bottom,
/// the most recent one on top. Mounting under an identity that is already
/// present replaces that layer's content in place, keeping its stacking slot;
/// re-renders of one logical popover reuse a single identity.
///
/// The host is single-threaded. Do not mount or unmount from inside a
/// [`render`](Self::render) callback.
pub struct OverlayHost<T> {
    state: Rc<RefCell<HostState<T>>>,
}

impl<T> Clone for OverlayHost<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T> Default for OverlayHost<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for OverlayHost<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("OverlayHost")
            .field("layers", &state.layers.len())
            .field("revision", &state.revision)
            .finish()
    }
}

impl<T> OverlayHost<T> {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HostState {
                layers: Vec::new(),
                next_sequence: 0,
                revision: 0,
            })),
        }
    }

    /// Mounts `content` under `id`, replacing any content already there.
    pub fn mount(&self, id: OverlayId, content: T) {
        let mut state = self.state.borrow_mut();
        state.revision += 1;

        if let Some(layer) = state.layers.iter_mut().find(|layer| layer.registration.id == id) {
            tracing::trace!(%id, "replacing overlay layer");
            layer.content = content;
            return;
        }

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        tracing::debug!(%id, sequence, "mounting overlay layer");
        state.layers.push(Layer {
            registration: HostRegistration { id, sequence },
            content,
        });
    }

    /// Removes the layer registered under `id` and returns its content.
    ///
    /// Unmounting an identity that is not mounted does nothing.
    pub fn unmount(&self, id: OverlayId) -> Option<T> {
        let mut state = self.state.borrow_mut();
        let index = state
            .layers
            .iter()
            .position(|layer| layer.registration.id == id)?;
        state.revision += 1;
        tracing::debug!(%id, "unmounting overlay layer");
        Some(state.layers.remove(index).content)
    }

    /// Returns true if a layer is mounted under `id`.
    #[must_use]
    pub fn contains(&self, id: OverlayId) -> bool {
        self.state
            .borrow()
            .layers
            .iter()
            .any(|layer| layer.registration.id == id)
    }

    /// Number of mounted layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().layers.len()
    }

    /// Returns true if nothing is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A counter bumped by every mount and unmount.
    ///
    /// Renderers can compare it against the value seen at the last paint and
    /// skip painting when it has not moved.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    /// The mount table, bottom layer first.
    #[must_use]
    pub fn registrations(&self) -> Vec<HostRegistration> {
        self.state
            .borrow()
            .layers
            .iter()
            .map(|layer| layer.registration)
            .collect()
    }

    /// Identity of the layer painted on top, if any.
    #[must_use]
    pub fn topmost(&self) -> Option<OverlayId> {
        self.state
            .borrow()
            .layers
            .last()
            .map(|layer| layer.registration.id)
    }

    /// Visits every mounted layer bottom to top.
    pub fn render(&self, mut paint: impl FnMut(OverlayId, &T)) {
        for layer in &self.state.borrow().layers {
            paint(layer.registration.id, &layer.content);
        }
    }

    /// Runs `f` against the content mounted under `id`.
    pub fn with_content<R>(&self, id: OverlayId, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.state
            .borrow()
            .layers
            .iter()
            .find(|layer| layer.registration.id == id)
            .map(|layer| f(&layer.content))
    }

    /// Unmounts everything. Used when the application shuts down.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        if !state.layers.is_empty() {
            state.layers.clear();
            state.revision += 1;
        }
    }
}
