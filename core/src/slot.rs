//! Named slot assignment for composite surfaces.
//!
//! Composite components (a menu with a header and a footer, a dialog-like
//! popover) route their children into named regions. Each fragment is tagged
//! with a [`SlotKind`] by whoever creates it, and [`Slots::assign`] groups an
//! unordered collection of fragments by tag.

/// The region a fragment belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Rendered above the content.
    Header,
    /// The main body.
    Content,
    /// Rendered below the content.
    Footer,
    /// Anything the component does not recognise; kept in declaration order.
    Other,
}

/// A fragment tagged with its slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slotted<T> {
    kind: SlotKind,
    value: T,
}

impl<T> Slotted<T> {
    /// Tags `value` with `kind`.
    #[must_use]
    pub const fn new(kind: SlotKind, value: T) -> Self {
        Self { kind, value }
    }

    /// Shorthand for a header fragment.
    #[must_use]
    pub const fn header(value: T) -> Self {
        Self::new(SlotKind::Header, value)
    }

    /// Shorthand for a content fragment.
    #[must_use]
    pub const fn content(value: T) -> Self {
        Self::new(SlotKind::Content, value)
    }

    /// Shorthand for a footer fragment.
    #[must_use]
    pub const fn footer(value: T) -> Self {
        Self::new(SlotKind::Footer, value)
    }

    /// Returns the fragment's slot.
    #[must_use]
    pub const fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Unwraps the fragment.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Fragments grouped by slot.
///
/// Header and footer are single-valued: when several fragments claim one of
/// them, the last one wins and the earlier ones move to [`Slots::other`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slots<T> {
    /// The header fragment, if any.
    pub header: Option<T>,
    /// Content fragments in declaration order.
    pub content: Vec<T>,
    /// The footer fragment, if any.
    pub footer: Option<T>,
    /// Unrecognised or displaced fragments in declaration order.
    pub other: Vec<T>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            header: None,
            content: Vec::new(),
            footer: None,
            other: Vec::new(),
        }
    }
}

impl<T> Slots<T> {
    /// Groups `fragments` by their slot tag.
    pub fn assign(fragments: impl IntoIterator<Item = Slotted<T>>) -> Self {
        let mut slots = Self::default();
        for fragment in fragments {
            match fragment.kind {
                SlotKind::Header => {
                    if let Some(previous) = slots.header.replace(fragment.value) {
                        slots.other.push(previous);
                    }
                }
                SlotKind::Footer => {
                    if let Some(previous) = slots.footer.replace(fragment.value) {
                        slots.other.push(previous);
                    }
                }
                SlotKind::Content => slots.content.push(fragment.value),
                SlotKind::Other => slots.other.push(fragment.value),
            }
        }
        slots
    }

    /// Returns true if no fragment was assigned anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_none()
            && self.footer.is_none()
            && self.content.is_empty()
            && self.other.is_empty()
    }

    /// Flattens the slots in render order: header, content, footer.
    ///
    /// Fragments in [`Slots::other`] are not rendered.
    pub fn into_render_order(self) -> impl Iterator<Item = T> {
        self.header
            .into_iter()
            .chain(self.content)
            .chain(self.footer)
    }
}
