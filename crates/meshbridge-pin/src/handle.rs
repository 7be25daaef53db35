//! Pin keys and pin handles.
//!
//! A [`PinHandle`] records where one array field lives while it is pinned.
//! Numeric handles point into the owning object's own vector; text handles
//! own the fixed-width byte buffer the strings were transcoded into, so the
//! address stays valid exactly as long as the handle does.

use std::fmt;
use std::ptr::NonNull;

use crate::element::ElementKind;

/// Stable small-integer key of one array field.
///
/// Keys are declared statically per object type, in field declaration order,
/// and are the only way a projection looks up a pinned address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinKey(pub u16);

impl fmt::Display for PinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for PinKey {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

/// Address, length and kind of one pinned array.
///
/// A handle is a time-boxed view: it never owns numeric data, and it is only
/// meaningful while the registry that holds it keeps the object pinned.
#[must_use]
pub struct PinHandle {
    addr: NonNull<u8>,
    len: usize,
    kind: ElementKind,
    /// Backing storage for text handles. The heap allocation never moves
    /// while the box is alive, which keeps `addr` valid.
    text: Option<Box<[u8]>>,
}

// SAFETY: a numeric handle only ever points into a vector owned by the same
// object as the registry holding the handle, and a text handle points into
// its own boxed buffer. Moving the object (and with it the registry) to
// another thread moves ownership of every pointee along with it.
#[allow(unsafe_code)]
unsafe impl Send for PinHandle {}

impl PinHandle {
    /// Handle onto memory owned elsewhere (a numeric field's vector).
    pub(crate) fn borrowed(addr: NonNull<u8>, len: usize, kind: ElementKind) -> Self {
        Self {
            addr,
            len,
            kind,
            text: None,
        }
    }

    /// Handle owning a transcoded text buffer of `count` slots.
    pub(crate) fn owned_text(mut bytes: Box<[u8]>, count: usize, capacity: usize) -> Self {
        debug_assert_eq!(bytes.len(), count * capacity);
        let addr = NonNull::from(&mut bytes[..]).cast::<u8>();
        Self {
            addr,
            len: count,
            kind: ElementKind::Text { capacity },
            text: Some(bytes),
        }
    }

    /// Start address of the pinned buffer.
    pub fn addr(&self) -> NonNull<u8> {
        self.addr
    }

    /// Start address as a typed raw pointer.
    ///
    /// The caller is responsible for picking the type that matches
    /// [`kind`](Self::kind); [`PinRegistry::ptr`](crate::PinRegistry::ptr)
    /// checks this.
    pub fn as_ptr<T>(&self) -> *mut T {
        self.addr.as_ptr().cast::<T>()
    }

    /// Number of elements (string slots for text).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the pinned buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element kind of the buffer.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Total size of the buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.len * self.kind.byte_width()
    }

    /// The transcoded bytes of a text handle.
    pub fn text_bytes(&self) -> Option<&[u8]> {
        self.text.as_deref()
    }
}

impl fmt::Debug for PinHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinHandle")
            .field("addr", &self.addr)
            .field("len", &self.len)
            .field("kind", &self.kind)
            .finish()
    }
}
