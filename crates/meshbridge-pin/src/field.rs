//! Entries of an object's static array-field table.

use std::marker::PhantomData;
use std::ptr::NonNull;

use smallvec::SmallVec;

use meshbridge_core::text;

use crate::element::{ElementKind, PinElement};
use crate::handle::{PinHandle, PinKey};

/// The `(key, field)` table an object returns from
/// [`Pinnable::array_fields`](crate::Pinnable::array_fields).
///
/// Inline capacity covers the widest projection (Mesh2D, eleven arrays).
pub type ArrayFields<'a> = SmallVec<[(PinKey, ArrayField<'a>); 12]>;

/// One array-typed field of a pinnable object.
///
/// Holds the field's exclusive borrow until it is turned into a
/// [`PinHandle`]; after that the handle carries only the address.
pub struct ArrayField<'a> {
    inner: FieldInner<'a>,
}

enum FieldInner<'a> {
    Numeric {
        addr: NonNull<u8>,
        len: usize,
        kind: ElementKind,
        _borrow: PhantomData<&'a mut [u8]>,
    },
    Text {
        values: &'a mut Vec<String>,
        capacity: usize,
    },
}

impl<'a> ArrayField<'a> {
    /// A numeric array field.
    ///
    /// An empty vector stands in for an absent array: its address is
    /// dangling but non-null and aligned, so a null reference never crosses
    /// the boundary.
    pub fn numeric<E: PinElement>(values: &'a mut Vec<E>) -> Self {
        let len = values.len();
        let addr = NonNull::from(values.as_mut_slice()).cast::<u8>();
        Self {
            inner: FieldInner::Numeric {
                addr,
                len,
                kind: E::KIND,
                _borrow: PhantomData,
            },
        }
    }

    /// A string array field transcoded to `capacity`-byte slots when pinned.
    ///
    /// A capacity of zero declares a field that is never pinned.
    pub fn text(values: &'a mut Vec<String>, capacity: usize) -> Self {
        Self {
            inner: FieldInner::Text { values, capacity },
        }
    }

    /// The element kind the field pins as.
    pub fn kind(&self) -> ElementKind {
        match &self.inner {
            FieldInner::Numeric { kind, .. } => *kind,
            FieldInner::Text { capacity, .. } => ElementKind::Text {
                capacity: *capacity,
            },
        }
    }

    /// Number of elements (strings for text fields).
    pub fn len(&self) -> usize {
        match &self.inner {
            FieldInner::Numeric { len, .. } => *len,
            FieldInner::Text { values, .. } => values.len(),
        }
    }

    /// Whether the field holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pin the field, or `None` for a text field declared with capacity 0.
    pub(crate) fn into_handle(self) -> Option<PinHandle> {
        match self.inner {
            FieldInner::Numeric {
                addr, len, kind, ..
            } => Some(PinHandle::borrowed(addr, len, kind)),
            FieldInner::Text { capacity: 0, .. } => None,
            FieldInner::Text { values, capacity } => {
                let bytes = text::encode_fixed(values.as_slice(), capacity).into_boxed_slice();
                Some(PinHandle::owned_text(bytes, values.len(), capacity))
            }
        }
    }
}

impl<'a, E: PinElement> From<&'a mut Vec<E>> for ArrayField<'a> {
    fn from(values: &'a mut Vec<E>) -> Self {
        Self::numeric(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_field_pins_the_vector_address() {
        let mut data = vec![1i32, 2, 3];
        let expected = data.as_mut_ptr();
        let handle = ArrayField::numeric(&mut data).into_handle().unwrap();
        assert_eq!(handle.as_ptr::<i32>(), expected);
        assert_eq!(handle.len(), 3);
        assert_eq!(handle.kind(), ElementKind::I32);
    }

    #[test]
    fn empty_vector_pins_non_null() {
        let mut data: Vec<f64> = Vec::new();
        let handle = ArrayField::from(&mut data).into_handle().unwrap();
        assert!(!handle.as_ptr::<f64>().is_null());
        assert!(handle.is_empty());
    }

    #[test]
    fn text_field_transcodes_to_fixed_slots() {
        let mut names = vec!["node-1".to_string(), "n2".to_string()];
        let field = ArrayField::text(&mut names, 4);
        assert_eq!(field.kind(), ElementKind::Text { capacity: 4 });
        let handle = field.into_handle().unwrap();
        assert_eq!(handle.text_bytes().unwrap(), b"noden2\0\0");
        assert_eq!(handle.len(), 2);
    }

    #[test]
    fn zero_capacity_text_is_skipped() {
        let mut names = vec!["ignored".to_string()];
        assert!(ArrayField::text(&mut names, 0).into_handle().is_none());
    }
}
