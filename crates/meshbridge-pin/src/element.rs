//! Element types that may back a pinned array.

use std::fmt;

/// What a pinned buffer holds, as seen by native code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// 16-bit signed integers.
    I16,
    /// 32-bit floats.
    F32,
    /// 32-bit signed integers.
    I32,
    /// 64-bit floats.
    F64,
    /// Fixed-width ASCII slots of `capacity` bytes each.
    Text {
        /// Bytes per string slot.
        capacity: usize,
    },
}

impl ElementKind {
    /// Size in bytes of one element (one string slot for text).
    pub fn byte_width(self) -> usize {
        match self {
            Self::I16 => 2,
            Self::F32 | Self::I32 => 4,
            Self::F64 => 8,
            Self::Text { capacity } => capacity,
        }
    }

    /// The engine's interpolation-type code for numeric kinds.
    ///
    /// `Short = 0, Float = 1, Int = 2, Double = 3`; `None` for text.
    pub fn interpolation_code(self) -> Option<i32> {
        match self {
            Self::I16 => Some(0),
            Self::F32 => Some(1),
            Self::I32 => Some(2),
            Self::F64 => Some(3),
            Self::Text { .. } => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I16 => f.write_str("i16"),
            Self::F32 => f.write_str("f32"),
            Self::I32 => f.write_str("i32"),
            Self::F64 => f.write_str("f64"),
            Self::Text { capacity } => write!(f, "text[{capacity}]"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for i16 {}
    impl Sealed for f32 {}
    impl Sealed for i32 {}
    impl Sealed for f64 {}
}

/// A numeric element type the native engine understands.
///
/// Sealed: an array of any other element type cannot be declared as a
/// pinnable field, so an unsupported field is a compile error rather than a
/// silently skipped buffer.
pub trait PinElement: sealed::Sealed + Copy + Default + PartialEq + fmt::Debug + Send + 'static {
    /// The kind recorded in the pin handle.
    const KIND: ElementKind;

    /// The engine's interpolation-type code for this element type.
    const INTERPOLATION_CODE: i32;
}

impl PinElement for i16 {
    const KIND: ElementKind = ElementKind::I16;
    const INTERPOLATION_CODE: i32 = 0;
}

impl PinElement for f32 {
    const KIND: ElementKind = ElementKind::F32;
    const INTERPOLATION_CODE: i32 = 1;
}

impl PinElement for i32 {
    const KIND: ElementKind = ElementKind::I32;
    const INTERPOLATION_CODE: i32 = 2;
}

impl PinElement for f64 {
    const KIND: ElementKind = ElementKind::F64;
    const INTERPOLATION_CODE: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_widths_match_rust_types() {
        assert_eq!(i16::KIND.byte_width(), std::mem::size_of::<i16>());
        assert_eq!(f32::KIND.byte_width(), std::mem::size_of::<f32>());
        assert_eq!(i32::KIND.byte_width(), std::mem::size_of::<i32>());
        assert_eq!(f64::KIND.byte_width(), std::mem::size_of::<f64>());
        assert_eq!(ElementKind::Text { capacity: 40 }.byte_width(), 40);
    }

    #[test]
    fn interpolation_codes_are_stable() {
        assert_eq!(ElementKind::I16.interpolation_code(), Some(0));
        assert_eq!(ElementKind::F32.interpolation_code(), Some(1));
        assert_eq!(ElementKind::I32.interpolation_code(), Some(2));
        assert_eq!(ElementKind::F64.interpolation_code(), Some(3));
        assert_eq!(ElementKind::Text { capacity: 8 }.interpolation_code(), None);
        assert_eq!(f64::KIND.interpolation_code(), Some(f64::INTERPOLATION_CODE));
        assert_eq!(i16::KIND.interpolation_code(), Some(i16::INTERPOLATION_CODE));
    }
}
