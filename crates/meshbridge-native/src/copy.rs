//! Copying engine-written buffers into owned vectors, and count conversion.
//!
//! After a "get data" call the engine has written into buffers the caller
//! allocated and pinned. Results are always copied out into fresh vectors
//! so the returned objects never alias a buffer that is about to be
//! released.

use std::ffi::c_char;

use meshbridge_core::text;

/// Read `len` values starting at `ptr`.
///
/// A null pointer or a zero length yields an empty vector.
///
/// # Safety
///
/// If `ptr` is non-null and `len > 0`, `ptr` must be valid for reads of
/// `len` consecutive, initialised, properly aligned `T`.
#[allow(unsafe_code)]
pub unsafe fn copy_values<T: Copy>(ptr: *const T, len: usize) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    // SAFETY: non-null and valid for `len` reads per the caller contract.
    unsafe { std::slice::from_raw_parts(ptr, len) }.to_vec()
}

/// Read `count` fixed-width strings of `capacity` bytes starting at `ptr`.
///
/// # Safety
///
/// If `ptr` is non-null and `count * capacity > 0`, `ptr` must be valid for
/// reads of `count * capacity` bytes.
#[allow(unsafe_code)]
pub unsafe fn copy_strings(ptr: *const c_char, count: usize, capacity: usize) -> Vec<String> {
    // SAFETY: forwarded caller contract; `c_char` and `u8` share a layout.
    let bytes = unsafe { copy_values(ptr.cast::<u8>(), count * capacity) };
    if bytes.is_empty() {
        return vec![String::new(); count];
    }
    text::decode_fixed(&bytes, count, capacity)
}

/// Convert an engine-reported count to a length. Negative counts are 0.
pub fn to_len(count: i32) -> usize {
    usize::try_from(count).unwrap_or(0)
}

/// Convert a length to the engine's `i32` count.
///
/// # Panics
///
/// Panics if `len` does not fit in an `i32`; the engine cannot address
/// such a buffer.
pub fn to_count(len: usize, what: &str) -> i32 {
    i32::try_from(len)
        .unwrap_or_else(|_| panic!("{what} length {len} exceeds the engine's i32 range"))
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;

    #[test]
    fn null_pointer_copies_nothing() {
        // SAFETY: null is always accepted.
        let v: Vec<f64> = unsafe { copy_values(std::ptr::null(), 10) };
        assert!(v.is_empty());
    }

    #[test]
    fn copy_is_independent_of_source() {
        let mut src = vec![1, 2, 3];
        // SAFETY: `src` holds three i32.
        let copied = unsafe { copy_values(src.as_ptr(), src.len()) };
        src[0] = 99;
        assert_eq!(copied, vec![1, 2, 3]);
    }

    #[test]
    fn strings_decode_up_to_nul() {
        let buf = b"2.1.0\0\0\0abc\0\0\0\0\0";
        // SAFETY: `buf` holds exactly 2 * 8 bytes.
        let got = unsafe { copy_strings(buf.as_ptr().cast(), 2, 8) };
        assert_eq!(got, vec!["2.1.0".to_string(), "abc".to_string()]);
    }

    #[test]
    fn counts_convert_both_ways() {
        assert_eq!(to_len(-3), 0);
        assert_eq!(to_len(7), 7);
        assert_eq!(to_count(7, "nodes"), 7);
    }

    #[test]
    #[should_panic(expected = "exceeds the engine's i32 range")]
    fn oversized_length_panics() {
        to_count(usize::MAX, "nodes");
    }
}
