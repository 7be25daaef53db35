//! Fixed-width text buffers for string data crossing the native boundary.
//!
//! The engine exchanges strings as flat byte arrays: `count` slots of exactly
//! `capacity` bytes each, ASCII, NUL-padded. A slot is read as text up to its
//! first NUL; a slot with no NUL is text for its whole width.

/// Byte written in place of a character that is not ASCII.
pub const REPLACEMENT: u8 = b'?';

/// Flatten `values` into `values.len() * capacity` bytes.
///
/// Each string is transcoded to ASCII (non-ASCII characters become
/// [`REPLACEMENT`]), truncated to `capacity` bytes and NUL-padded.
pub fn encode_fixed<S: AsRef<str>>(values: &[S], capacity: usize) -> Vec<u8> {
    let mut out = vec![0u8; values.len() * capacity];
    for (slot, value) in out.chunks_exact_mut(capacity.max(1)).zip(values) {
        let ascii = value
            .as_ref()
            .chars()
            .map(|c| if c.is_ascii() { c as u8 } else { REPLACEMENT });
        for (dst, src) in slot.iter_mut().zip(ascii) {
            *dst = src;
        }
    }
    out
}

/// Read `count` strings of `capacity` bytes each from `bytes`.
///
/// # Panics
///
/// Panics if `bytes` is shorter than `count * capacity`.
pub fn decode_fixed(bytes: &[u8], count: usize, capacity: usize) -> Vec<String> {
    let total = count * capacity;
    assert!(
        bytes.len() >= total,
        "text buffer holds {} bytes, {count} slots of {capacity} need {total}",
        bytes.len()
    );
    if capacity == 0 {
        return vec![String::new(); count];
    }
    bytes[..total]
        .chunks_exact(capacity)
        .map(decode_terminated)
        .collect()
}

/// Read one NUL-terminated string from a buffer of known capacity.
///
/// Stops at the first NUL or at the end of the buffer, whichever comes first.
pub fn decode_terminated(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
