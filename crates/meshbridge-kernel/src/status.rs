//! Resolving native status codes into [`CallError`]s.
//!
//! The engine does not publish fixed codes per failure category; it answers
//! one "get exit code" query per [`ExitCategory`]. A nonzero status is
//! classified by asking each category in turn and taking the first match.

use std::ffi::c_char;

use meshbridge_core::{text, CallError, ExchangeConfig, ExitCategory};

use crate::kernel::{NativeKernel, ERROR_MESSAGE_LEN, STATUS_OK};

/// Turn a status returned by `kernel` into a `Result`.
///
/// [`STATUS_OK`] is `Ok(())`. Any other code is classified against the
/// engine's exit codes and paired with the engine's last-error text, read
/// into a buffer of `config.error_message_capacity` bytes. A failing
/// classification or error query leaves the category or message empty; the
/// original code is always kept. Nothing is retried.
pub fn resolve_status<K: NativeKernel + ?Sized>(
    kernel: &K,
    config: &ExchangeConfig,
    code: i32,
) -> Result<(), CallError> {
    if code == STATUS_OK {
        return Ok(());
    }
    let err = CallError {
        code,
        category: classify(kernel, code),
        message: last_error_text(kernel, config.error_message_capacity).unwrap_or_default(),
    };
    log::debug!("{err}");
    Err(err)
}

/// The first category whose exit code equals `code`.
#[allow(unsafe_code)]
fn classify<K: NativeKernel + ?Sized>(kernel: &K, code: i32) -> Option<ExitCategory> {
    ExitCategory::ALL.into_iter().find(|&category| {
        let mut exit_code = STATUS_OK;
        // SAFETY: `exit_code` is a live local for the duration of the call.
        let status = unsafe { kernel.get_exit_code(category, &mut exit_code) };
        status == STATUS_OK && exit_code == code
    })
}

/// Read the engine's last-error text, keeping at most `capacity` bytes.
///
/// The buffer handed to the engine is never smaller than
/// [`ERROR_MESSAGE_LEN`]. A failing query is reported as an unclassified
/// [`CallError`] rather than resolved again.
#[allow(unsafe_code)]
pub fn last_error_text<K: NativeKernel + ?Sized>(
    kernel: &K,
    capacity: usize,
) -> Result<String, CallError> {
    // SAFETY: `read_text` passes a buffer of at least `ERROR_MESSAGE_LEN` bytes.
    read_text(capacity, ERROR_MESSAGE_LEN, |buffer| unsafe {
        kernel.get_error(buffer)
    })
}

/// Run a text query against a zeroed buffer of `max(capacity, engine_len)`
/// bytes and decode its first `capacity` bytes up to the first NUL.
pub(crate) fn read_text(
    capacity: usize,
    engine_len: usize,
    query: impl FnOnce(*mut c_char) -> i32,
) -> Result<String, CallError> {
    let mut buffer = vec![0u8; capacity.max(engine_len)];
    let status = query(buffer.as_mut_ptr().cast::<c_char>());
    if status != STATUS_OK {
        return Err(CallError::unclassified(status));
    }
    Ok(text::decode_terminated(&buffer[..capacity]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(unsafe_code)]
    fn text_query_decodes_up_to_nul() {
        let got = read_text(16, 16, |buffer| {
            let bytes = b"bad mesh\0";
            // SAFETY: `buffer` holds 16 bytes, more than `bytes`.
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr().cast::<c_char>(), buffer, bytes.len());
            }
            STATUS_OK
        });
        assert_eq!(got, Ok("bad mesh".to_string()));
    }

    #[test]
    fn failing_text_query_is_unclassified() {
        assert_eq!(read_text(8, 8, |_| 3), Err(CallError::unclassified(3)));
    }

    #[test]
    #[allow(unsafe_code)]
    fn small_capacity_still_gets_engine_sized_buffer() {
        let got = read_text(4, 32, |buffer| {
            let bytes = [b'e'; 32];
            // SAFETY: `read_text` allocates at least `engine_len` bytes.
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr().cast::<c_char>(), buffer, bytes.len());
            }
            STATUS_OK
        });
        assert_eq!(got, Ok("eeee".to_string()));
    }
}
