//! The seam between meshbridge objects and the native mesh engine.
//!
//! [`NativeKernel`] lists the engine entry points this layer drives. Every
//! entry point returns an `i32` status; [`resolve_status`] turns a nonzero
//! status into a [`CallError`](meshbridge_core::CallError) by asking the
//! engine which category the code belongs to and what went wrong.
//!
//! [`Exchange`] runs the full data flow for each operation:
//!
//! ```text
//!   get dimensions ─▶ allocate ─▶ pin + view ─▶ call ─▶ copy out ─▶ unpin
//! ```
//!
//! Every pin taken by an exchange routine is released before it returns,
//! on success and on failure.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod exchange;
pub mod kernel;
pub mod status;

pub use exchange::Exchange;
pub use kernel::{NativeKernel, ERROR_MESSAGE_LEN, STATUS_OK, VERSION_LEN};
pub use status::{last_error_text, resolve_status};
