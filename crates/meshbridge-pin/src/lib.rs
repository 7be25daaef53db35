//! Pinned-buffer management for native calls.
//!
//! Owned arrays are exposed to native code as raw addresses that must stay
//! valid, and must not move, for the whole duration of a call. This crate
//! provides the machinery that guarantees it for any object that declares
//! its array fields:
//!
//! ```text
//! Pinnable object
//! ├── array_fields()  static (PinKey, ArrayField) table, declaration order
//! ├── PinRegistry     PinKey → PinHandle, plus the "pinned" flag
//! │   └── PinHandle   address + length + ElementKind (owns transcoded text)
//! └── create_native_view() → NativeView<'_, Native>
//!                      projection holding the object's exclusive borrow
//! ```
//!
//! Releasing is deterministic: [`Pinnable::unpin`] or [`Pinnable::dispose`].
//! Dropping a still-pinned registry releases it as a last resort and logs a
//! warning.
//!
//! The only `unsafe` here is the `Send` impl of [`PinHandle`]; reading
//! through the addresses is left to the native side.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod element;
pub mod field;
pub mod handle;
pub mod pinnable;
pub mod registry;

pub use element::{ElementKind, PinElement};
pub use field::{ArrayField, ArrayFields};
pub use handle::{PinHandle, PinKey};
pub use pinnable::{NativeView, Pinnable};
pub use registry::PinRegistry;
