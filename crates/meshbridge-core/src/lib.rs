//! Core types for the meshbridge data-exchange layer.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other crate in the workspace: kernel state
//! identifiers, exit categories and call errors, the exchange configuration
//! (separators, tolerance, text capacities), and the fixed-width text codec
//! used for string data crossing the native boundary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod id;
pub mod text;

pub use config::{ExchangeConfig, Separators};
pub use error::{CallError, ConfigError, ExitCategory};
pub use id::StateId;
