//! Test utilities for meshbridge development.
//!
//! Provides [`MockKernel`], an in-process engine implementing
//! [`NativeKernel`](meshbridge_kernel::NativeKernel) in plain Rust, reusable
//! geometry and mesh [`fixtures`], and [`init_logging`] for tests that want
//! to see log output.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
mod mock;

pub use mock::MockKernel;

/// Install `env_logger` for tests. Safe to call from every test.
///
/// Output is captured per test; set `RUST_LOG` to choose the level.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
