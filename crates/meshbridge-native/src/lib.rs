//! `#[repr(C)]` projections of the structures exchanged with the native
//! mesh engine.
//!
//! Every type here is plain data: raw addresses and counts laid out exactly
//! as the engine's flat call interface expects. A projection never owns the
//! memory its pointers refer to; the pointers are valid only while the
//! originating object stays pinned (see `meshbridge-pin`).
//!
//! [`copy`] holds the `unsafe` helpers that read engine-written buffers back
//! into fresh owned vectors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// `Default` with every pointer field null and every scalar zeroed.
macro_rules! null_default {
    ($ty:ident { $($ptr:ident),* $(,)? ; $($scalar:ident),* $(,)? }) => {
        impl Default for $ty {
            fn default() -> Self {
                Self {
                    $($ptr: std::ptr::null_mut(),)*
                    $($scalar: Default::default(),)*
                }
            }
        }
    };
}

pub mod copy;
pub mod geometry;
pub mod mesh;
pub mod params;
pub mod samples;

pub use geometry::GeometryListNative;
pub use mesh::{ContactsNative, CurvilinearGridNative, Mesh1DNative, Mesh2DNative};
pub use params::{BoundingBoxNative, MakeGridParametersNative, OrthogonalizationParametersNative};
pub use samples::{GriddedSamplesNative, SplineIntersectionsNative};
