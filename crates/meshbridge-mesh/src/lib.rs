//! Pinnable mesh objects exchanged with the native engine.
//!
//! Each object owns its arrays and a [`PinRegistry`](meshbridge_pin::PinRegistry),
//! implements [`Pinnable`](meshbridge_pin::Pinnable) against its
//! `meshbridge-native` projection, and can be rebuilt from an engine-filled
//! projection with an `unsafe fn from_native`.
//!
//! [`Mesh2D`] is the resizable buffer: it distinguishes allocated from valid
//! counts and grows monotonically through [`Mesh2D::resize`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod contacts;
pub mod curvilinear;
pub mod error;
pub mod mesh1d;
pub mod mesh2d;
pub mod params;
pub mod samples;
pub mod splines;
pub mod topology;

pub use contacts::Contacts;
pub use curvilinear::CurvilinearGrid;
pub use error::MeshError;
pub use mesh1d::Mesh1D;
pub use mesh2d::{FaceData, Mesh2D};
pub use params::{BoundingBox, MakeGridParameters, OrthogonalizationParameters};
pub use samples::GriddedSamples;
pub use splines::SplineIntersections;
pub use topology::ReadOnlyMesh2D;
