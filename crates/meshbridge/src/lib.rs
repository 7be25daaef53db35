//! meshbridge: a marshaling layer between owned Rust data and a native
//! mesh-processing engine.
//!
//! This is the facade crate that re-exports the public API of the
//! meshbridge sub-crates. For most users, adding `meshbridge` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use meshbridge::prelude::*;
//!
//! // A unit square with a triangular hole.
//! let exterior: LineString = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
//!     .into_iter()
//!     .collect();
//! let hole: LineString = [(0.2, 0.2), (0.4, 0.2), (0.2, 0.4)].into_iter().collect();
//! let square = Polygon::new(exterior, [hole]);
//!
//! // Flatten it with the customary separators and hand it to native code.
//! let mut list = encode_polygons(&[square], Separators::default());
//! assert_eq!(list.number_of_coordinates(), 8);
//! {
//!     let view = list.create_native_view();
//!     assert_eq!(view.number_of_coordinates, 8);
//!     // ... pass `view.as_ptr()` to the engine ...
//! }
//! list.unpin();
//!
//! // Decoding closes every ring.
//! let polygons = decode(&list);
//! assert_eq!(polygons[0].exterior.len(), 5);
//! assert_eq!(polygons[0].interiors[0].len(), 4);
//! ```
//!
//! Against an engine, [`Exchange`](kernel::Exchange) runs the whole cycle
//! for each operation and releases every pin before it returns:
//!
//! ```rust
//! use meshbridge::prelude::*;
//! use meshbridge_test_utils::{fixtures, MockKernel};
//!
//! let kernel = MockKernel::new();
//! let state = kernel.new_state();
//! let exchange = Exchange::new(&kernel);
//!
//! let mut mesh = fixtures::unit_square_mesh();
//! exchange.set_mesh2d(state, &mut mesh).unwrap();
//! let back = exchange.mesh2d(state, FaceData::Include).unwrap();
//! assert_eq!(back.nodes_x(), mesh.nodes_x());
//! assert!(!mesh.is_pinned());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `meshbridge-core` | Errors, exchange config, text buffers, state ids |
//! | [`pin`] | `meshbridge-pin` | Pin registry, `Pinnable`, `NativeView` |
//! | [`native`] | `meshbridge-native` | `#[repr(C)]` projections and copy-out helpers |
//! | [`geometry`] | `meshbridge-geometry` | Geometry model, `GeometryList`, codec |
//! | [`mesh`] | `meshbridge-mesh` | Mesh objects, sample grids, parameter objects |
//! | [`kernel`] | `meshbridge-kernel` | `NativeKernel`, status resolution, `Exchange` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Shared types (`meshbridge-core`).
///
/// [`types::CallError`] and [`types::ExitCategory`] describe native call
/// failures; [`types::ExchangeConfig`] holds separators, tolerance and text
/// buffer capacities.
pub use meshbridge_core as types;

/// Pinned-buffer management (`meshbridge-pin`).
///
/// Implement [`pin::Pinnable`] to expose an object's arrays to native code.
pub use meshbridge_pin as pin;

/// Native struct projections (`meshbridge-native`).
pub use meshbridge_native as native;

/// Geometry model and flat-list codec (`meshbridge-geometry`).
pub use meshbridge_geometry as geometry;

/// Mesh objects (`meshbridge-mesh`).
///
/// [`mesh::Mesh2D`] is the resizable mesh buffer.
pub use meshbridge_mesh as mesh;

/// The engine seam and exchange routines (`meshbridge-kernel`).
pub use meshbridge_kernel as kernel;

/// Common imports for typical meshbridge usage.
///
/// ```rust
/// use meshbridge::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use meshbridge_core::{
        CallError, ConfigError, ExchangeConfig, ExitCategory, Separators, StateId,
    };

    // Pinning
    pub use meshbridge_pin::{NativeView, Pinnable};

    // Geometry
    pub use meshbridge_geometry::{
        decode, decode_with_report, encode, encode_polygons, Coord, Geometry, GeometryList,
        LineString, Polygon,
    };

    // Meshes
    pub use meshbridge_mesh::{
        Contacts, CurvilinearGrid, FaceData, GriddedSamples, Mesh1D, Mesh2D, ReadOnlyMesh2D,
    };

    // Engine
    pub use meshbridge_kernel::{Exchange, NativeKernel};
}
