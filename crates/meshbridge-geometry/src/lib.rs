//! Geometry model and the flat geometry-list codec.
//!
//! The engine takes every geometry argument as three parallel `f64` arrays
//! (x, y, value). Several geometries share one list: a *geometry separator*
//! triple sits between consecutive geometries and an *inner/outer separator*
//! triple sits before each hole of a polygon.
//!
//! ```text
//!   x:  0  1  1  0  -998  .2  .4  .2  -999  5  6  7
//!       └ exterior ┘  │   └─ hole ─┘   │    └ next ┘
//!                     └ inner/outer    └ geometry separator
//! ```
//!
//! Separators are plain values inside otherwise numeric data. A real
//! coordinate equal to a separator (within the tolerance) is read as
//! structure; this is a property of the wire format and is neither detected
//! nor diagnosed here.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod codec;
pub mod list;
pub mod model;

pub use codec::{
    decode, decode_with_report, encode, encode_coordinates, encode_polygons, Decoded, RingAnomaly,
    RingRole,
};
pub use list::GeometryList;
pub use model::{Coord, Geometry, LineString, Polygon};
