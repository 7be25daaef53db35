//! Benchmark profiles for the meshbridge exchange layer.
//!
//! - [`polygon_profile`]: many polygons with holes, for the geometry codec
//! - [`mesh_profile`]: a square block of quadrilaterals, for resize and
//!   exchange round trips

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use meshbridge_geometry::Polygon;
use meshbridge_mesh::Mesh2D;
use meshbridge_test_utils::fixtures::{quad_mesh, regular_ring};

/// `count` polygons laid out on a row, each a `points`-gon with one
/// triangular hole.
pub fn polygon_profile(count: usize, points: usize) -> Vec<Polygon> {
    (0..count)
        .map(|i| {
            let cx = 4.0 * i as f64;
            Polygon::new(
                regular_ring(points, cx, 0.0, 1.5),
                [regular_ring(3, cx, 0.0, 0.5)],
            )
        })
        .collect()
}

/// A `side x side` block of unit quadrilaterals.
pub fn mesh_profile(side: usize) -> Mesh2D {
    quad_mesh(side)
}
