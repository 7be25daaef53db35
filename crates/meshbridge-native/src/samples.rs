//! Sample grids and spline intersection results.

use std::ffi::c_void;

/// Samples on a regular grid, or at explicit coordinates.
///
/// When `coordinates_x`/`coordinates_y` are non-null they give the sample
/// positions and the origin/cell size are ignored. `values` points to
/// `num_x * num_y` elements whose type is given by `value_type`
/// (`0 = i16, 1 = f32, 2 = i32, 3 = f64`).
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct GriddedSamplesNative {
    /// Columns.
    pub num_x: i32,
    /// Rows.
    pub num_y: i32,
    /// x of the lower-left sample.
    pub origin_x: f64,
    /// y of the lower-left sample.
    pub origin_y: f64,
    /// Spacing of a regular grid.
    pub cell_size: f64,
    /// Explicit sample x coordinates, or null.
    pub coordinates_x: *mut f64,
    /// Explicit sample y coordinates, or null.
    pub coordinates_y: *mut f64,
    /// Sample values.
    pub values: *mut c_void,
    /// Interpolation-type code of the value elements.
    pub value_type: i32,
}

null_default!(GriddedSamplesNative {
    coordinates_x, coordinates_y, values;
    num_x, num_y, origin_x, origin_y, cell_size, value_type
});

/// Intersections of one spline with all others.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct SplineIntersectionsNative {
    /// Number of intersections found.
    pub num_intersections: i32,
    /// Index of the intersected spline.
    pub spline_index: *mut i32,
    /// Intersection angle in degrees.
    pub intersection_angle: *mut f64,
    /// Intersection x coordinate.
    pub intersection_x: *mut f64,
    /// Intersection y coordinate.
    pub intersection_y: *mut f64,
}

null_default!(SplineIntersectionsNative {
    spline_index, intersection_angle, intersection_x, intersection_y;
    num_intersections
});
