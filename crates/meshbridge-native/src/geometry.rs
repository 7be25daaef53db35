//! Flat geometry list projection.

use std::ptr;

/// A geometry list as passed to and from the engine.
///
/// Three parallel coordinate arrays of `number_of_coordinates` entries,
/// partitioned by the two separator values.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct GeometryListNative {
    /// Value marking the boundary between geometries.
    pub geometry_separator: f64,
    /// Value marking the boundary between a polygon's exterior and a hole.
    pub inner_outer_separator: f64,
    /// Total number of coordinates, separators included.
    pub number_of_coordinates: i32,
    /// x coordinates.
    pub x_coordinates: *mut f64,
    /// y coordinates.
    pub y_coordinates: *mut f64,
    /// Per-coordinate values (elevation or attribute).
    pub values: *mut f64,
}

impl Default for GeometryListNative {
    fn default() -> Self {
        Self {
            geometry_separator: 0.0,
            inner_outer_separator: 0.0,
            number_of_coordinates: 0,
            x_coordinates: ptr::null_mut(),
            y_coordinates: ptr::null_mut(),
            values: ptr::null_mut(),
        }
    }
}
