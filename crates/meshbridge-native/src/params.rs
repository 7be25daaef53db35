//! Scalar-only parameter blocks.

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBoxNative {
    /// Lower-left x.
    pub x_lower_left: f64,
    /// Lower-left y.
    pub y_lower_left: f64,
    /// Upper-right x.
    pub x_upper_right: f64,
    /// Upper-right y.
    pub y_upper_right: f64,
}

/// Orthogonalization iteration counts and smoothing weights.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrthogonalizationParametersNative {
    /// Outer iterations.
    pub outer_iterations: i32,
    /// Boundary iterations.
    pub boundary_iterations: i32,
    /// Inner iterations.
    pub inner_iterations: i32,
    /// Weight of orthogonalization against smoothing, interior.
    pub orthogonalization_to_smoothing_factor: f64,
    /// Weight of orthogonalization against smoothing, at the boundary.
    pub orthogonalization_to_smoothing_factor_at_boundary: f64,
    /// Weight of areal against angle smoothing.
    pub areal_to_angle_smoothing_factor: f64,
}

/// Parameters for generating a uniform grid.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MakeGridParametersNative {
    /// Columns.
    pub num_columns: i32,
    /// Rows.
    pub num_rows: i32,
    /// Rotation in degrees.
    pub angle: f64,
    /// Origin x.
    pub origin_x: f64,
    /// Origin y.
    pub origin_y: f64,
    /// Block size along x.
    pub block_size_x: f64,
    /// Block size along y.
    pub block_size_y: f64,
    /// Upper-right corner x.
    pub upper_right_x: f64,
    /// Upper-right corner y.
    pub upper_right_y: f64,
}
