//! Parameter objects and their scalar native blocks.
//!
//! Each object has the engine's documented defaults and converts into its
//! `meshbridge-native` block with `From`. None of them hold arrays, so none
//! need pinning.

use meshbridge_native::{BoundingBoxNative, MakeGridParametersNative, OrthogonalizationParametersNative};

/// Axis-aligned bounding box. The default covers the whole plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Lower-left x.
    pub x_lower_left: f64,
    /// Lower-left y.
    pub y_lower_left: f64,
    /// Upper-right x.
    pub x_upper_right: f64,
    /// Upper-right y.
    pub y_upper_right: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            x_lower_left: f64::MIN,
            y_lower_left: f64::MIN,
            x_upper_right: f64::MAX,
            y_upper_right: f64::MAX,
        }
    }
}

impl From<BoundingBox> for BoundingBoxNative {
    fn from(b: BoundingBox) -> Self {
        Self {
            x_lower_left: b.x_lower_left,
            y_lower_left: b.y_lower_left,
            x_upper_right: b.x_upper_right,
            y_upper_right: b.y_upper_right,
        }
    }
}

/// Iteration counts and smoothing weights for orthogonalization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthogonalizationParameters {
    /// Outer iterations. Default: 2.
    pub outer_iterations: i32,
    /// Boundary iterations. Default: 25.
    pub boundary_iterations: i32,
    /// Inner iterations. Default: 25.
    pub inner_iterations: i32,
    /// Orthogonalization against smoothing, interior. Default: 0.975.
    pub orthogonalization_to_smoothing_factor: f64,
    /// Orthogonalization against smoothing, boundary. Default: 1.0.
    pub orthogonalization_to_smoothing_factor_at_boundary: f64,
    /// Areal against angle smoothing. Default: 1.0.
    pub areal_to_angle_smoothing_factor: f64,
}

impl Default for OrthogonalizationParameters {
    fn default() -> Self {
        Self {
            outer_iterations: 2,
            boundary_iterations: 25,
            inner_iterations: 25,
            orthogonalization_to_smoothing_factor: 0.975,
            orthogonalization_to_smoothing_factor_at_boundary: 1.0,
            areal_to_angle_smoothing_factor: 1.0,
        }
    }
}

impl From<OrthogonalizationParameters> for OrthogonalizationParametersNative {
    fn from(p: OrthogonalizationParameters) -> Self {
        Self {
            outer_iterations: p.outer_iterations,
            boundary_iterations: p.boundary_iterations,
            inner_iterations: p.inner_iterations,
            orthogonalization_to_smoothing_factor: p.orthogonalization_to_smoothing_factor,
            orthogonalization_to_smoothing_factor_at_boundary: p
                .orthogonalization_to_smoothing_factor_at_boundary,
            areal_to_angle_smoothing_factor: p.areal_to_angle_smoothing_factor,
        }
    }
}

/// Layout of a generated uniform grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MakeGridParameters {
    /// Columns. Default: 3.
    pub num_columns: i32,
    /// Rows. Default: 3.
    pub num_rows: i32,
    /// Rotation in degrees. Default: 0.
    pub angle: f64,
    /// Origin x. Default: 0.
    pub origin_x: f64,
    /// Origin y. Default: 0.
    pub origin_y: f64,
    /// Block size along x. Default: 10.
    pub block_size_x: f64,
    /// Block size along y. Default: 10.
    pub block_size_y: f64,
    /// Upper-right corner x. Default: 0.
    pub upper_right_x: f64,
    /// Upper-right corner y. Default: 0.
    pub upper_right_y: f64,
}

impl Default for MakeGridParameters {
    fn default() -> Self {
        Self {
            num_columns: 3,
            num_rows: 3,
            angle: 0.0,
            origin_x: 0.0,
            origin_y: 0.0,
            block_size_x: 10.0,
            block_size_y: 10.0,
            upper_right_x: 0.0,
            upper_right_y: 0.0,
        }
    }
}

impl From<MakeGridParameters> for MakeGridParametersNative {
    fn from(p: MakeGridParameters) -> Self {
        Self {
            num_columns: p.num_columns,
            num_rows: p.num_rows,
            angle: p.angle,
            origin_x: p.origin_x,
            origin_y: p.origin_y,
            block_size_x: p.block_size_x,
            block_size_y: p.block_size_y,
            upper_right_x: p.upper_right_x,
            upper_right_y: p.upper_right_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonalization_defaults() {
        let native = OrthogonalizationParametersNative::from(OrthogonalizationParameters::default());
        assert_eq!(native.outer_iterations, 2);
        assert_eq!(native.boundary_iterations, 25);
        assert_eq!(native.inner_iterations, 25);
        assert_eq!(native.orthogonalization_to_smoothing_factor, 0.975);
    }

    #[test]
    fn make_grid_defaults() {
        let native = MakeGridParametersNative::from(MakeGridParameters::default());
        assert_eq!((native.num_columns, native.num_rows), (3, 3));
        assert_eq!(native.block_size_x, 10.0);
    }

    #[test]
    fn default_bounding_box_is_unbounded() {
        let b = BoundingBoxNative::from(BoundingBox::default());
        assert_eq!(b.x_lower_left, f64::MIN);
        assert_eq!(b.y_upper_right, f64::MAX);
    }
}
