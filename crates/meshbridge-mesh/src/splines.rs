//! Spline intersection results.

use smallvec::smallvec;

use meshbridge_native::copy::{copy_values, to_count, to_len};
use meshbridge_native::SplineIntersectionsNative;
use meshbridge_pin::{ArrayField, ArrayFields, PinKey, PinRegistry, Pinnable};

const SPLINE_INDEX: PinKey = PinKey(0);
const ANGLE: PinKey = PinKey(1);
const X: PinKey = PinKey(2);
const Y: PinKey = PinKey(3);

/// Where one spline crosses the others.
#[derive(Clone, Debug, Default)]
pub struct SplineIntersections {
    spline_index: Vec<i32>,
    angle: Vec<f64>,
    x: Vec<f64>,
    y: Vec<f64>,
    pins: PinRegistry,
}

impl SplineIntersections {
    /// Room for `n` intersections.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            spline_index: vec![0; n],
            angle: vec![0.0; n],
            x: vec![0.0; n],
            y: vec![0.0; n],
            pins: PinRegistry::new(),
        }
    }

    /// Read results the engine filled.
    ///
    /// # Safety
    ///
    /// Non-null pointers must be valid for `num_intersections` reads.
    #[allow(unsafe_code)]
    pub unsafe fn from_native(native: &SplineIntersectionsNative) -> Self {
        let n = to_len(native.num_intersections);
        let mut out = Self::with_capacity(n);
        // SAFETY: forwarded caller contract.
        unsafe {
            fill(&mut out.spline_index, copy_values(native.spline_index, n));
            fill(&mut out.angle, copy_values(native.intersection_angle, n));
            fill(&mut out.x, copy_values(native.intersection_x, n));
            fill(&mut out.y, copy_values(native.intersection_y, n));
        }
        out
    }

    /// Number of intersections.
    pub fn len(&self) -> usize {
        self.spline_index.len()
    }

    /// Whether there are none.
    pub fn is_empty(&self) -> bool {
        self.spline_index.is_empty()
    }

    /// Index of the intersected spline, per intersection.
    pub fn spline_indices(&self) -> &[i32] {
        &self.spline_index
    }

    /// Intersection angles in degrees.
    pub fn angles(&self) -> &[f64] {
        &self.angle
    }

    /// Intersection points.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

fn fill<T: Copy>(dst: &mut [T], src: Vec<T>) {
    let n = src.len().min(dst.len());
    dst[..n].copy_from_slice(&src[..n]);
}

impl Pinnable for SplineIntersections {
    type Native = SplineIntersectionsNative;

    fn array_fields(&mut self) -> ArrayFields<'_> {
        smallvec![
            (SPLINE_INDEX, ArrayField::numeric(&mut self.spline_index)),
            (ANGLE, ArrayField::numeric(&mut self.angle)),
            (X, ArrayField::numeric(&mut self.x)),
            (Y, ArrayField::numeric(&mut self.y)),
        ]
    }

    fn pins(&self) -> &PinRegistry {
        &self.pins
    }

    fn pins_mut(&mut self) -> &mut PinRegistry {
        &mut self.pins
    }

    fn project(&self) -> SplineIntersectionsNative {
        SplineIntersectionsNative {
            num_intersections: to_count(self.len(), "spline intersections"),
            spline_index: self.pins.ptr(SPLINE_INDEX),
            intersection_angle: self.pins.ptr(ANGLE),
            intersection_x: self.pins.ptr(X),
            intersection_y: self.pins.ptr(Y),
        }
    }
}
