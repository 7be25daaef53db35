//! Gridded samples for interpolation onto a mesh.

use std::ffi::c_void;
use std::ptr;

use smallvec::smallvec;

use meshbridge_native::copy::to_count;
use meshbridge_native::GriddedSamplesNative;
use meshbridge_pin::{ArrayField, ArrayFields, PinElement, PinKey, PinRegistry, Pinnable};

const COORDINATES_X: PinKey = PinKey(0);
const COORDINATES_Y: PinKey = PinKey(1);
const VALUES: PinKey = PinKey(2);

/// Sample values of element type `T` on a grid.
///
/// Either a regular grid (origin plus uniform cell size) or a rectilinear
/// one with explicit column and row coordinates. Values are stored
/// row-major, `num_x * num_y` of them. The projected `value_type` is `T`'s
/// interpolation-type code.
#[derive(Clone, Debug, Default)]
pub struct GriddedSamples<T: PinElement> {
    coordinates_x: Vec<f64>,
    coordinates_y: Vec<f64>,
    values: Vec<T>,
    num_x: usize,
    num_y: usize,
    origin_x: f64,
    origin_y: f64,
    cell_size: f64,
    pins: PinRegistry,
}

impl<T: PinElement> GriddedSamples<T> {
    /// A regular grid anchored at `origin` with uniform `cell_size`.
    ///
    /// # Panics
    ///
    /// Panics unless `values` holds `num_x * num_y` samples.
    pub fn regular(
        num_x: usize,
        num_y: usize,
        origin: (f64, f64),
        cell_size: f64,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(
            values.len(),
            num_x * num_y,
            "a {num_x}x{num_y} sample grid needs {} values",
            num_x * num_y
        );
        Self {
            coordinates_x: Vec::new(),
            coordinates_y: Vec::new(),
            values,
            num_x,
            num_y,
            origin_x: origin.0,
            origin_y: origin.1,
            cell_size,
            pins: PinRegistry::new(),
        }
    }

    /// A rectilinear grid with explicit column and row coordinates.
    ///
    /// # Panics
    ///
    /// Panics unless `values` holds `xs.len() * ys.len()` samples.
    pub fn rectilinear(xs: Vec<f64>, ys: Vec<f64>, values: Vec<T>) -> Self {
        let (num_x, num_y) = (xs.len(), ys.len());
        assert_eq!(
            values.len(),
            num_x * num_y,
            "a {num_x}x{num_y} sample grid needs {} values",
            num_x * num_y
        );
        Self {
            coordinates_x: xs,
            coordinates_y: ys,
            values,
            num_x,
            num_y,
            pins: PinRegistry::new(),
            ..Self::default()
        }
    }

    /// Whether the grid uses explicit coordinates.
    pub fn is_rectilinear(&self) -> bool {
        !self.coordinates_x.is_empty()
    }

    /// Columns.
    pub fn num_x(&self) -> usize {
        self.num_x
    }

    /// Rows.
    pub fn num_y(&self) -> usize {
        self.num_y
    }

    /// Sample values, row-major.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Replace the values, keeping the grid. Releases any pins first.
    ///
    /// # Panics
    ///
    /// Panics unless `values` holds `num_x * num_y` samples.
    pub fn set_values(&mut self, values: Vec<T>) {
        assert_eq!(values.len(), self.num_x * self.num_y, "sample count changed");
        self.unpin();
        self.values = values;
    }
}

impl<T: PinElement> Pinnable for GriddedSamples<T> {
    type Native = GriddedSamplesNative;

    fn array_fields(&mut self) -> ArrayFields<'_> {
        smallvec![
            (COORDINATES_X, ArrayField::numeric(&mut self.coordinates_x)),
            (COORDINATES_Y, ArrayField::numeric(&mut self.coordinates_y)),
            (VALUES, ArrayField::numeric(&mut self.values)),
        ]
    }

    fn pins(&self) -> &PinRegistry {
        &self.pins
    }

    fn pins_mut(&mut self) -> &mut PinRegistry {
        &mut self.pins
    }

    /// A regular grid projects null coordinate pointers, which is how the
    /// engine tells the two layouts apart.
    fn project(&self) -> GriddedSamplesNative {
        let (coordinates_x, coordinates_y) = if self.is_rectilinear() {
            (self.pins.ptr(COORDINATES_X), self.pins.ptr(COORDINATES_Y))
        } else {
            (ptr::null_mut(), ptr::null_mut())
        };
        GriddedSamplesNative {
            num_x: to_count(self.num_x, "sample columns"),
            num_y: to_count(self.num_y, "sample rows"),
            origin_x: self.origin_x,
            origin_y: self.origin_y,
            cell_size: self.cell_size,
            coordinates_x,
            coordinates_y,
            values: self.pins.ptr::<T>(VALUES).cast::<c_void>(),
            value_type: T::INTERPOLATION_CODE,
        }
    }
}
