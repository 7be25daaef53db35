//! The pinnable geometry list.

use smallvec::smallvec;

use meshbridge_core::Separators;
use meshbridge_native::copy::{copy_values, to_count, to_len};
use meshbridge_native::GeometryListNative;
use meshbridge_pin::{ArrayField, ArrayFields, PinKey, PinRegistry, Pinnable};

const X: PinKey = PinKey(0);
const Y: PinKey = PinKey(1);
const VALUES: PinKey = PinKey(2);

/// Three parallel coordinate arrays plus the separators that partition them.
///
/// Built by [`encode`](crate::encode), by [`with_len`](Self::with_len) for
/// engines that write results, or directly from arrays. The arrays are
/// always the same length; `number_of_coordinates` may be smaller when the
/// engine reports fewer results than were allocated.
#[derive(Clone, Debug, Default)]
pub struct GeometryList {
    separators: Separators,
    x: Vec<f64>,
    y: Vec<f64>,
    values: Vec<f64>,
    number_of_coordinates: usize,
    pins: PinRegistry,
}

impl GeometryList {
    /// An empty list with the given separators.
    pub fn new(separators: Separators) -> Self {
        Self {
            separators,
            ..Self::default()
        }
    }

    /// A list over caller-provided arrays.
    ///
    /// # Panics
    ///
    /// Panics if the three arrays differ in length.
    pub fn from_arrays(x: Vec<f64>, y: Vec<f64>, values: Vec<f64>, separators: Separators) -> Self {
        assert!(
            x.len() == y.len() && y.len() == values.len(),
            "coordinate arrays differ in length: x {}, y {}, values {}",
            x.len(),
            y.len(),
            values.len()
        );
        let number_of_coordinates = x.len();
        Self {
            separators,
            x,
            y,
            values,
            number_of_coordinates,
            pins: PinRegistry::new(),
        }
    }

    /// A zero-filled list of `len` coordinates, for the engine to write into.
    pub fn with_len(len: usize, separators: Separators) -> Self {
        Self::from_arrays(vec![0.0; len], vec![0.0; len], vec![0.0; len], separators)
    }

    /// Read a list the engine filled.
    ///
    /// # Safety
    ///
    /// Each non-null coordinate pointer of `native` must be valid for reads
    /// of `number_of_coordinates` `f64`.
    #[allow(unsafe_code)]
    pub unsafe fn from_native(native: &GeometryListNative) -> Self {
        let len = to_len(native.number_of_coordinates);
        // SAFETY: forwarded caller contract.
        let (x, y, values) = unsafe {
            (
                copy_values(native.x_coordinates, len),
                copy_values(native.y_coordinates, len),
                copy_values(native.values, len),
            )
        };
        let separators = Separators::new(native.geometry_separator, native.inner_outer_separator);
        Self::from_arrays(
            pad(x, len),
            pad(y, len),
            pad(values, len),
            separators,
        )
    }

    /// The list's separator pair.
    pub fn separators(&self) -> Separators {
        self.separators
    }

    /// The geometry separator.
    pub fn geometry_separator(&self) -> f64 {
        self.separators.geometry
    }

    /// The inner/outer separator.
    pub fn inner_outer_separator(&self) -> f64 {
        self.separators.inner_outer
    }

    /// Coordinates in use, separators included.
    pub fn number_of_coordinates(&self) -> usize {
        self.number_of_coordinates
    }

    /// Set the number of coordinates in use.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the array length.
    pub fn set_number_of_coordinates(&mut self, n: usize) {
        assert!(
            n <= self.x.len(),
            "coordinate count {n} exceeds array length {}",
            self.x.len()
        );
        self.number_of_coordinates = n;
    }

    /// Allocated array length.
    pub fn capacity(&self) -> usize {
        self.x.len()
    }

    /// x coordinates in use.
    pub fn x(&self) -> &[f64] {
        &self.x[..self.number_of_coordinates]
    }

    /// y coordinates in use.
    pub fn y(&self) -> &[f64] {
        &self.y[..self.number_of_coordinates]
    }

    /// Values in use.
    pub fn values(&self) -> &[f64] {
        &self.values[..self.number_of_coordinates]
    }

    /// Whether no coordinates are in use.
    pub fn is_empty(&self) -> bool {
        self.number_of_coordinates == 0
    }

    /// Replace all three arrays. Releases any pins first.
    ///
    /// # Panics
    ///
    /// Panics if the three arrays differ in length.
    pub fn set_coordinates(&mut self, x: Vec<f64>, y: Vec<f64>, values: Vec<f64>) {
        self.unpin();
        let separators = self.separators;
        *self = Self::from_arrays(x, y, values, separators);
    }
}

/// Engine-written arrays may be null; keep the three lengths equal.
fn pad(mut v: Vec<f64>, len: usize) -> Vec<f64> {
    v.resize(len, 0.0);
    v
}

impl PartialEq for GeometryList {
    fn eq(&self, other: &Self) -> bool {
        self.separators == other.separators
            && self.x() == other.x()
            && self.y() == other.y()
            && self.values() == other.values()
    }
}

impl Pinnable for GeometryList {
    type Native = GeometryListNative;

    fn array_fields(&mut self) -> ArrayFields<'_> {
        smallvec![
            (X, ArrayField::numeric(&mut self.x)),
            (Y, ArrayField::numeric(&mut self.y)),
            (VALUES, ArrayField::numeric(&mut self.values)),
        ]
    }

    fn pins(&self) -> &PinRegistry {
        &self.pins
    }

    fn pins_mut(&mut self) -> &mut PinRegistry {
        &mut self.pins
    }

    fn project(&self) -> GeometryListNative {
        GeometryListNative {
            geometry_separator: self.separators.geometry,
            inner_outer_separator: self.separators.inner_outer,
            number_of_coordinates: to_count(self.number_of_coordinates, "geometry list"),
            x_coordinates: self.pins.ptr(X),
            y_coordinates: self.pins.ptr(Y),
            values: self.pins.ptr(VALUES),
        }
    }
}
