//! Coordinates, rings and polygons.

use smallvec::SmallVec;

/// A 2D point with an optional elevation or attribute value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    /// x coordinate.
    pub x: f64,
    /// y coordinate.
    pub y: f64,
    /// Elevation or attribute, if any.
    pub z: Option<f64>,
}

impl Coord {
    /// A point without a value.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// A point carrying a value.
    pub const fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// The value written to the third array: `z` if present and finite,
    /// else 0.
    pub fn value(&self) -> f64 {
        match self.z {
            Some(z) if z.is_finite() => z,
            _ => 0.0,
        }
    }

    /// Whether `x` and `y` match `other`, ignoring `z`.
    pub fn same_position(&self, other: &Coord) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64, f64)> for Coord {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::with_z(x, y, z)
    }
}

/// An ordered run of coordinates: a ring or an open line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineString(pub Vec<Coord>);

impl LineString {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The points.
    pub fn coords(&self) -> &[Coord] {
        &self.0
    }

    /// Whether the first and last points coincide (and there are at least
    /// two of them).
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) if self.0.len() > 1 => first.same_position(last),
            _ => false,
        }
    }

    /// A copy with the first point appended, unless empty.
    pub fn closed(&self) -> LineString {
        let mut points = self.0.clone();
        if let Some(&first) = points.first() {
            points.push(first);
        }
        LineString(points)
    }
}

impl<C: Into<Coord>> FromIterator<C> for LineString {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        LineString(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<Coord>> for LineString {
    fn from(points: Vec<Coord>) -> Self {
        LineString(points)
    }
}

/// A polygon: an exterior ring and zero or more holes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    /// The outer boundary.
    pub exterior: LineString,
    /// Holes, in order.
    pub interiors: SmallVec<[LineString; 1]>,
}

impl Polygon {
    /// Create a polygon from its rings.
    pub fn new(exterior: LineString, interiors: impl IntoIterator<Item = LineString>) -> Self {
        Self {
            exterior,
            interiors: interiors.into_iter().collect(),
        }
    }

    /// Total number of points over all rings.
    pub fn point_count(&self) -> usize {
        self.exterior.len() + self.interiors.iter().map(LineString::len).sum::<usize>()
    }
}

/// One geometry of an encoded list.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Exterior ring followed by inner/outer-separated holes.
    Polygon(Polygon),
    /// Coordinates emitted as-is.
    LineString(LineString),
    /// Coordinates emitted as-is.
    MultiPoint(Vec<Coord>),
}

impl Geometry {
    /// Number of coordinate triples this geometry occupies when encoded,
    /// separators inside it included.
    pub fn encoded_len(&self) -> usize {
        match self {
            Geometry::Polygon(p) => p.point_count() + p.interiors.len(),
            Geometry::LineString(l) => l.len(),
            Geometry::MultiPoint(points) => points.len(),
        }
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Geometry::Polygon(p)
    }
}

impl From<LineString> for Geometry {
    fn from(l: LineString) -> Self {
        Geometry::LineString(l)
    }
}
