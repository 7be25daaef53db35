//! Encoding geometries into a [`GeometryList`] and decoding them back.
//!
//! Encode emits one geometry-separator triple between consecutive
//! geometries and one inner/outer-separator triple before each polygon
//! hole. Decode scans left to right and closes a polygon at every geometry
//! separator and at the end of the stream, duplicating the first point of
//! every ring.
//!
//! Any change to separator values or tolerance must be made on both paths.

use std::fmt;

use smallvec::SmallVec;

use meshbridge_core::{ExchangeConfig, Separators};

use crate::list::GeometryList;
use crate::model::{Coord, Geometry, LineString, Polygon};

// ── Encode ──────────────────────────────────────────────────────

/// Flatten `geometries` into a geometry list, in input order.
///
/// An empty slice yields an empty list carrying `separators`.
pub fn encode(geometries: &[Geometry], separators: Separators) -> GeometryList {
    let mut flat = Flat::with_capacity(encoded_len(geometries.iter().map(Geometry::encoded_len)));
    for (i, geometry) in geometries.iter().enumerate() {
        if i > 0 {
            flat.push_separator(separators.geometry);
        }
        match geometry {
            Geometry::Polygon(p) => flat.push_polygon(p, separators.inner_outer),
            Geometry::LineString(l) => flat.push_coords(l.coords()),
            Geometry::MultiPoint(points) => flat.push_coords(points),
        }
    }
    flat.into_list(separators)
}

/// Flatten polygons, each with its holes.
pub fn encode_polygons(polygons: &[Polygon], separators: Separators) -> GeometryList {
    let mut flat = Flat::with_capacity(encoded_len(
        polygons.iter().map(|p| p.point_count() + p.interiors.len()),
    ));
    for (i, polygon) in polygons.iter().enumerate() {
        if i > 0 {
            flat.push_separator(separators.geometry);
        }
        flat.push_polygon(polygon, separators.inner_outer);
    }
    flat.into_list(separators)
}

/// Flatten a single run of coordinates (one line string, no separators).
pub fn encode_coordinates(coords: &[Coord], separators: Separators) -> GeometryList {
    let mut flat = Flat::with_capacity(coords.len());
    flat.push_coords(coords);
    flat.into_list(separators)
}

fn encoded_len(parts: impl Iterator<Item = usize>) -> usize {
    let (count, total) = parts.fold((0usize, 0usize), |(n, sum), len| (n + 1, sum + len));
    total + count.saturating_sub(1)
}

struct Flat {
    x: Vec<f64>,
    y: Vec<f64>,
    values: Vec<f64>,
}

impl Flat {
    fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            values: Vec::with_capacity(n),
        }
    }

    fn push_separator(&mut self, value: f64) {
        self.x.push(value);
        self.y.push(value);
        self.values.push(value);
    }

    fn push_coords(&mut self, coords: &[Coord]) {
        for c in coords {
            self.x.push(c.x);
            self.y.push(c.y);
            self.values.push(c.value());
        }
    }

    fn push_polygon(&mut self, polygon: &Polygon, inner_outer: f64) {
        self.push_coords(polygon.exterior.coords());
        for hole in &polygon.interiors {
            self.push_separator(inner_outer);
            self.push_coords(hole.coords());
        }
    }

    fn into_list(self, separators: Separators) -> GeometryList {
        GeometryList::from_arrays(self.x, self.y, self.values, separators)
    }
}

// ── Decode ──────────────────────────────────────────────────────

/// Which ring of a decoded polygon an anomaly refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingRole {
    /// The exterior ring.
    Exterior,
    /// The hole at this index.
    Interior(usize),
}

impl fmt::Display for RingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exterior => f.write_str("exterior ring"),
            Self::Interior(i) => write!(f, "interior ring {i}"),
        }
    }
}

/// A structural oddity found while closing a decoded ring.
///
/// Anomalies are reported, never repaired: the ring is returned exactly as
/// decoding produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingAnomaly {
    /// The ring received no points; it is returned empty.
    Empty {
        /// Index of the polygon in the decoded output.
        polygon: usize,
        /// The ring.
        ring: RingRole,
    },
    /// After closing, the ring has fewer than four points.
    Degenerate {
        /// Index of the polygon in the decoded output.
        polygon: usize,
        /// The ring.
        ring: RingRole,
        /// Points after closing.
        points: usize,
    },
    /// The ring arrived with its last point equal to its first, so closing
    /// duplicated the closure.
    AlreadyClosed {
        /// Index of the polygon in the decoded output.
        polygon: usize,
        /// The ring.
        ring: RingRole,
    },
}

impl fmt::Display for RingAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { polygon, ring } => write!(f, "polygon {polygon}: {ring} is empty"),
            Self::Degenerate {
                polygon,
                ring,
                points,
            } => write!(f, "polygon {polygon}: {ring} has only {points} points after closing"),
            Self::AlreadyClosed { polygon, ring } => {
                write!(f, "polygon {polygon}: {ring} was already closed")
            }
        }
    }
}

/// Polygons decoded from a list, plus any ring anomalies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decoded {
    /// Decoded polygons, in stream order.
    pub polygons: Vec<Polygon>,
    /// Ring anomalies, in stream order.
    pub anomalies: Vec<RingAnomaly>,
}

/// Decode a list into polygons using the default separator tolerance.
///
/// Ring anomalies are logged at `warn` and otherwise ignored.
pub fn decode(list: &GeometryList) -> Vec<Polygon> {
    let decoded = decode_with_report(list, ExchangeConfig::DEFAULT_SEPARATOR_TOLERANCE);
    for anomaly in &decoded.anomalies {
        log::warn!("geometry list decode: {anomaly}");
    }
    decoded.polygons
}

/// Decode a list into polygons, reporting ring anomalies.
///
/// A coordinate whose x lies within `tolerance` of the list's inner/outer
/// separator starts a new hole; one within `tolerance` of the geometry
/// separator closes the current polygon. The inner/outer check comes first.
/// The end of the stream closes any pending polygon. Values and y
/// coordinates of separators are ignored; decoded points carry no `z`.
pub fn decode_with_report(list: &GeometryList, tolerance: f64) -> Decoded {
    let Separators {
        geometry,
        inner_outer,
    } = list.separators();
    let is = |x: f64, separator: f64| (x - separator).abs() < tolerance;

    let mut out = Decoded::default();
    let mut pending = Pending::default();
    let n = list.number_of_coordinates();

    for (i, (&x, &y)) in list.x().iter().zip(list.y()).enumerate() {
        let last = i + 1 == n;
        if is(x, inner_outer) {
            pending.start_hole();
        } else if is(x, geometry) {
            pending.close_into(&mut out);
            continue;
        } else {
            pending.push(Coord::new(x, y));
        }
        if last {
            pending.close_into(&mut out);
        }
    }

    log::debug!(
        "decoded {n} coordinate(s) into {} polygon(s), {} anomal{}",
        out.polygons.len(),
        out.anomalies.len(),
        if out.anomalies.len() == 1 { "y" } else { "ies" }
    );
    out
}

#[derive(Default)]
struct Pending {
    exterior: Vec<Coord>,
    interiors: SmallVec<[Vec<Coord>; 1]>,
}

impl Pending {
    fn start_hole(&mut self) {
        self.interiors.push(Vec::new());
    }

    fn push(&mut self, c: Coord) {
        match self.interiors.last_mut() {
            Some(hole) => hole.push(c),
            None => self.exterior.push(c),
        }
    }

    fn close_into(&mut self, out: &mut Decoded) {
        let polygon = out.polygons.len();
        let exterior = close_ring(
            std::mem::take(&mut self.exterior),
            polygon,
            RingRole::Exterior,
            &mut out.anomalies,
        );
        let interiors = std::mem::take(&mut self.interiors)
            .into_iter()
            .enumerate()
            .map(|(i, hole)| close_ring(hole, polygon, RingRole::Interior(i), &mut out.anomalies))
            .collect();
        out.polygons.push(Polygon {
            exterior,
            interiors,
        });
    }
}

fn close_ring(
    mut points: Vec<Coord>,
    polygon: usize,
    ring: RingRole,
    anomalies: &mut Vec<RingAnomaly>,
) -> LineString {
    let Some(&first) = points.first() else {
        anomalies.push(RingAnomaly::Empty { polygon, ring });
        return LineString(points);
    };
    if points.len() > 1 && points[points.len() - 1].same_position(&first) {
        anomalies.push(RingAnomaly::AlreadyClosed { polygon, ring });
    }
    points.push(first);
    if points.len() < 4 {
        anomalies.push(RingAnomaly::Degenerate {
            polygon,
            ring,
            points: points.len(),
        });
    }
    LineString(points)
}
