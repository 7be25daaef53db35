//! Structured curvilinear grids.

use smallvec::smallvec;

use meshbridge_native::copy::{copy_values, to_count, to_len};
use meshbridge_native::CurvilinearGridNative;
use meshbridge_pin::{ArrayField, ArrayFields, PinKey, PinRegistry, Pinnable};

use crate::topology::ReadOnlyMesh2D;

const NODE_X: PinKey = PinKey(0);
const NODE_Y: PinKey = PinKey(1);

/// A grid of `num_n` rows of `num_m` nodes, stored row-major.
///
/// Edges are numbered the way the engine converts a grid to nodes and
/// edges: first the `num_m * (num_n - 1)` column-oriented edges (edge `e`
/// joins nodes `e` and `e + num_m`), then the row-oriented edges, row by
/// row.
#[derive(Clone, Debug, Default)]
pub struct CurvilinearGrid {
    node_x: Vec<f64>,
    node_y: Vec<f64>,
    num_m: usize,
    num_n: usize,
    pins: PinRegistry,
}

impl CurvilinearGrid {
    /// A zero-filled grid of `num_n` rows by `num_m` columns.
    pub fn new(num_n: usize, num_m: usize) -> Self {
        Self {
            node_x: vec![0.0; num_m * num_n],
            node_y: vec![0.0; num_m * num_n],
            num_m,
            num_n,
            pins: PinRegistry::new(),
        }
    }

    /// A grid over the given coordinates.
    ///
    /// # Panics
    ///
    /// Panics unless both arrays hold `num_m * num_n` values.
    pub fn from_nodes(num_n: usize, num_m: usize, node_x: Vec<f64>, node_y: Vec<f64>) -> Self {
        let nodes = num_m * num_n;
        assert!(
            node_x.len() == nodes && node_y.len() == nodes,
            "a {num_n}x{num_m} grid needs {nodes} coordinates, got {} and {}",
            node_x.len(),
            node_y.len()
        );
        Self {
            node_x,
            node_y,
            num_m,
            num_n,
            pins: PinRegistry::new(),
        }
    }

    /// Read a grid the engine filled.
    ///
    /// # Safety
    ///
    /// Non-null coordinate pointers must be valid for `num_m * num_n` reads.
    #[allow(unsafe_code)]
    pub unsafe fn from_native(native: &CurvilinearGridNative) -> Self {
        let num_m = to_len(native.num_m);
        let num_n = to_len(native.num_n);
        let nodes = num_m * num_n;
        // SAFETY: forwarded caller contract.
        let (mut x, mut y) = unsafe {
            (
                copy_values(native.node_x, nodes),
                copy_values(native.node_y, nodes),
            )
        };
        x.resize(nodes, 0.0);
        y.resize(nodes, 0.0);
        Self::from_nodes(num_n, num_m, x, y)
    }

    /// Nodes per row.
    pub fn num_m(&self) -> usize {
        self.num_m
    }

    /// Number of rows.
    pub fn num_n(&self) -> usize {
        self.num_n
    }

    /// Node x coordinates, row-major.
    pub fn nodes_x(&self) -> &[f64] {
        &self.node_x
    }

    /// Node y coordinates, row-major.
    pub fn nodes_y(&self) -> &[f64] {
        &self.node_y
    }

    fn column_edges(&self) -> usize {
        self.num_m * self.num_n.saturating_sub(1)
    }

    fn edge_nodes(&self, edge: usize) -> (usize, usize) {
        assert!(
            edge < self.edge_count(),
            "edge {edge} out of range for {} edges",
            self.edge_count()
        );
        let column_edges = self.column_edges();
        if edge < column_edges {
            return (edge, edge + self.num_m);
        }
        let e = edge - column_edges;
        let per_row = self.num_m - 1;
        let first = (e / per_row) * self.num_m + e % per_row;
        (first, first + 1)
    }
}

impl Pinnable for CurvilinearGrid {
    type Native = CurvilinearGridNative;

    fn array_fields(&mut self) -> ArrayFields<'_> {
        smallvec![
            (NODE_X, ArrayField::numeric(&mut self.node_x)),
            (NODE_Y, ArrayField::numeric(&mut self.node_y)),
        ]
    }

    fn pins(&self) -> &PinRegistry {
        &self.pins
    }

    fn pins_mut(&mut self) -> &mut PinRegistry {
        &mut self.pins
    }

    fn project(&self) -> CurvilinearGridNative {
        CurvilinearGridNative {
            node_x: self.pins.ptr(NODE_X),
            node_y: self.pins.ptr(NODE_Y),
            num_m: to_count(self.num_m, "grid columns"),
            num_n: to_count(self.num_n, "grid rows"),
        }
    }
}

impl ReadOnlyMesh2D for CurvilinearGrid {
    fn node_count(&self) -> usize {
        self.num_m * self.num_n
    }

    fn node_x(&self, node: usize) -> f64 {
        self.node_x[node]
    }

    fn node_y(&self, node: usize) -> f64 {
        self.node_y[node]
    }

    fn edge_count(&self) -> usize {
        self.num_m.saturating_sub(1) * self.num_n + self.column_edges()
    }

    fn first_node(&self, edge: usize) -> i32 {
        to_count(self.edge_nodes(edge).0, "node index")
    }

    fn last_node(&self, edge: usize) -> i32 {
        to_count(self.edge_nodes(edge).1, "node index")
    }

    fn cell_count(&self) -> usize {
        self.num_m.saturating_sub(1) * self.num_n.saturating_sub(1)
    }

    fn cell_edge_count(&self, _cell: usize) -> usize {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3 nodes per row, 2 rows:
    ///
    /// ```text
    /// 3 - 4 - 5
    /// |   |   |
    /// 0 - 1 - 2
    /// ```
    fn three_by_two() -> CurvilinearGrid {
        CurvilinearGrid::from_nodes(
            2,
            3,
            vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        )
    }

    #[test]
    fn counts() {
        let g = three_by_two();
        assert_eq!(g.node_count(), 6);
        assert_eq!(g.edge_count(), 7);
        assert_eq!(g.cell_count(), 2);
        assert_eq!(g.cell_edge_count(1), 4);
    }

    #[test]
    fn column_edges_come_first() {
        let g = three_by_two();
        assert_eq!((g.first_node(0), g.last_node(0)), (0, 3));
        assert_eq!((g.first_node(2), g.last_node(2)), (2, 5));
    }

    #[test]
    fn row_edges_follow_row_major() {
        let g = three_by_two();
        assert_eq!((g.first_node(3), g.last_node(3)), (0, 1));
        assert_eq!((g.first_node(4), g.last_node(4)), (1, 2));
        assert_eq!((g.first_node(5), g.last_node(5)), (3, 4));
        assert_eq!((g.first_node(6), g.last_node(6)), (4, 5));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn edge_past_the_end_panics() {
        three_by_two().first_node(7);
    }

    #[test]
    fn projection_dimensions() {
        let mut g = three_by_two();
        let view = g.create_native_view();
        assert_eq!((view.num_m, view.num_n), (3, 2));
        drop(view);
        g.unpin();
    }
}
