//! Reusable geometries and meshes.
//!
//! - [`square_with_hole`]: unit square with one triangular hole.
//! - [`regular_ring`]: an open ring of `n` points on a circle.
//! - [`unit_square_mesh`]: 4 nodes, 4 edges, 1 quadrilateral face.
//! - [`quad_mesh`]: an `n x n` block of unit quadrilaterals.
//! - [`polyline_mesh1d`]: three nodes, two edges.
//! - [`small_grid`]: a 3x2 curvilinear grid.
//! - [`sample_contacts`]: three 1D/2D contact pairs.

use meshbridge_geometry::{LineString, Polygon};
use meshbridge_mesh::{Contacts, CurvilinearGrid, Mesh1D, Mesh2D};

/// Square `(0,0),(1,0),(1,1),(0,1)` with hole `(0.2,0.2),(0.4,0.2),(0.2,0.4)`.
/// Rings are open.
pub fn square_with_hole() -> Polygon {
    let exterior: LineString = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        .into_iter()
        .collect();
    let hole: LineString = [(0.2, 0.2), (0.4, 0.2), (0.2, 0.4)].into_iter().collect();
    Polygon::new(exterior, [hole])
}

/// `n` points evenly spaced on a circle of `radius` around `(cx, cy)`.
pub fn regular_ring(n: usize, cx: f64, cy: f64, radius: f64) -> LineString {
    (0..n)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / n as f64;
            (cx + radius * a.cos(), cy + radius * a.sin())
        })
        .collect()
}

/// Unit square mesh: nodes counter-clockwise from the origin, edges around
/// the boundary, one face of four nodes.
pub fn unit_square_mesh() -> Mesh2D {
    let mut mesh = Mesh2D::from_nodes_and_edges(
        vec![0.0, 1.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0, 1.0],
        vec![0, 1, 1, 2, 2, 3, 3, 0],
    );
    mesh.set_faces(vec![4], vec![0, 1, 2, 3]);
    mesh
}

/// An `n x n` block of unit quadrilaterals: `(n+1)^2` nodes in row-major
/// order, horizontal edges first, then vertical edges.
pub fn quad_mesh(n: usize) -> Mesh2D {
    let side = n + 1;
    let mut node_x = Vec::with_capacity(side * side);
    let mut node_y = Vec::with_capacity(side * side);
    for row in 0..side {
        for col in 0..side {
            node_x.push(col as f64);
            node_y.push(row as f64);
        }
    }
    let id = |row: usize, col: usize| (row * side + col) as i32;
    let mut edge_nodes = Vec::new();
    for row in 0..side {
        for col in 0..n {
            edge_nodes.extend([id(row, col), id(row, col + 1)]);
        }
    }
    for row in 0..n {
        for col in 0..side {
            edge_nodes.extend([id(row, col), id(row + 1, col)]);
        }
    }
    let mut face_nodes = Vec::with_capacity(n * n * 4);
    for row in 0..n {
        for col in 0..n {
            face_nodes.extend([
                id(row, col),
                id(row, col + 1),
                id(row + 1, col + 1),
                id(row + 1, col),
            ]);
        }
    }
    let mut mesh = Mesh2D::from_nodes_and_edges(node_x, node_y, edge_nodes);
    mesh.set_faces(vec![4; n * n], face_nodes);
    mesh
}

/// A 1D mesh of three collinear nodes joined by two edges.
pub fn polyline_mesh1d() -> Mesh1D {
    Mesh1D::from_parts(vec![0.0, 1.0, 2.0], vec![0.5, 0.5, 0.5], vec![0, 1, 1, 2])
}

/// 3 nodes per row, 2 rows, unit spacing.
pub fn small_grid() -> CurvilinearGrid {
    CurvilinearGrid::from_nodes(
        2,
        3,
        vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0],
        vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
    )
}

pub fn sample_contacts() -> Contacts {
    Contacts::from_pairs(vec![0, 1, 2], vec![3, 0, 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_mesh_is_consistent() {
        let mesh = quad_mesh(3);
        assert_eq!(mesh.num_nodes(), 16);
        assert_eq!(mesh.num_edges(), 24);
        assert_eq!(mesh.num_faces(), 9);
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn fixtures_have_expected_shapes() {
        assert_eq!(square_with_hole().point_count(), 7);
        assert_eq!(regular_ring(6, 0.0, 0.0, 1.0).len(), 6);
        assert_eq!(unit_square_mesh().validate(), Ok(()));
        assert_eq!(small_grid().nodes_x().len(), 6);
        assert_eq!(sample_contacts().len(), 3);
        assert_eq!(polyline_mesh1d().num_edges(), 2);
    }
}
