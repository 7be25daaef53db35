//! Read-only 2D topology shared by unstructured meshes and curvilinear grids.

/// Node coordinates and edge/cell connectivity of a 2D mesh.
///
/// Indices follow the engine's numbering. Out-of-range indices panic.
pub trait ReadOnlyMesh2D {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// x coordinate of `node`.
    fn node_x(&self, node: usize) -> f64;

    /// y coordinate of `node`.
    fn node_y(&self, node: usize) -> f64;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// Start node of `edge`.
    fn first_node(&self, edge: usize) -> i32;

    /// End node of `edge`.
    fn last_node(&self, edge: usize) -> i32;

    /// Number of cells (faces).
    fn cell_count(&self) -> usize;

    /// Number of edges bounding `cell`.
    fn cell_edge_count(&self, cell: usize) -> usize;
}
