//! The resizable 2D mesh buffer.
//!
//! Arrays are grouped by the count that sizes them:
//!
//! | count            | arrays                                   | per entity |
//! |------------------|------------------------------------------|-----------|
//! | `num_nodes`      | `node_x`, `node_y`                       | 1         |
//! | `num_edges`      | `edge_nodes`, `edge_faces`               | 2         |
//! | `num_edges`      | `edge_x`, `edge_y`                       | 1         |
//! | `num_faces`      | `nodes_per_face`, `face_x`, `face_y`     | 1         |
//! | `num_face_nodes` | `face_nodes`, `face_edges`               | 1         |
//!
//! [`Mesh2D::resize`] grows each group independently and never shrinks.

use smallvec::smallvec;

use meshbridge_native::copy::{copy_values, to_count, to_len};
use meshbridge_native::Mesh2DNative;
use meshbridge_pin::{ArrayField, ArrayFields, PinKey, PinRegistry, Pinnable};

use crate::error::{require_len, MeshError};
use crate::topology::ReadOnlyMesh2D;

const EDGE_FACES: PinKey = PinKey(0);
const EDGE_NODES: PinKey = PinKey(1);
const FACE_EDGES: PinKey = PinKey(2);
const FACE_NODES: PinKey = PinKey(3);
const NODES_PER_FACE: PinKey = PinKey(4);
const NODE_X: PinKey = PinKey(5);
const NODE_Y: PinKey = PinKey(6);
const EDGE_X: PinKey = PinKey(7);
const EDGE_Y: PinKey = PinKey(8);
const FACE_X: PinKey = PinKey(9);
const FACE_Y: PinKey = PinKey(10);

/// Whether [`Mesh2D::from_native`] reads face arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceData {
    /// Keep only nodes and edges; the result has no faces.
    Omit,
    /// Also read faces, sizing the face-node arrays from `nodes_per_face`.
    Include,
}

/// A 2D unstructured mesh: nodes, edges and optional faces.
///
/// Allocated counts size the arrays; valid counts say how many nodes and
/// edges are meaningful (`valid <= allocated`).
#[derive(Clone, Debug, Default)]
pub struct Mesh2D {
    edge_faces: Vec<i32>,
    edge_nodes: Vec<i32>,
    face_edges: Vec<i32>,
    face_nodes: Vec<i32>,
    nodes_per_face: Vec<i32>,
    node_x: Vec<f64>,
    node_y: Vec<f64>,
    edge_x: Vec<f64>,
    edge_y: Vec<f64>,
    face_x: Vec<f64>,
    face_y: Vec<f64>,
    num_nodes: usize,
    num_valid_nodes: usize,
    num_edges: usize,
    num_valid_edges: usize,
    num_faces: usize,
    num_face_nodes: usize,
    pins: PinRegistry,
}

impl Mesh2D {
    /// An empty mesh.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A zero-filled mesh sized for the given counts, all of them valid.
    pub fn new(nodes: usize, edges: usize, faces: usize, face_nodes: usize) -> Self {
        Self {
            edge_faces: vec![0; edges * 2],
            edge_nodes: vec![0; edges * 2],
            face_edges: vec![0; face_nodes],
            face_nodes: vec![0; face_nodes],
            nodes_per_face: vec![0; faces],
            node_x: vec![0.0; nodes],
            node_y: vec![0.0; nodes],
            edge_x: vec![0.0; edges],
            edge_y: vec![0.0; edges],
            face_x: vec![0.0; faces],
            face_y: vec![0.0; faces],
            num_nodes: nodes,
            num_valid_nodes: nodes,
            num_edges: edges,
            num_valid_edges: edges,
            num_faces: faces,
            num_face_nodes: face_nodes,
            pins: PinRegistry::new(),
        }
    }

    /// A mesh of nodes and edges only.
    ///
    /// `edge_nodes` holds two node indices per edge.
    ///
    /// # Panics
    ///
    /// Panics if `node_x` and `node_y` differ in length or `edge_nodes` has
    /// odd length.
    pub fn from_nodes_and_edges(node_x: Vec<f64>, node_y: Vec<f64>, edge_nodes: Vec<i32>) -> Self {
        let mut mesh = Self::empty();
        mesh.set_nodes(node_x, node_y);
        mesh.set_edges(edge_nodes);
        mesh
    }

    /// Read a mesh the engine filled.
    ///
    /// Node arrays are read for `num_nodes` entries and edge arrays for
    /// `num_edges` (two per edge where applicable). With
    /// [`FaceData::Include`] and `num_faces > 0`, `face_nodes` and
    /// `face_edges` are read for `sum(nodes_per_face)` entries, which
    /// becomes the face-node count.
    ///
    /// # Panics
    ///
    /// Panics if `sum(nodes_per_face)` differs from `num_face_nodes`, before
    /// either face list is read.
    ///
    /// # Safety
    ///
    /// Every non-null pointer in `native` must be valid for reads of the
    /// length described above, with the face lists valid for
    /// `num_face_nodes` entries.
    #[allow(unsafe_code)]
    pub unsafe fn from_native(native: &Mesh2DNative, faces: FaceData) -> Self {
        let nodes = to_len(native.num_nodes);
        let edges = to_len(native.num_edges);
        let mut mesh = Self::new(nodes, edges, 0, 0);
        // SAFETY: forwarded caller contract for node and edge arrays.
        unsafe {
            overwrite(&mut mesh.node_x, copy_values(native.node_x, nodes));
            overwrite(&mut mesh.node_y, copy_values(native.node_y, nodes));
            overwrite(&mut mesh.edge_nodes, copy_values(native.edge_nodes, edges * 2));
            overwrite(&mut mesh.edge_faces, copy_values(native.edge_faces, edges * 2));
            overwrite(&mut mesh.edge_x, copy_values(native.edge_x, edges));
            overwrite(&mut mesh.edge_y, copy_values(native.edge_y, edges));
        }
        mesh.num_valid_nodes = to_len(native.num_valid_nodes).min(nodes);
        mesh.num_valid_edges = to_len(native.num_valid_edges).min(edges);

        let num_faces = to_len(native.num_faces);
        if faces == FaceData::Include && num_faces > 0 {
            // SAFETY: forwarded caller contract for face arrays.
            let nodes_per_face = unsafe { copy_values(native.nodes_per_face, num_faces) };
            let face_nodes: usize = nodes_per_face.iter().map(|&n| to_len(n)).sum();
            assert_eq!(
                face_nodes,
                to_len(native.num_face_nodes),
                "engine face lists are inconsistent: sum(nodes_per_face) {face_nodes} != num_face_nodes {}",
                native.num_face_nodes
            );
            mesh.nodes_per_face = vec![0; num_faces];
            mesh.face_x = vec![0.0; num_faces];
            mesh.face_y = vec![0.0; num_faces];
            mesh.face_nodes = vec![0; face_nodes];
            mesh.face_edges = vec![0; face_nodes];
            overwrite(&mut mesh.nodes_per_face, nodes_per_face);
            // SAFETY: as above; `face_nodes` equals `num_face_nodes`.
            unsafe {
                overwrite(&mut mesh.face_x, copy_values(native.face_x, num_faces));
                overwrite(&mut mesh.face_y, copy_values(native.face_y, num_faces));
                overwrite(&mut mesh.face_nodes, copy_values(native.face_nodes, face_nodes));
                overwrite(&mut mesh.face_edges, copy_values(native.face_edges, face_nodes));
            }
            mesh.num_faces = num_faces;
            mesh.num_face_nodes = face_nodes;
        }
        mesh
    }

    // ── Counts ──────────────────────────────────────────────────

    /// Allocated node count.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Meaningful node count.
    pub fn num_valid_nodes(&self) -> usize {
        self.num_valid_nodes
    }

    /// Allocated edge count.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Meaningful edge count.
    pub fn num_valid_edges(&self) -> usize {
        self.num_valid_edges
    }

    /// Face count.
    pub fn num_faces(&self) -> usize {
        self.num_faces
    }

    /// Length of the concatenated face-node list.
    pub fn num_face_nodes(&self) -> usize {
        self.num_face_nodes
    }

    /// Set the meaningful node count. Checked by [`validate`](Self::validate).
    pub fn set_num_valid_nodes(&mut self, n: usize) {
        self.num_valid_nodes = n;
    }

    /// Set the meaningful edge count. Checked by [`validate`](Self::validate).
    pub fn set_num_valid_edges(&mut self, n: usize) {
        self.num_valid_edges = n;
    }

    /// `sum(nodes_per_face)` over the declared faces.
    pub fn face_node_sum(&self) -> usize {
        self.nodes_per_face
            .iter()
            .take(self.num_faces)
            .map(|&n| to_len(n))
            .sum()
    }

    // ── Arrays ──────────────────────────────────────────────────

    /// Node x coordinates.
    pub fn nodes_x(&self) -> &[f64] {
        &self.node_x
    }

    /// Node y coordinates.
    pub fn nodes_y(&self) -> &[f64] {
        &self.node_y
    }

    /// Two node indices per edge.
    pub fn edge_nodes(&self) -> &[i32] {
        &self.edge_nodes
    }

    /// Two face indices per edge.
    pub fn edge_faces(&self) -> &[i32] {
        &self.edge_faces
    }

    /// Edge midpoint x coordinates.
    pub fn edges_x(&self) -> &[f64] {
        &self.edge_x
    }

    /// Edge midpoint y coordinates.
    pub fn edges_y(&self) -> &[f64] {
        &self.edge_y
    }

    /// Node count of each face.
    pub fn nodes_per_face(&self) -> &[i32] {
        &self.nodes_per_face
    }

    /// Nodes of each face, concatenated.
    pub fn face_nodes(&self) -> &[i32] {
        &self.face_nodes
    }

    /// Edges of each face, concatenated.
    pub fn face_edges(&self) -> &[i32] {
        &self.face_edges
    }

    /// Face mass-centre x coordinates.
    pub fn faces_x(&self) -> &[f64] {
        &self.face_x
    }

    /// Face mass-centre y coordinates.
    pub fn faces_y(&self) -> &[f64] {
        &self.face_y
    }

    /// Mutable node coordinates, for filling a pre-sized mesh in place.
    ///
    /// The arrays keep their addresses, so existing pins stay valid.
    pub fn nodes_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (self.node_x.as_mut_slice(), self.node_y.as_mut_slice())
    }

    /// Mutable edge node indices. Existing pins stay valid.
    pub fn edge_nodes_mut(&mut self) -> &mut [i32] {
        &mut self.edge_nodes
    }

    /// Replace the nodes. All of them become valid. Releases any pins first.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate arrays differ in length.
    pub fn set_nodes(&mut self, node_x: Vec<f64>, node_y: Vec<f64>) {
        assert_eq!(
            node_x.len(),
            node_y.len(),
            "node coordinate arrays differ in length"
        );
        self.unpin();
        self.num_nodes = node_x.len();
        self.num_valid_nodes = node_x.len();
        self.node_x = node_x;
        self.node_y = node_y;
    }

    /// Replace the edges; per-edge arrays are reset to zero. All edges
    /// become valid. Releases any pins first.
    ///
    /// # Panics
    ///
    /// Panics if `edge_nodes` has odd length.
    pub fn set_edges(&mut self, edge_nodes: Vec<i32>) {
        assert!(
            edge_nodes.len() % 2 == 0,
            "edge_nodes holds {} indices, expected two per edge",
            edge_nodes.len()
        );
        self.unpin();
        let edges = edge_nodes.len() / 2;
        self.edge_nodes = edge_nodes;
        self.edge_faces = vec![0; edges * 2];
        self.edge_x = vec![0.0; edges];
        self.edge_y = vec![0.0; edges];
        self.num_edges = edges;
        self.num_valid_edges = edges;
    }

    /// Replace the faces; face coordinates and face edges are reset to
    /// zero. Releases any pins first.
    pub fn set_faces(&mut self, nodes_per_face: Vec<i32>, face_nodes: Vec<i32>) {
        self.unpin();
        let faces = nodes_per_face.len();
        self.num_faces = faces;
        self.num_face_nodes = face_nodes.len();
        self.face_edges = vec![0; face_nodes.len()];
        self.face_x = vec![0.0; faces];
        self.face_y = vec![0.0; faces];
        self.nodes_per_face = nodes_per_face;
        self.face_nodes = face_nodes;
    }

    // ── Resize ──────────────────────────────────────────────────

    /// Grow the buffers to hold at least the given counts.
    ///
    /// Each dimension is compared against its current allocated count and
    /// only grows. A smaller or equal count leaves that dimension untouched;
    /// this is not an error. If anything grows, the mesh is fully unpinned,
    /// each growing group is reallocated with its old contents copied to
    /// the prefix, and the mesh is pinned again. Valid counts are kept.
    ///
    /// Returns whether anything grew.
    pub fn resize(&mut self, nodes: usize, edges: usize, faces: usize, face_nodes: usize) -> bool {
        let grow_nodes = nodes > self.num_nodes;
        let grow_edges = edges > self.num_edges;
        let grow_faces = faces > self.num_faces;
        let grow_face_nodes = face_nodes > self.num_face_nodes;
        if !(grow_nodes || grow_edges || grow_faces || grow_face_nodes) {
            return false;
        }

        self.unpin();

        if grow_nodes {
            let old = self.num_nodes;
            grow(&mut self.node_x, old, nodes, 1);
            grow(&mut self.node_y, old, nodes, 1);
            self.num_nodes = nodes;
        }
        if grow_edges {
            let old = self.num_edges;
            grow(&mut self.edge_nodes, old, edges, 2);
            grow(&mut self.edge_faces, old, edges, 2);
            grow(&mut self.edge_x, old, edges, 1);
            grow(&mut self.edge_y, old, edges, 1);
            self.num_edges = edges;
        }
        if grow_faces {
            let old = self.num_faces;
            grow(&mut self.nodes_per_face, old, faces, 1);
            grow(&mut self.face_x, old, faces, 1);
            grow(&mut self.face_y, old, faces, 1);
            self.num_faces = faces;
        }
        if grow_face_nodes {
            let old = self.num_face_nodes;
            grow(&mut self.face_nodes, old, face_nodes, 1);
            grow(&mut self.face_edges, old, face_nodes, 1);
            self.num_face_nodes = face_nodes;
        }

        log::debug!(
            "mesh2d resized to {} nodes, {} edges, {} faces, {} face nodes \
             (grew nodes: {grow_nodes}, edges: {grow_edges}, faces: {grow_faces}, face nodes: {grow_face_nodes})",
            self.num_nodes,
            self.num_edges,
            self.num_faces,
            self.num_face_nodes
        );

        self.pin();
        true
    }

    // ── Validation ──────────────────────────────────────────────

    /// Check counts against each other and against the arrays.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.num_valid_nodes > self.num_nodes {
            return Err(MeshError::ValidExceedsAllocated {
                entity: "nodes",
                valid: self.num_valid_nodes,
                allocated: self.num_nodes,
            });
        }
        if self.num_valid_edges > self.num_edges {
            return Err(MeshError::ValidExceedsAllocated {
                entity: "edges",
                valid: self.num_valid_edges,
                allocated: self.num_edges,
            });
        }
        require_len("node_x", &self.node_x, self.num_nodes)?;
        require_len("node_y", &self.node_y, self.num_nodes)?;
        require_len("edge_nodes", &self.edge_nodes, self.num_edges * 2)?;
        require_len("edge_faces", &self.edge_faces, self.num_edges * 2)?;
        require_len("edge_x", &self.edge_x, self.num_edges)?;
        require_len("edge_y", &self.edge_y, self.num_edges)?;
        require_len("nodes_per_face", &self.nodes_per_face, self.num_faces)?;
        require_len("face_x", &self.face_x, self.num_faces)?;
        require_len("face_y", &self.face_y, self.num_faces)?;
        require_len("face_nodes", &self.face_nodes, self.num_face_nodes)?;
        require_len("face_edges", &self.face_edges, self.num_face_nodes)?;
        let sum = self.face_node_sum();
        if sum != self.num_face_nodes {
            return Err(MeshError::FaceNodeSumMismatch {
                sum,
                face_nodes: self.num_face_nodes,
            });
        }
        Ok(())
    }
}

/// Reallocate `values` to `new_count * per` elements, copying the first
/// `old_count * per` (bounded by the current length) into the prefix.
fn grow<T: Copy + Default>(values: &mut Vec<T>, old_count: usize, new_count: usize, per: usize) {
    let mut fresh = vec![T::default(); new_count * per];
    let keep = (old_count * per).min(values.len()).min(fresh.len());
    fresh[..keep].copy_from_slice(&values[..keep]);
    *values = fresh;
}

/// Copy engine data into a pre-sized array; a short copy leaves zeros.
fn overwrite<T: Copy>(dst: &mut [T], src: Vec<T>) {
    let n = src.len().min(dst.len());
    dst[..n].copy_from_slice(&src[..n]);
}

impl Pinnable for Mesh2D {
    type Native = Mesh2DNative;

    fn array_fields(&mut self) -> ArrayFields<'_> {
        smallvec![
            (EDGE_FACES, ArrayField::numeric(&mut self.edge_faces)),
            (EDGE_NODES, ArrayField::numeric(&mut self.edge_nodes)),
            (FACE_EDGES, ArrayField::numeric(&mut self.face_edges)),
            (FACE_NODES, ArrayField::numeric(&mut self.face_nodes)),
            (NODES_PER_FACE, ArrayField::numeric(&mut self.nodes_per_face)),
            (NODE_X, ArrayField::numeric(&mut self.node_x)),
            (NODE_Y, ArrayField::numeric(&mut self.node_y)),
            (EDGE_X, ArrayField::numeric(&mut self.edge_x)),
            (EDGE_Y, ArrayField::numeric(&mut self.edge_y)),
            (FACE_X, ArrayField::numeric(&mut self.face_x)),
            (FACE_Y, ArrayField::numeric(&mut self.face_y)),
        ]
    }

    fn pins(&self) -> &PinRegistry {
        &self.pins
    }

    fn pins_mut(&mut self) -> &mut PinRegistry {
        &mut self.pins
    }

    fn project(&self) -> Mesh2DNative {
        let p = &self.pins;
        Mesh2DNative {
            edge_faces: p.ptr(EDGE_FACES),
            edge_nodes: p.ptr(EDGE_NODES),
            face_edges: p.ptr(FACE_EDGES),
            face_nodes: p.ptr(FACE_NODES),
            nodes_per_face: p.ptr(NODES_PER_FACE),
            node_x: p.ptr(NODE_X),
            node_y: p.ptr(NODE_Y),
            edge_x: p.ptr(EDGE_X),
            edge_y: p.ptr(EDGE_Y),
            face_x: p.ptr(FACE_X),
            face_y: p.ptr(FACE_Y),
            num_nodes: to_count(self.num_nodes, "nodes"),
            num_valid_nodes: to_count(self.num_valid_nodes, "valid nodes"),
            num_edges: to_count(self.num_edges, "edges"),
            num_valid_edges: to_count(self.num_valid_edges, "valid edges"),
            num_faces: to_count(self.num_faces, "faces"),
            num_face_nodes: to_count(self.num_face_nodes, "face nodes"),
        }
    }
}

impl ReadOnlyMesh2D for Mesh2D {
    fn node_count(&self) -> usize {
        self.num_nodes
    }

    fn node_x(&self, node: usize) -> f64 {
        self.node_x[node]
    }

    fn node_y(&self, node: usize) -> f64 {
        self.node_y[node]
    }

    fn edge_count(&self) -> usize {
        self.num_edges
    }

    fn first_node(&self, edge: usize) -> i32 {
        self.edge_nodes[2 * edge]
    }

    fn last_node(&self, edge: usize) -> i32 {
        self.edge_nodes[2 * edge + 1]
    }

    fn cell_count(&self) -> usize {
        self.num_faces
    }

    fn cell_edge_count(&self, cell: usize) -> usize {
        to_len(self.nodes_per_face[cell])
    }
}
