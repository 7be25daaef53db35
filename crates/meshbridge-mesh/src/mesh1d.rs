//! 1D network meshes.

use smallvec::smallvec;

use meshbridge_native::copy::{copy_values, to_count, to_len};
use meshbridge_native::Mesh1DNative;
use meshbridge_pin::{ArrayField, ArrayFields, PinKey, PinRegistry, Pinnable};

use crate::error::{require_len, MeshError};

const EDGE_NODES: PinKey = PinKey(0);
const NODE_X: PinKey = PinKey(1);
const NODE_Y: PinKey = PinKey(2);

/// A 1D mesh: nodes and two-node edges, with valid counts.
#[derive(Clone, Debug, Default)]
pub struct Mesh1D {
    edge_nodes: Vec<i32>,
    node_x: Vec<f64>,
    node_y: Vec<f64>,
    num_nodes: usize,
    num_valid_nodes: usize,
    num_edges: usize,
    num_valid_edges: usize,
    pins: PinRegistry,
}

impl Mesh1D {
    /// A zero-filled mesh sized for the given counts, all of them valid.
    pub fn new(nodes: usize, edges: usize) -> Self {
        Self {
            edge_nodes: vec![0; edges * 2],
            node_x: vec![0.0; nodes],
            node_y: vec![0.0; nodes],
            num_nodes: nodes,
            num_valid_nodes: nodes,
            num_edges: edges,
            num_valid_edges: edges,
            pins: PinRegistry::new(),
        }
    }

    /// A mesh over the given nodes and edges.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate arrays differ in length or `edge_nodes` has
    /// odd length.
    pub fn from_parts(node_x: Vec<f64>, node_y: Vec<f64>, edge_nodes: Vec<i32>) -> Self {
        assert_eq!(
            node_x.len(),
            node_y.len(),
            "node coordinate arrays differ in length"
        );
        assert!(
            edge_nodes.len() % 2 == 0,
            "edge_nodes holds {} indices, expected two per edge",
            edge_nodes.len()
        );
        let nodes = node_x.len();
        let edges = edge_nodes.len() / 2;
        Self {
            edge_nodes,
            node_x,
            node_y,
            num_nodes: nodes,
            num_valid_nodes: nodes,
            num_edges: edges,
            num_valid_edges: edges,
            pins: PinRegistry::new(),
        }
    }

    /// Read a mesh the engine filled.
    ///
    /// # Safety
    ///
    /// Non-null pointers in `native` must be valid for `num_nodes` node
    /// coordinates and `2 * num_edges` edge indices.
    #[allow(unsafe_code)]
    pub unsafe fn from_native(native: &Mesh1DNative) -> Self {
        let nodes = to_len(native.num_nodes);
        let edges = to_len(native.num_edges);
        // SAFETY: forwarded caller contract.
        let (mut node_x, mut node_y, mut edge_nodes) = unsafe {
            (
                copy_values(native.node_x, nodes),
                copy_values(native.node_y, nodes),
                copy_values(native.edge_nodes, edges * 2),
            )
        };
        node_x.resize(nodes, 0.0);
        node_y.resize(nodes, 0.0);
        edge_nodes.resize(edges * 2, 0);
        let mut mesh = Self::from_parts(node_x, node_y, edge_nodes);
        mesh.num_valid_nodes = to_len(native.num_valid_nodes).min(nodes);
        mesh.num_valid_edges = to_len(native.num_valid_edges).min(edges);
        mesh
    }

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

    /// Set the meaningful counts. Checked by [`validate`](Self::validate).
    pub fn set_valid_counts(&mut self, nodes: usize, edges: usize) {
        self.num_valid_nodes = nodes;
        self.num_valid_edges = edges;
    }

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
        require_len("edge_nodes", &self.edge_nodes, self.num_edges * 2)
    }
}

impl Pinnable for Mesh1D {
    type Native = Mesh1DNative;

    fn array_fields(&mut self) -> ArrayFields<'_> {
        smallvec![
            (EDGE_NODES, ArrayField::numeric(&mut self.edge_nodes)),
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

    fn project(&self) -> Mesh1DNative {
        Mesh1DNative {
            edge_nodes: self.pins.ptr(EDGE_NODES),
            node_x: self.pins.ptr(NODE_X),
            node_y: self.pins.ptr(NODE_Y),
            num_nodes: to_count(self.num_nodes, "nodes"),
            num_valid_nodes: to_count(self.num_valid_nodes, "valid nodes"),
            num_edges: to_count(self.num_edges, "edges"),
            num_valid_edges: to_count(self.num_valid_edges, "valid edges"),
        }
    }
}
