//! Mesh projections: 2D meshes, 1D meshes, curvilinear grids and contacts.

/// A 2D unstructured mesh.
///
/// Edge arrays with two entries per edge (`edge_nodes`, `edge_faces`) hold
/// `2 * num_edges` values. `face_nodes` and `face_edges` hold
/// `num_face_nodes` values, partitioned by `nodes_per_face`.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Mesh2DNative {
    /// Left and right face of each edge.
    pub edge_faces: *mut i32,
    /// Start and end node of each edge.
    pub edge_nodes: *mut i32,
    /// Edges of each face, concatenated.
    pub face_edges: *mut i32,
    /// Nodes of each face, concatenated.
    pub face_nodes: *mut i32,
    /// Node count of each face.
    pub nodes_per_face: *mut i32,
    /// Node x coordinates.
    pub node_x: *mut f64,
    /// Node y coordinates.
    pub node_y: *mut f64,
    /// Edge midpoint x coordinates.
    pub edge_x: *mut f64,
    /// Edge midpoint y coordinates.
    pub edge_y: *mut f64,
    /// Face mass-centre x coordinates.
    pub face_x: *mut f64,
    /// Face mass-centre y coordinates.
    pub face_y: *mut f64,
    /// Allocated node count.
    pub num_nodes: i32,
    /// Meaningful node count.
    pub num_valid_nodes: i32,
    /// Allocated edge count.
    pub num_edges: i32,
    /// Meaningful edge count.
    pub num_valid_edges: i32,
    /// Face count.
    pub num_faces: i32,
    /// Total length of `face_nodes`.
    pub num_face_nodes: i32,
}

null_default!(Mesh2DNative {
    edge_faces, edge_nodes, face_edges, face_nodes, nodes_per_face,
    node_x, node_y, edge_x, edge_y, face_x, face_y;
    num_nodes, num_valid_nodes, num_edges, num_valid_edges, num_faces, num_face_nodes
});

/// A 1D network mesh.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Mesh1DNative {
    /// Start and end node of each edge (`2 * num_edges` values).
    pub edge_nodes: *mut i32,
    /// Node x coordinates.
    pub node_x: *mut f64,
    /// Node y coordinates.
    pub node_y: *mut f64,
    /// Allocated node count.
    pub num_nodes: i32,
    /// Meaningful node count.
    pub num_valid_nodes: i32,
    /// Allocated edge count.
    pub num_edges: i32,
    /// Meaningful edge count.
    pub num_valid_edges: i32,
}

null_default!(Mesh1DNative {
    edge_nodes, node_x, node_y;
    num_nodes, num_valid_nodes, num_edges, num_valid_edges
});

/// A structured curvilinear grid of `num_m * num_n` nodes.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct CurvilinearGridNative {
    /// Node x coordinates, row-major.
    pub node_x: *mut f64,
    /// Node y coordinates, row-major.
    pub node_y: *mut f64,
    /// Nodes per row.
    pub num_m: i32,
    /// Number of rows.
    pub num_n: i32,
}

null_default!(CurvilinearGridNative { node_x, node_y; num_m, num_n });

/// Contacts between a 1D and a 2D mesh.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct ContactsNative {
    /// 1D node index of each contact.
    pub mesh1d_indices: *mut i32,
    /// 2D face index of each contact.
    pub mesh2d_indices: *mut i32,
    /// Number of contacts.
    pub num_contacts: i32,
}

null_default!(ContactsNative { mesh1d_indices, mesh2d_indices; num_contacts });

#[cfg(all(test, target_pointer_width = "64"))]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn mesh2d_counts_follow_the_pointers() {
        assert_eq!(offset_of!(Mesh2DNative, face_y), 10 * 8);
        assert_eq!(offset_of!(Mesh2DNative, num_nodes), 11 * 8);
        assert_eq!(offset_of!(Mesh2DNative, num_face_nodes), 11 * 8 + 5 * 4);
        assert_eq!(size_of::<Mesh2DNative>(), 11 * 8 + 6 * 4);
    }

    #[test]
    fn small_projections_are_packed() {
        assert_eq!(size_of::<Mesh1DNative>(), 3 * 8 + 4 * 4);
        assert_eq!(size_of::<CurvilinearGridNative>(), 2 * 8 + 2 * 4);
        assert_eq!(size_of::<ContactsNative>(), 2 * 8 + 8);
    }

    #[test]
    fn defaults_are_null_and_zero() {
        let m = Mesh2DNative::default();
        assert!(m.edge_nodes.is_null());
        assert!(m.face_y.is_null());
        assert_eq!(m.num_valid_edges, 0);
        let c = ContactsNative::default();
        assert!(c.mesh2d_indices.is_null());
        assert_eq!(c.num_contacts, 0);
    }
}
