//! An in-process engine for exchange tests.

use std::collections::HashMap;
use std::ffi::c_char;
use std::sync::{Mutex, MutexGuard, PoisonError};

use meshbridge_core::{text, ExitCategory, Separators, StateId};
use meshbridge_geometry::GeometryList;
use meshbridge_kernel::{NativeKernel, ERROR_MESSAGE_LEN, STATUS_OK, VERSION_LEN};
use meshbridge_mesh::{Contacts, CurvilinearGrid, FaceData, Mesh1D, Mesh2D};
use meshbridge_native::copy::{to_count, to_len};
use meshbridge_native::{
    ContactsNative, CurvilinearGridNative, GeometryListNative, Mesh1DNative, Mesh2DNative,
};

/// Everything the mock holds for one state.
#[derive(Default)]
struct StateData {
    mesh2d: Mesh2D,
    mesh1d: Mesh1D,
    grid: CurvilinearGrid,
    contacts: Contacts,
}

struct Inner {
    separators: Separators,
    version: String,
    last_error: String,
    states: HashMap<StateId, StateData>,
    next_state: i32,
    failure: Option<(&'static str, ExitCategory, String)>,
    calls: Vec<&'static str>,
}

/// Mock implementation of [`NativeKernel`].
///
/// States are created with [`new_state`](Self::new_state) and pre-populated
/// with the `set_*` methods. Exit codes are the position of each category
/// in [`ExitCategory::ALL`], so success is 0. Calls naming an unknown state
/// fail with [`ExitCategory::MeshKernelError`].
///
/// [`fail_call`](Self::fail_call) makes the next call of one entry point
/// fail with a chosen category and message, for exercising error paths.
/// Text buffers are written at their full engine lengths,
/// [`ERROR_MESSAGE_LEN`] and [`VERSION_LEN`].
pub struct MockKernel {
    inner: Mutex<Inner>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self::with_separators(Separators::default())
    }

    /// A mock reporting `separators` from its separator queries.
    pub fn with_separators(separators: Separators) -> Self {
        Self {
            inner: Mutex::new(Inner {
                separators,
                version: "2.1.0-mock".to_string(),
                last_error: String::new(),
                states: HashMap::new(),
                next_state: 0,
                failure: None,
                calls: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate an empty state.
    pub fn new_state(&self) -> StateId {
        let mut inner = self.lock();
        let id = StateId(inner.next_state);
        inner.next_state += 1;
        inner.states.insert(id, StateData::default());
        id
    }

    /// The status code the mock uses for `category`.
    pub fn exit_code(category: ExitCategory) -> i32 {
        ExitCategory::ALL
            .iter()
            .position(|&c| c == category)
            .map_or(-1, |i| i as i32)
    }

    /// Make the next call of `entry_point` fail.
    pub fn fail_call(
        &self,
        entry_point: &'static str,
        category: ExitCategory,
        message: impl Into<String>,
    ) {
        self.lock().failure = Some((entry_point, category, message.into()));
    }

    /// Set the version string reported by the mock.
    pub fn set_version(&self, version: impl Into<String>) {
        self.lock().version = version.into();
    }

    /// Names of the entry points called so far, queries excluded.
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    /// A copy of the 2D mesh held for `state`.
    pub fn mesh2d(&self, state: StateId) -> Option<Mesh2D> {
        self.lock().states.get(&state).map(|s| s.mesh2d.clone())
    }

    pub fn set_mesh2d(&self, state: StateId, mesh: Mesh2D) {
        self.with_state(state, |s| s.mesh2d = mesh);
    }

    pub fn set_mesh1d(&self, state: StateId, mesh: Mesh1D) {
        self.with_state(state, |s| s.mesh1d = mesh);
    }

    pub fn set_curvilinear_grid(&self, state: StateId, grid: CurvilinearGrid) {
        self.with_state(state, |s| s.grid = grid);
    }

    pub fn set_contacts(&self, state: StateId, contacts: Contacts) {
        self.with_state(state, |s| s.contacts = contacts);
    }

    fn with_state(&self, state: StateId, f: impl FnOnce(&mut StateData)) {
        let mut inner = self.lock();
        let data = inner
            .states
            .get_mut(&state)
            .unwrap_or_else(|| panic!("mock has no state {state}"));
        f(data);
    }

    /// Record the call, apply any injected failure, then run `f` on the
    /// state's data.
    fn enter(
        &self,
        entry_point: &'static str,
        state: StateId,
        f: impl FnOnce(&mut StateData) -> Result<(), (ExitCategory, String)>,
    ) -> i32 {
        let mut inner = self.lock();
        inner.calls.push(entry_point);
        let outcome = match inner.failure.take() {
            Some((name, category, message)) if name == entry_point => Err((category, message)),
            other => {
                inner.failure = other;
                match inner.states.get_mut(&state) {
                    Some(data) => f(data),
                    None => Err((
                        ExitCategory::MeshKernelError,
                        format!("invalid mesh kernel id {state}"),
                    )),
                }
            }
        };
        match outcome {
            Ok(()) => STATUS_OK,
            Err((category, message)) => {
                log::debug!("mock {entry_point} failed: {message}");
                inner.last_error = message;
                Self::exit_code(category)
            }
        }
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy `src` to `dst`, writing at most `capacity` values.
///
/// # Safety
///
/// `dst` must be null or valid for `capacity` writes.
#[allow(unsafe_code)]
unsafe fn write_values<T: Copy>(dst: *mut T, capacity: usize, src: &[T]) {
    let n = src.len().min(capacity);
    if dst.is_null() || n == 0 {
        return;
    }
    // SAFETY: `n <= capacity` and `dst` is valid for `capacity` writes.
    unsafe { std::ptr::copy_nonoverlapping(src.as_ptr(), dst, n) };
}

/// Write `value` as a fixed-width text buffer of `capacity` bytes.
///
/// # Safety
///
/// `buffer` must be valid for `capacity` writes.
#[allow(unsafe_code)]
unsafe fn write_text(buffer: *mut c_char, capacity: usize, value: &str) {
    let bytes = text::encode_fixed(&[value], capacity);
    // SAFETY: forwarded caller contract.
    unsafe { write_values(buffer.cast::<u8>(), capacity, bytes.as_slice()) };
}

/// Refined x, y and value arrays.
type Refined = (Vec<f64>, Vec<f64>, Vec<f64>);

/// Linear refinement of `first..=second`: every segment in the range is
/// split into pieces no longer than `distance`. Inserted points carry a
/// zero value.
fn refine(
    x: &[f64],
    y: &[f64],
    values: &[f64],
    first: usize,
    second: usize,
    distance: f64,
) -> Refined {
    let mut out: Refined = (Vec::new(), Vec::new(), Vec::new());
    for i in 0..x.len() {
        out.0.push(x[i]);
        out.1.push(y[i]);
        out.2.push(values[i]);
        if i >= first && i < second {
            let (dx, dy) = (x[i + 1] - x[i], y[i + 1] - y[i]);
            let pieces = ((dx.hypot(dy) / distance).ceil() as usize).max(1);
            for k in 1..pieces {
                let t = k as f64 / pieces as f64;
                out.0.push(x[i] + t * dx);
                out.1.push(y[i] + t * dy);
                out.2.push(0.0);
            }
        }
    }
    out
}

/// Validate refinement arguments and compute the refined polygon.
fn checked_refine(
    polygon: &GeometryList,
    first: i32,
    second: i32,
    distance: f64,
) -> Result<Refined, (ExitCategory, String)> {
    let n = polygon.number_of_coordinates();
    let (first, second) = match (usize::try_from(first), usize::try_from(second)) {
        (Ok(f), Ok(s)) if f <= s && s < n => (f, s),
        _ => {
            return Err((
                ExitCategory::ConstraintError,
                format!("invalid polygon vertex range {first}..={second} for {n} points"),
            ))
        }
    };
    if !(distance.is_finite() && distance > 0.0) {
        return Err((
            ExitCategory::RangeError,
            format!("refinement distance must be positive, got {distance}"),
        ));
    }
    Ok(refine(
        polygon.x(),
        polygon.y(),
        polygon.values(),
        first,
        second,
        distance,
    ))
}

#[allow(unsafe_code)]
impl NativeKernel for MockKernel {
    unsafe fn get_separator(&self) -> f64 {
        self.lock().separators.geometry
    }

    unsafe fn get_inner_outer_separator(&self) -> f64 {
        self.lock().separators.inner_outer
    }

    unsafe fn get_exit_code(&self, category: ExitCategory, exit_code: *mut i32) -> i32 {
        // SAFETY: trait contract.
        unsafe { *exit_code = Self::exit_code(category) };
        STATUS_OK
    }

    unsafe fn get_error(&self, buffer: *mut c_char) -> i32 {
        let message = self.lock().last_error.clone();
        // SAFETY: trait contract; the engine's error buffer length.
        unsafe {
            write_text(buffer, ERROR_MESSAGE_LEN, &message)
        };
        STATUS_OK
    }

    unsafe fn get_version(&self, buffer: *mut c_char) -> i32 {
        let version = self.lock().version.clone();
        // SAFETY: trait contract; the engine's version buffer length.
        unsafe { write_text(buffer, VERSION_LEN, &version) };
        STATUS_OK
    }

    unsafe fn mesh2d_set(&self, state: StateId, mesh: *const Mesh2DNative) -> i32 {
        self.enter("mesh2d_set", state, |data| {
            // SAFETY: trait contract; the projection comes from a pinned mesh.
            data.mesh2d = unsafe { Mesh2D::from_native(&*mesh, FaceData::Include) };
            Ok(())
        })
    }

    unsafe fn mesh2d_get_dimensions(&self, state: StateId, mesh: *mut Mesh2DNative) -> i32 {
        self.enter("mesh2d_get_dimensions", state, |data| {
            let m = &data.mesh2d;
            // SAFETY: trait contract.
            let out = unsafe { &mut *mesh };
            out.num_nodes = to_count(m.num_nodes(), "nodes");
            out.num_valid_nodes = to_count(m.num_valid_nodes(), "valid nodes");
            out.num_edges = to_count(m.num_edges(), "edges");
            out.num_valid_edges = to_count(m.num_valid_edges(), "valid edges");
            out.num_faces = to_count(m.num_faces(), "faces");
            out.num_face_nodes = to_count(m.num_face_nodes(), "face nodes");
            Ok(())
        })
    }

    unsafe fn mesh2d_get_data(&self, state: StateId, mesh: *mut Mesh2DNative) -> i32 {
        self.enter("mesh2d_get_data", state, |data| {
            let m = &data.mesh2d;
            // SAFETY: trait contract.
            let out = unsafe { &mut *mesh };
            let nodes = to_len(out.num_nodes);
            let edges = to_len(out.num_edges);
            let faces = to_len(out.num_faces);
            let face_nodes = to_len(out.num_face_nodes);
            // SAFETY: each array holds the count written beside it.
            unsafe {
                write_values(out.node_x, nodes, m.nodes_x());
                write_values(out.node_y, nodes, m.nodes_y());
                write_values(out.edge_nodes, edges * 2, m.edge_nodes());
                write_values(out.edge_faces, edges * 2, m.edge_faces());
                write_values(out.edge_x, edges, m.edges_x());
                write_values(out.edge_y, edges, m.edges_y());
                write_values(out.nodes_per_face, faces, m.nodes_per_face());
                write_values(out.face_x, faces, m.faces_x());
                write_values(out.face_y, faces, m.faces_y());
                write_values(out.face_nodes, face_nodes, m.face_nodes());
                write_values(out.face_edges, face_nodes, m.face_edges());
            }
            Ok(())
        })
    }

    unsafe fn mesh1d_get_dimensions(&self, state: StateId, mesh: *mut Mesh1DNative) -> i32 {
        self.enter("mesh1d_get_dimensions", state, |data| {
            let m = &data.mesh1d;
            // SAFETY: trait contract.
            let out = unsafe { &mut *mesh };
            out.num_nodes = to_count(m.num_nodes(), "nodes");
            out.num_valid_nodes = to_count(m.num_valid_nodes(), "valid nodes");
            out.num_edges = to_count(m.num_edges(), "edges");
            out.num_valid_edges = to_count(m.num_valid_edges(), "valid edges");
            Ok(())
        })
    }

    unsafe fn mesh1d_get_data(&self, state: StateId, mesh: *mut Mesh1DNative) -> i32 {
        self.enter("mesh1d_get_data", state, |data| {
            let m = &data.mesh1d;
            // SAFETY: trait contract.
            let out = unsafe { &mut *mesh };
            let nodes = to_len(out.num_nodes);
            let edges = to_len(out.num_edges);
            // SAFETY: each array holds the count written beside it.
            unsafe {
                write_values(out.node_x, nodes, m.nodes_x());
                write_values(out.node_y, nodes, m.nodes_y());
                write_values(out.edge_nodes, edges * 2, m.edge_nodes());
            }
            Ok(())
        })
    }

    unsafe fn curvilinear_get_dimensions(
        &self,
        state: StateId,
        grid: *mut CurvilinearGridNative,
    ) -> i32 {
        self.enter("curvilinear_get_dimensions", state, |data| {
            // SAFETY: trait contract.
            let out = unsafe { &mut *grid };
            out.num_m = to_count(data.grid.num_m(), "grid columns");
            out.num_n = to_count(data.grid.num_n(), "grid rows");
            Ok(())
        })
    }

    unsafe fn curvilinear_get_data(
        &self,
        state: StateId,
        grid: *mut CurvilinearGridNative,
    ) -> i32 {
        self.enter("curvilinear_get_data", state, |data| {
            // SAFETY: trait contract.
            let out = unsafe { &mut *grid };
            let nodes = to_len(out.num_m) * to_len(out.num_n);
            // SAFETY: both arrays hold `num_m * num_n` values.
            unsafe {
                write_values(out.node_x, nodes, data.grid.nodes_x());
                write_values(out.node_y, nodes, data.grid.nodes_y());
            }
            Ok(())
        })
    }

    unsafe fn contacts_get_dimensions(
        &self,
        state: StateId,
        contacts: *mut ContactsNative,
    ) -> i32 {
        self.enter("contacts_get_dimensions", state, |data| {
            // SAFETY: trait contract.
            let out = unsafe { &mut *contacts };
            out.num_contacts = to_count(data.contacts.len(), "contacts");
            Ok(())
        })
    }

    unsafe fn contacts_get_data(&self, state: StateId, contacts: *mut ContactsNative) -> i32 {
        self.enter("contacts_get_data", state, |data| {
            // SAFETY: trait contract.
            let out = unsafe { &mut *contacts };
            let n = to_len(out.num_contacts);
            // SAFETY: both arrays hold `num_contacts` indices.
            unsafe {
                write_values(out.mesh1d_indices, n, data.contacts.mesh1d_indices());
                write_values(out.mesh2d_indices, n, data.contacts.mesh2d_indices());
            }
            Ok(())
        })
    }

    unsafe fn polygon_count_refine(
        &self,
        state: StateId,
        polygon: *const GeometryListNative,
        first: i32,
        second: i32,
        distance: f64,
        count: *mut i32,
    ) -> i32 {
        self.enter("polygon_count_refine", state, |_| {
            // SAFETY: trait contract; the projection comes from a pinned list.
            let input = unsafe { GeometryList::from_native(&*polygon) };
            let (x, _, _) = checked_refine(&input, first, second, distance)?;
            // SAFETY: trait contract.
            unsafe { *count = to_count(x.len(), "refined polygon") };
            Ok(())
        })
    }

    unsafe fn polygon_refine(
        &self,
        state: StateId,
        polygon: *const GeometryListNative,
        first: i32,
        second: i32,
        distance: f64,
        refined: *mut GeometryListNative,
    ) -> i32 {
        self.enter("polygon_refine", state, |_| {
            // SAFETY: trait contract; the projection comes from a pinned list.
            let input = unsafe { GeometryList::from_native(&*polygon) };
            let (x, y, values) = checked_refine(&input, first, second, distance)?;
            // SAFETY: trait contract.
            let out = unsafe { &mut *refined };
            let capacity = to_len(out.number_of_coordinates);
            // SAFETY: the output arrays hold `number_of_coordinates` values.
            unsafe {
                write_values(out.x_coordinates, capacity, x.as_slice());
                write_values(out.y_coordinates, capacity, y.as_slice());
                write_values(out.values, capacity, values.as_slice());
            }
            out.number_of_coordinates = to_count(x.len().min(capacity), "refined polygon");
            Ok(())
        })
    }
}
