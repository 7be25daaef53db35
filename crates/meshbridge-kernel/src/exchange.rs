//! Exchange routines: one method per engine operation, each running the
//! whole pin / call / copy-out / release cycle.

use meshbridge_core::{CallError, ConfigError, ExchangeConfig, Separators, StateId};
use meshbridge_geometry::{decode_with_report, encode, Decoded, Geometry, GeometryList};
use meshbridge_mesh::{Contacts, CurvilinearGrid, FaceData, Mesh1D, Mesh2D};
use meshbridge_native::copy::{to_count, to_len};
use meshbridge_native::{ContactsNative, CurvilinearGridNative, Mesh1DNative, Mesh2DNative};
use meshbridge_pin::Pinnable;

use crate::kernel::{NativeKernel, VERSION_LEN};
use crate::status::{last_error_text, read_text, resolve_status};

/// A kernel paired with the configuration used to talk to it.
///
/// Exchange routines borrow caller objects mutably for the duration of the
/// call, so one object can take part in only one call at a time. Objects
/// the caller passes in are unpinned again before the routine returns;
/// objects the routine allocates are disposed and their contents returned
/// as fresh copies.
pub struct Exchange<'k, K: ?Sized> {
    kernel: &'k K,
    config: ExchangeConfig,
}

impl<'k, K: NativeKernel + ?Sized> Exchange<'k, K> {
    /// An exchange with the default configuration.
    pub fn new(kernel: &'k K) -> Self {
        Self {
            kernel,
            config: ExchangeConfig::default(),
        }
    }

    /// An exchange with a validated configuration.
    pub fn with_config(kernel: &'k K, config: ExchangeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { kernel, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// The underlying kernel.
    pub fn kernel(&self) -> &'k K {
        self.kernel
    }

    fn check(&self, code: i32) -> Result<(), CallError> {
        resolve_status(self.kernel, &self.config, code)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// The separators the engine expects, queried on every call.
    #[allow(unsafe_code)]
    pub fn separators(&self) -> Separators {
        // SAFETY: scalar queries without pointer arguments.
        unsafe {
            Separators::new(
                self.kernel.get_separator(),
                self.kernel.get_inner_outer_separator(),
            )
        }
    }

    /// The engine version string.
    #[allow(unsafe_code)]
    pub fn version(&self) -> Result<String, CallError> {
        // SAFETY: `read_text` passes a buffer of at least `VERSION_LEN` bytes.
        read_text(self.config.version_capacity, VERSION_LEN, |buffer| unsafe {
            self.kernel.get_version(buffer)
        })
    }

    /// The diagnostic of the engine's last failed call.
    pub fn last_error(&self) -> Result<String, CallError> {
        last_error_text(self.kernel, self.config.error_message_capacity)
    }

    // ── Geometry ────────────────────────────────────────────────

    /// Encode `geometries` with the separators the engine expects.
    pub fn encode(&self, geometries: &[Geometry]) -> GeometryList {
        encode(geometries, self.separators())
    }

    /// Decode `list` with the configured separator tolerance.
    pub fn decode(&self, list: &GeometryList) -> Decoded {
        decode_with_report(list, self.config.separator_tolerance)
    }

    /// Refine the vertices `first..=second` of `polygon` so that no segment
    /// is longer than `distance`, returning the refined polygon.
    ///
    /// Counts the result first, allocates a list of that length, then asks
    /// the engine to fill it.
    #[allow(unsafe_code)]
    pub fn refine_polygon(
        &self,
        state: StateId,
        polygon: &mut GeometryList,
        first: usize,
        second: usize,
        distance: f64,
    ) -> Result<GeometryList, CallError> {
        let separators = polygon.separators();
        let first = to_count(first, "first vertex index");
        let second = to_count(second, "second vertex index");

        let input = polygon.create_native_view();
        let mut count = 0;
        // SAFETY: `input` projects a pinned list; `count` is a live local.
        let code = unsafe {
            self.kernel
                .polygon_count_refine(state, input.as_ptr(), first, second, distance, &mut count)
        };
        if let Err(err) = self.check(code) {
            drop(input);
            polygon.unpin();
            return Err(err);
        }

        let mut refined = GeometryList::with_len(to_len(count), separators);
        let mut output = refined.create_native_view();
        // SAFETY: both views are pinned; `output` holds the counted length.
        let code = unsafe {
            self.kernel.polygon_refine(
                state,
                input.as_ptr(),
                first,
                second,
                distance,
                output.as_mut_ptr(),
            )
        };
        // SAFETY: on success the engine filled `output` within its length.
        let result = self
            .check(code)
            .map(|()| unsafe { GeometryList::from_native(&output) });
        drop(output);
        drop(input);
        refined.dispose();
        polygon.unpin();
        result
    }

    // ── Meshes ──────────────────────────────────────────────────

    /// Hand `mesh` to the engine as the 2D mesh of `state`.
    ///
    /// # Panics
    ///
    /// Panics if `mesh` fails [`Mesh2D::validate`]; an inconsistent mesh
    /// would let the engine read past the end of its arrays.
    #[allow(unsafe_code)]
    pub fn set_mesh2d(&self, state: StateId, mesh: &mut Mesh2D) -> Result<(), CallError> {
        if let Err(err) = mesh.validate() {
            panic!("mesh2d handed to the engine is inconsistent: {err}");
        }
        let view = mesh.create_native_view();
        log::trace!(
            "mesh2d set for state {state}: {} nodes, {} edges",
            view.num_nodes,
            view.num_edges
        );
        // SAFETY: `view` projects a pinned, validated mesh.
        let code = unsafe { self.kernel.mesh2d_set(state, view.as_ptr()) };
        let result = self.check(code);
        drop(view);
        mesh.unpin();
        result
    }

    /// Copy the 2D mesh of `state` out of the engine.
    #[allow(unsafe_code)]
    pub fn mesh2d(&self, state: StateId, faces: FaceData) -> Result<Mesh2D, CallError> {
        let mut dims = Mesh2DNative::default();
        // SAFETY: `dims` is a live local; only counts are written.
        self.check(unsafe { self.kernel.mesh2d_get_dimensions(state, &mut dims) })?;

        let mut buffer = Mesh2D::new(
            to_len(dims.num_nodes),
            to_len(dims.num_edges),
            to_len(dims.num_faces),
            to_len(dims.num_face_nodes),
        );
        buffer.set_num_valid_nodes(to_len(dims.num_valid_nodes));
        buffer.set_num_valid_edges(to_len(dims.num_valid_edges));

        let mut view = buffer.create_native_view();
        // SAFETY: `view` arrays are pinned and sized by the dimensions query.
        let code = unsafe { self.kernel.mesh2d_get_data(state, view.as_mut_ptr()) };
        // SAFETY: on success the engine filled the arrays within their counts.
        let result = self
            .check(code)
            .map(|()| unsafe { Mesh2D::from_native(&view, faces) });
        drop(view);
        buffer.dispose();
        result
    }

    /// Copy the 1D mesh of `state` out of the engine.
    #[allow(unsafe_code)]
    pub fn mesh1d(&self, state: StateId) -> Result<Mesh1D, CallError> {
        let mut dims = Mesh1DNative::default();
        // SAFETY: `dims` is a live local; only counts are written.
        self.check(unsafe { self.kernel.mesh1d_get_dimensions(state, &mut dims) })?;

        let mut buffer = Mesh1D::new(to_len(dims.num_nodes), to_len(dims.num_edges));
        buffer.set_valid_counts(to_len(dims.num_valid_nodes), to_len(dims.num_valid_edges));

        let mut view = buffer.create_native_view();
        // SAFETY: `view` arrays are pinned and sized by the dimensions query.
        let code = unsafe { self.kernel.mesh1d_get_data(state, view.as_mut_ptr()) };
        // SAFETY: on success the engine filled the arrays within their counts.
        let result = self
            .check(code)
            .map(|()| unsafe { Mesh1D::from_native(&view) });
        drop(view);
        buffer.dispose();
        result
    }

    /// Copy the curvilinear grid of `state` out of the engine.
    #[allow(unsafe_code)]
    pub fn curvilinear_grid(&self, state: StateId) -> Result<CurvilinearGrid, CallError> {
        let mut dims = CurvilinearGridNative::default();
        // SAFETY: `dims` is a live local; only counts are written.
        self.check(unsafe { self.kernel.curvilinear_get_dimensions(state, &mut dims) })?;

        let mut buffer = CurvilinearGrid::new(to_len(dims.num_n), to_len(dims.num_m));
        let mut view = buffer.create_native_view();
        // SAFETY: `view` arrays are pinned and hold `num_m * num_n` nodes.
        let code = unsafe { self.kernel.curvilinear_get_data(state, view.as_mut_ptr()) };
        // SAFETY: on success the engine filled the node arrays.
        let result = self
            .check(code)
            .map(|()| unsafe { CurvilinearGrid::from_native(&view) });
        drop(view);
        buffer.dispose();
        result
    }

    /// Copy the 1D/2D contacts of `state` out of the engine.
    #[allow(unsafe_code)]
    pub fn contacts(&self, state: StateId) -> Result<Contacts, CallError> {
        let mut dims = ContactsNative::default();
        // SAFETY: `dims` is a live local; only the count is written.
        self.check(unsafe { self.kernel.contacts_get_dimensions(state, &mut dims) })?;

        let mut buffer = Contacts::new(to_len(dims.num_contacts));
        let mut view = buffer.create_native_view();
        // SAFETY: `view` arrays are pinned and hold `num_contacts` indices.
        let code = unsafe { self.kernel.contacts_get_data(state, view.as_mut_ptr()) };
        // SAFETY: on success the engine filled both index arrays.
        let result = self
            .check(code)
            .map(|()| unsafe { Contacts::from_native(&view) });
        drop(view);
        buffer.dispose();
        result
    }
}
