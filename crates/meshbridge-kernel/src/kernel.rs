//! The [`NativeKernel`] trait.

use std::ffi::c_char;

use meshbridge_core::{ExchangeConfig, ExitCategory, StateId};
use meshbridge_native::{
    ContactsNative, CurvilinearGridNative, GeometryListNative, Mesh1DNative, Mesh2DNative,
};

/// Status returned by every successful entry point.
pub const STATUS_OK: i32 = 0;

/// Bytes the engine writes through [`NativeKernel::get_error`].
pub const ERROR_MESSAGE_LEN: usize = ExchangeConfig::DEFAULT_ERROR_MESSAGE_CAPACITY;

/// Bytes the engine writes through [`NativeKernel::get_version`].
pub const VERSION_LEN: usize = ExchangeConfig::DEFAULT_VERSION_CAPACITY;

/// Entry points of the native mesh engine used by the exchange layer.
///
/// Implemented by a binding to the engine library, or by an in-process
/// mock for tests. Methods take `&self`: the engine owns its state behind
/// integer [`StateId`]s, so one kernel may serve several threads as long as
/// each thread works on its own state and its own objects.
///
/// # Safety
///
/// Every pointer argument must be valid for the duration of the call only.
/// Projections must come from a live
/// [`NativeView`](meshbridge_pin::NativeView), so every array pointer
/// inside them addresses a pinned buffer at least as long as the count
/// beside it. Text buffers must hold at least as many bytes as the engine
/// writes for that query.
#[allow(unsafe_code)]
pub trait NativeKernel {
    // ── Queries ─────────────────────────────────────────────────

    /// The engine's geometry separator.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn get_separator(&self) -> f64;

    /// The engine's inner/outer separator.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn get_inner_outer_separator(&self) -> f64;

    /// Write the status code the engine uses for `category` to `exit_code`.
    ///
    /// # Safety
    ///
    /// `exit_code` must be valid for one `i32` write.
    unsafe fn get_exit_code(&self, category: ExitCategory, exit_code: *mut i32) -> i32;

    /// Write the diagnostic of the last failed call, NUL-terminated if it
    /// fits, into `buffer`.
    ///
    /// # Safety
    ///
    /// `buffer` must be valid for writes of [`ERROR_MESSAGE_LEN`] bytes.
    unsafe fn get_error(&self, buffer: *mut c_char) -> i32;

    /// Write the engine version, NUL-terminated if it fits, into `buffer`.
    ///
    /// # Safety
    ///
    /// `buffer` must be valid for writes of [`VERSION_LEN`] bytes.
    unsafe fn get_version(&self, buffer: *mut c_char) -> i32;

    // ── Mesh2D ──────────────────────────────────────────────────

    /// Replace the 2D mesh of `state` with a copy of `mesh`.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn mesh2d_set(&self, state: StateId, mesh: *const Mesh2DNative) -> i32;

    /// Write the counts of the 2D mesh of `state` into `mesh`.
    ///
    /// # Safety
    ///
    /// `mesh` must be valid for writes; its pointers are not used.
    unsafe fn mesh2d_get_dimensions(&self, state: StateId, mesh: *mut Mesh2DNative) -> i32;

    /// Fill the arrays of `mesh`, sized by a previous dimensions query.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn mesh2d_get_data(&self, state: StateId, mesh: *mut Mesh2DNative) -> i32;

    // ── Mesh1D ──────────────────────────────────────────────────

    /// Write the counts of the 1D mesh of `state` into `mesh`.
    ///
    /// # Safety
    ///
    /// `mesh` must be valid for writes; its pointers are not used.
    unsafe fn mesh1d_get_dimensions(&self, state: StateId, mesh: *mut Mesh1DNative) -> i32;

    /// Fill the arrays of `mesh`, sized by a previous dimensions query.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn mesh1d_get_data(&self, state: StateId, mesh: *mut Mesh1DNative) -> i32;

    // ── Curvilinear grid ────────────────────────────────────────

    /// Write `num_m` and `num_n` of the grid of `state` into `grid`.
    ///
    /// # Safety
    ///
    /// `grid` must be valid for writes; its pointers are not used.
    unsafe fn curvilinear_get_dimensions(
        &self,
        state: StateId,
        grid: *mut CurvilinearGridNative,
    ) -> i32;

    /// Fill the node arrays of `grid`.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn curvilinear_get_data(&self, state: StateId, grid: *mut CurvilinearGridNative)
        -> i32;

    // ── Contacts ────────────────────────────────────────────────

    /// Write the contact count of `state` into `contacts`.
    ///
    /// # Safety
    ///
    /// `contacts` must be valid for writes; its pointers are not used.
    unsafe fn contacts_get_dimensions(&self, state: StateId, contacts: *mut ContactsNative)
        -> i32;

    /// Fill the index arrays of `contacts`.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn contacts_get_data(&self, state: StateId, contacts: *mut ContactsNative) -> i32;

    // ── Polygons ────────────────────────────────────────────────

    /// Write to `count` the number of coordinates `polygon` has after
    /// refining the vertices `first..=second` to segments no longer than
    /// `distance`.
    ///
    /// # Safety
    ///
    /// See the trait documentation; `count` must be valid for one write.
    unsafe fn polygon_count_refine(
        &self,
        state: StateId,
        polygon: *const GeometryListNative,
        first: i32,
        second: i32,
        distance: f64,
        count: *mut i32,
    ) -> i32;

    /// Write the refined polygon into `refined`, sized by
    /// [`polygon_count_refine`](Self::polygon_count_refine).
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn polygon_refine(
        &self,
        state: StateId,
        polygon: *const GeometryListNative,
        first: i32,
        second: i32,
        distance: f64,
        refined: *mut GeometryListNative,
    ) -> i32;
}
