//! Per-object registry of pin handles.

use std::ffi::c_char;
use std::fmt;

use indexmap::IndexMap;

use crate::element::{ElementKind, PinElement};
use crate::handle::{PinHandle, PinKey};

/// Insertion-ordered map from [`PinKey`] to [`PinHandle`], plus the
/// object's "pinned" flag.
///
/// An entry exists only while its field is pinned. The registry never owns
/// numeric data; it is a time-boxed view onto the owning object's vectors.
///
/// Cloning a registry yields an empty, unpinned one: a copy of an object
/// must pin its own arrays.
pub struct PinRegistry {
    handles: IndexMap<PinKey, PinHandle>,
    pinned: bool,
}

impl PinRegistry {
    /// Create an empty, unpinned registry.
    pub fn new() -> Self {
        Self {
            handles: IndexMap::new(),
            pinned: false,
        }
    }

    /// Whether the owning object is currently pinned.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no handles are live.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Live keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = PinKey> + '_ {
        self.handles.keys().copied()
    }

    /// Record a handle.
    ///
    /// # Panics
    ///
    /// Panics if `key` already has a handle: pinning a field twice would
    /// leave the first handle unreachable.
    pub(crate) fn insert(&mut self, key: PinKey, handle: PinHandle) {
        assert!(
            !self.handles.contains_key(&key),
            "pin key {key} registered twice"
        );
        self.handles.insert(key, handle);
    }

    pub(crate) fn mark_pinned(&mut self) {
        self.pinned = true;
    }

    /// Handle for `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` was never pinned.
    pub fn get(&self, key: PinKey) -> &PinHandle {
        match self.handles.get(&key) {
            Some(handle) => handle,
            None => panic!(
                "no pin handle for key {key} ({} live handles, pinned: {})",
                self.handles.len(),
                self.pinned
            ),
        }
    }

    /// Handle for `key`, if pinned.
    pub fn try_get(&self, key: PinKey) -> Option<&PinHandle> {
        self.handles.get(&key)
    }

    /// Pinned address of a numeric field, typed as `E`.
    ///
    /// # Panics
    ///
    /// Panics if `key` was never pinned or was pinned with a different
    /// element kind.
    pub fn ptr<E: PinElement>(&self, key: PinKey) -> *mut E {
        let handle = self.get(key);
        assert_eq!(
            handle.kind(),
            E::KIND,
            "pin key {key} holds {} but {} was requested",
            handle.kind(),
            E::KIND
        );
        handle.as_ptr::<E>()
    }

    /// Pinned address of a text field.
    ///
    /// # Panics
    ///
    /// Panics if `key` was never pinned or is not a text field.
    pub fn text_ptr(&self, key: PinKey) -> *mut c_char {
        let handle = self.get(key);
        assert!(
            matches!(handle.kind(), ElementKind::Text { .. }),
            "pin key {key} holds {} but text was requested",
            handle.kind()
        );
        handle.as_ptr::<c_char>()
    }

    /// Release every handle and clear the pinned flag.
    ///
    /// Idempotent. Returns the number of handles released.
    pub fn release_all(&mut self) -> usize {
        let released = self.handles.len();
        self.handles.clear();
        self.pinned = false;
        released
    }
}

impl Default for PinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PinRegistry {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl fmt::Debug for PinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinRegistry")
            .field("pinned", &self.pinned)
            .field("keys", &self.handles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for PinRegistry {
    fn drop(&mut self) {
        if self.pinned || !self.handles.is_empty() {
            let released = self.release_all();
            log::warn!(
                "pinned object dropped without unpin; released {released} pin handle(s)"
            );
        }
    }
}
