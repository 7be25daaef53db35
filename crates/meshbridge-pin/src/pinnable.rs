//! The [`Pinnable`] trait and the [`NativeView`] borrow guard.

use std::any::type_name;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use smallvec::SmallVec;

use crate::field::ArrayFields;
use crate::handle::{PinHandle, PinKey};
use crate::registry::PinRegistry;

/// An object whose array fields can be exposed to native code.
///
/// Implementors declare their array fields once, in
/// [`array_fields`](Self::array_fields), hold a [`PinRegistry`], and build
/// their native projection from pinned addresses in
/// [`project`](Self::project). Pinning, unpinning and view creation are
/// provided.
///
/// Any method that replaces a whole array must call
/// [`unpin`](Self::unpin) first, so no handle outlives the buffer it
/// points into.
pub trait Pinnable {
    /// The `#[repr(C)]` projection handed to the engine.
    type Native;

    /// The object's array fields, keyed and in declaration order.
    ///
    /// Keys must be unique and stable for the type.
    fn array_fields(&mut self) -> ArrayFields<'_>;

    /// The object's pin registry.
    fn pins(&self) -> &PinRegistry;

    /// The object's pin registry, mutably.
    fn pins_mut(&mut self) -> &mut PinRegistry;

    /// Build the projection from the registry's pinned addresses and the
    /// object's scalar fields.
    ///
    /// Only called while pinned.
    fn project(&self) -> Self::Native;

    /// Pin every array field. A no-op if already pinned.
    fn pin(&mut self) {
        if self.pins().is_pinned() {
            return;
        }
        let handles: SmallVec<[(PinKey, PinHandle); 12]> = self
            .array_fields()
            .into_iter()
            .filter_map(|(key, field)| field.into_handle().map(|handle| (key, handle)))
            .collect();
        let registry = self.pins_mut();
        for (key, handle) in handles {
            registry.insert(key, handle);
        }
        registry.mark_pinned();
        log::trace!(
            "pinned {} array field(s) of {}",
            registry.len(),
            type_name::<Self>()
        );
    }

    /// Release every pin handle. Idempotent.
    fn unpin(&mut self) {
        let released = self.pins_mut().release_all();
        if released > 0 {
            log::trace!("unpinned {released} array field(s) of {}", type_name::<Self>());
        }
    }

    /// Whether the object's arrays are currently pinned.
    fn is_pinned(&self) -> bool {
        self.pins().is_pinned()
    }

    /// Pin if needed and return the native projection.
    ///
    /// The view holds the object's exclusive borrow, so the object cannot be
    /// mutated, resized or dropped while the view is alive. Dropping the view
    /// does not unpin; call [`unpin`](Self::unpin) or
    /// [`dispose`](Self::dispose) when the native call is over.
    fn create_native_view(&mut self) -> NativeView<'_, Self::Native> {
        self.pin();
        NativeView::new(self.project())
    }

    /// Release all pins and drop the object.
    fn dispose(mut self)
    where
        Self: Sized,
    {
        self.unpin();
    }
}

/// A native projection tied to the exclusive borrow of its source object.
pub struct NativeView<'a, N> {
    native: N,
    _object: PhantomData<&'a mut ()>,
}

impl<N> NativeView<'_, N> {
    pub(crate) fn new(native: N) -> Self {
        Self {
            native,
            _object: PhantomData,
        }
    }

    /// Address of the projection, for passing by reference to native code.
    pub fn as_ptr(&self) -> *const N {
        &self.native
    }

    /// Mutable address of the projection, for entry points that write
    /// counts back.
    pub fn as_mut_ptr(&mut self) -> *mut N {
        &mut self.native
    }
}

impl<N> Deref for NativeView<'_, N> {
    type Target = N;

    fn deref(&self) -> &N {
        &self.native
    }
}

impl<N> DerefMut for NativeView<'_, N> {
    fn deref_mut(&mut self) -> &mut N {
        &mut self.native
    }
}
