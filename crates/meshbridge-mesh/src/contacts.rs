//! Contacts between a 1D and a 2D mesh.

use smallvec::smallvec;

use meshbridge_native::copy::{copy_values, to_count, to_len};
use meshbridge_native::ContactsNative;
use meshbridge_pin::{ArrayField, ArrayFields, PinKey, PinRegistry, Pinnable};

const MESH1D_INDICES: PinKey = PinKey(0);
const MESH2D_INDICES: PinKey = PinKey(1);

/// Paired 1D node / 2D face indices.
#[derive(Clone, Debug, Default)]
pub struct Contacts {
    mesh1d_indices: Vec<i32>,
    mesh2d_indices: Vec<i32>,
    pins: PinRegistry,
}

impl Contacts {
    /// `n` zero-filled contacts, for the engine to write into.
    pub fn new(n: usize) -> Self {
        Self::from_pairs(vec![0; n], vec![0; n])
    }

    /// Contacts from parallel index arrays.
    ///
    /// # Panics
    ///
    /// Panics if the arrays differ in length.
    pub fn from_pairs(mesh1d_indices: Vec<i32>, mesh2d_indices: Vec<i32>) -> Self {
        assert_eq!(
            mesh1d_indices.len(),
            mesh2d_indices.len(),
            "contact index arrays differ in length"
        );
        Self {
            mesh1d_indices,
            mesh2d_indices,
            pins: PinRegistry::new(),
        }
    }

    /// Read contacts the engine filled.
    ///
    /// # Safety
    ///
    /// Non-null index pointers must be valid for `num_contacts` reads.
    #[allow(unsafe_code)]
    pub unsafe fn from_native(native: &ContactsNative) -> Self {
        let n = to_len(native.num_contacts);
        // SAFETY: forwarded caller contract.
        let (mut a, mut b) = unsafe {
            (
                copy_values(native.mesh1d_indices, n),
                copy_values(native.mesh2d_indices, n),
            )
        };
        a.resize(n, 0);
        b.resize(n, 0);
        Self::from_pairs(a, b)
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.mesh1d_indices.len()
    }

    /// Whether there are no contacts.
    pub fn is_empty(&self) -> bool {
        self.mesh1d_indices.is_empty()
    }

    /// 1D node index of each contact.
    pub fn mesh1d_indices(&self) -> &[i32] {
        &self.mesh1d_indices
    }

    /// 2D face index of each contact.
    pub fn mesh2d_indices(&self) -> &[i32] {
        &self.mesh2d_indices
    }

    /// `(1D node, 2D face)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.mesh1d_indices
            .iter()
            .copied()
            .zip(self.mesh2d_indices.iter().copied())
    }
}

impl Pinnable for Contacts {
    type Native = ContactsNative;

    fn array_fields(&mut self) -> ArrayFields<'_> {
        smallvec![
            (MESH1D_INDICES, ArrayField::numeric(&mut self.mesh1d_indices)),
            (MESH2D_INDICES, ArrayField::numeric(&mut self.mesh2d_indices)),
        ]
    }

    fn pins(&self) -> &PinRegistry {
        &self.pins
    }

    fn pins_mut(&mut self) -> &mut PinRegistry {
        &mut self.pins
    }

    fn project(&self) -> ContactsNative {
        ContactsNative {
            mesh1d_indices: self.pins.ptr(MESH1D_INDICES),
            mesh2d_indices: self.pins.ptr(MESH2D_INDICES),
            num_contacts: to_count(self.len(), "contacts"),
        }
    }
}
