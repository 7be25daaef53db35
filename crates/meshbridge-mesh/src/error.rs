//! Mesh invariant violations.

use std::error::Error;
use std::fmt;

/// A mesh object whose counts and arrays disagree.
///
/// Returned by the `validate` methods; never raised by resize, which only
/// grows buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// A valid count exceeds its allocated count.
    ValidExceedsAllocated {
        /// Entity kind (`"nodes"`, `"edges"`).
        entity: &'static str,
        /// The valid count.
        valid: usize,
        /// The allocated count.
        allocated: usize,
    },
    /// `sum(nodes_per_face)` differs from the face-node count.
    FaceNodeSumMismatch {
        /// Sum of the per-face node counts.
        sum: usize,
        /// Declared face-node count.
        face_nodes: usize,
    },
    /// An array is shorter than its count implies.
    ArrayTooShort {
        /// Array name.
        array: &'static str,
        /// Actual length.
        len: usize,
        /// Length implied by the counts.
        required: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidExceedsAllocated {
                entity,
                valid,
                allocated,
            } => write!(f, "{valid} valid {entity} exceed {allocated} allocated"),
            Self::FaceNodeSumMismatch { sum, face_nodes } => write!(
                f,
                "nodes per face sum to {sum} but face-node count is {face_nodes}"
            ),
            Self::ArrayTooShort {
                array,
                len,
                required,
            } => write!(f, "{array} holds {len} values, {required} required"),
        }
    }
}

impl Error for MeshError {}

/// Check that `array` holds at least `required` values.
pub(crate) fn require_len<T>(array: &'static str, values: &[T], required: usize) -> Result<(), MeshError> {
    if values.len() < required {
        return Err(MeshError::ArrayTooShort {
            array,
            len: values.len(),
            required,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_array() {
        let e = MeshError::ArrayTooShort {
            array: "edge_nodes",
            len: 6,
            required: 8,
        };
        assert_eq!(e.to_string(), "edge_nodes holds 6 values, 8 required");
    }
}
