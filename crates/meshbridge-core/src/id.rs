//! Strongly-typed identifiers.

use std::fmt;

/// Identifies one mesh state allocated inside the native engine.
///
/// The engine hands out plain integers; every call that operates on a mesh
/// names the state it targets. One native call may be in flight per state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub i32);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for StateId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}
