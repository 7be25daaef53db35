//! Error types for the meshbridge exchange layer.
//!
//! Two kinds of failure are modelled as values: a nonzero status returned by
//! a native call ([`CallError`]) and an invalid exchange configuration
//! ([`ConfigError`]). Broken marshaling invariants are programming errors and
//! panic instead; they never appear here.

use std::error::Error;
use std::fmt;

/// Failure category of a native call.
///
/// The engine does not publish fixed numeric codes. Each category's code is
/// obtained at run time through the matching "get exit code" query, and a
/// nonzero status is classified by comparing against those answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExitCategory {
    /// The call succeeded.
    Success,
    /// Generic engine error.
    MeshKernelError,
    /// The requested operation is not implemented by the engine.
    NotImplementedError,
    /// An algorithm failed to converge or produce a result.
    AlgorithmError,
    /// A constraint on the input was violated.
    ConstraintError,
    /// The mesh geometry is invalid for the requested operation.
    MeshGeometryError,
    /// A linear solver failed.
    LinearAlgebraError,
    /// An index or value was out of range.
    RangeError,
    /// The engine caught a standard library exception.
    StdLibException,
    /// The engine caught an exception of unknown type.
    UnknownException,
}

impl ExitCategory {
    /// Every category, in the order the engine documents them.
    pub const ALL: [ExitCategory; 10] = [
        ExitCategory::Success,
        ExitCategory::MeshKernelError,
        ExitCategory::NotImplementedError,
        ExitCategory::AlgorithmError,
        ExitCategory::ConstraintError,
        ExitCategory::MeshGeometryError,
        ExitCategory::LinearAlgebraError,
        ExitCategory::RangeError,
        ExitCategory::StdLibException,
        ExitCategory::UnknownException,
    ];

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::MeshKernelError => "mesh kernel error",
            Self::NotImplementedError => "not implemented",
            Self::AlgorithmError => "algorithm error",
            Self::ConstraintError => "constraint error",
            Self::MeshGeometryError => "mesh geometry error",
            Self::LinearAlgebraError => "linear algebra error",
            Self::RangeError => "range error",
            Self::StdLibException => "standard library exception",
            Self::UnknownException => "unknown exception",
        }
    }
}

impl fmt::Display for ExitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A native call returned a nonzero status.
///
/// Carries the raw status, the category it resolved to (if any category's
/// exit code matched) and the diagnostic text the engine reported for it.
/// The exchange layer relays this unchanged; it never retries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallError {
    /// Raw status code returned by the native entry point.
    pub code: i32,
    /// Category the code resolved to, or `None` if no category matched.
    pub category: Option<ExitCategory>,
    /// Diagnostic text from the engine's last-error query. May be empty.
    pub message: String,
}

impl CallError {
    /// Build an error for `code` with no classification or message.
    pub fn unclassified(code: i32) -> Self {
        Self {
            code,
            category: None,
            message: String::new(),
        }
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "native call failed with status {}", self.code)?;
        if let Some(category) = self.category {
            write!(f, " ({category})")?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl Error for CallError {}

/// Invalid [`ExchangeConfig`](crate::ExchangeConfig).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A separator is NaN or infinite.
    NonFiniteSeparator {
        /// Which separator was rejected.
        which: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Both separators have the same value, so decode cannot tell them apart.
    IndistinctSeparators {
        /// The shared value.
        value: f64,
    },
    /// The separator tolerance is not a positive finite number.
    InvalidTolerance {
        /// The rejected tolerance.
        value: f64,
    },
    /// A text buffer capacity is smaller than what the engine writes.
    TextCapacityTooSmall {
        /// Which capacity was rejected.
        which: &'static str,
        /// The rejected capacity.
        capacity: usize,
        /// Bytes the engine writes into this buffer.
        minimum: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteSeparator { which, value } => {
                write!(f, "{which} separator must be finite, got {value}")
            }
            Self::IndistinctSeparators { value } => {
                write!(
                    f,
                    "geometry and inner/outer separators must differ, both are {value}"
                )
            }
            Self::InvalidTolerance { value } => {
                write!(f, "separator tolerance must be positive and finite, got {value}")
            }
            Self::TextCapacityTooSmall {
                which,
                capacity,
                minimum,
            } => {
                write!(f, "{which} capacity {capacity} is below the engine's {minimum} bytes")
            }
        }
    }
}

impl Error for ConfigError {}
