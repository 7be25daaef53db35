//! Exchange configuration parameters.

use crate::error::ConfigError;

/// The pair of sentinel values that partition a flat coordinate stream.
///
/// A live engine reports the values it expects; every geometry list passed to
/// or received from that engine must use the same pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separators {
    /// Marks the boundary between two independent geometries.
    pub geometry: f64,
    /// Marks the boundary between a polygon's exterior ring and each hole.
    pub inner_outer: f64,
}

impl Separators {
    /// The engine's customary geometry separator.
    pub const DEFAULT_GEOMETRY: f64 = -999.0;

    /// The engine's customary inner/outer separator.
    pub const DEFAULT_INNER_OUTER: f64 = -998.0;

    /// Create a separator pair.
    pub const fn new(geometry: f64, inner_outer: f64) -> Self {
        Self {
            geometry,
            inner_outer,
        }
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GEOMETRY, Self::DEFAULT_INNER_OUTER)
    }
}

/// Configuration for one exchange session with the native engine.
///
/// Validated with [`validate`](Self::validate); all values are plain data.
#[derive(Clone, Debug, PartialEq)]
pub struct ExchangeConfig {
    /// Sentinels used when no engine is available to ask.
    pub separators: Separators,

    /// Absolute tolerance for recognising a separator during decode.
    ///
    /// Default: `1e-10`. For coordinates of very large magnitude this can
    /// yield false positives or negatives; it is kept for wire compatibility.
    pub separator_tolerance: f64,

    /// Byte capacity of the buffer that receives the engine's last error.
    ///
    /// Default: 512.
    pub error_message_capacity: usize,

    /// Byte capacity of the buffer that receives the engine version string.
    ///
    /// Default: 64.
    pub version_capacity: usize,
}

impl ExchangeConfig {
    /// Default absolute separator tolerance.
    pub const DEFAULT_SEPARATOR_TOLERANCE: f64 = 1e-10;

    /// Default error message buffer capacity in bytes.
    pub const DEFAULT_ERROR_MESSAGE_CAPACITY: usize = 512;

    /// Default version buffer capacity in bytes.
    pub const DEFAULT_VERSION_CAPACITY: usize = 64;

    /// Create a config with the given separators and default everything else.
    pub fn with_separators(separators: Separators) -> Self {
        Self {
            separators,
            ..Self::default()
        }
    }

    /// Check every parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Separators {
            geometry,
            inner_outer,
        } = self.separators;
        if !geometry.is_finite() {
            return Err(ConfigError::NonFiniteSeparator {
                which: "geometry",
                value: geometry,
            });
        }
        if !inner_outer.is_finite() {
            return Err(ConfigError::NonFiniteSeparator {
                which: "inner/outer",
                value: inner_outer,
            });
        }
        if geometry == inner_outer {
            return Err(ConfigError::IndistinctSeparators { value: geometry });
        }
        if !(self.separator_tolerance.is_finite() && self.separator_tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance {
                value: self.separator_tolerance,
            });
        }
        if self.error_message_capacity < Self::DEFAULT_ERROR_MESSAGE_CAPACITY {
            return Err(ConfigError::TextCapacityTooSmall {
                which: "error message",
                capacity: self.error_message_capacity,
                minimum: Self::DEFAULT_ERROR_MESSAGE_CAPACITY,
            });
        }
        if self.version_capacity < Self::DEFAULT_VERSION_CAPACITY {
            return Err(ConfigError::TextCapacityTooSmall {
                which: "version",
                capacity: self.version_capacity,
                minimum: Self::DEFAULT_VERSION_CAPACITY,
            });
        }
        Ok(())
    }

    /// Whether `value` is `separator` within the configured tolerance.
    pub fn is_separator(&self, value: f64, separator: f64) -> bool {
        (value - separator).abs() < self.separator_tolerance
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            separators: Separators::default(),
            separator_tolerance: Self::DEFAULT_SEPARATOR_TOLERANCE,
            error_message_capacity: Self::DEFAULT_ERROR_MESSAGE_CAPACITY,
            version_capacity: Self::DEFAULT_VERSION_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ExchangeConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.separators.geometry, -999.0);
        assert_eq!(config.separators.inner_outer, -998.0);
        assert_eq!(config.separator_tolerance, 1e-10);
    }

    #[test]
    fn equal_separators_rejected() {
        let config = ExchangeConfig::with_separators(Separators::new(-5.0, -5.0));
        assert_eq!(
            config.validate(),
            Err(ConfigError::IndistinctSeparators { value: -5.0 })
        );
    }

    #[test]
    fn nan_separator_rejected() {
        let config = ExchangeConfig::with_separators(Separators::new(f64::NAN, -998.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteSeparator {
                which: "geometry",
                ..
            })
        ));
    }

    #[test]
    fn bad_tolerance_rejected() {
        let config = ExchangeConfig {
            separator_tolerance: 0.0,
            ..ExchangeConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTolerance { value: 0.0 })
        );
    }

    #[test]
    fn capacity_below_engine_length_rejected() {
        let config = ExchangeConfig {
            version_capacity: 0,
            ..ExchangeConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TextCapacityTooSmall {
                which: "version",
                capacity: 0,
                minimum: 64,
            })
        );
        let config = ExchangeConfig {
            error_message_capacity: 8,
            ..ExchangeConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TextCapacityTooSmall {
                which: "error message",
                capacity: 8,
                minimum: 512,
            })
        );
    }

    #[test]
    fn larger_capacities_accepted() {
        let config = ExchangeConfig {
            error_message_capacity: 1024,
            version_capacity: 64,
            ..ExchangeConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn separator_match_is_tolerance_bounded() {
        let config = ExchangeConfig::default();
        assert!(config.is_separator(-999.0, -999.0));
        assert!(config.is_separator(-999.0 + 1e-12, -999.0));
        assert!(!config.is_separator(-999.0 + 1e-9, -999.0));
    }
}
