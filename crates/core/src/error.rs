//! Configuration errors
//!
//! Grid operations themselves cannot fail; only a hand-edited config can be
//! rejected before it reaches the controller.

/// Why a [`GridConfig`](crate::GridConfig) was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("cell footprint must be a positive pixel size, got {0}")]
    InvalidFootprint(f64),
    #[error("container padding must be a non-negative pixel size, got {0}")]
    InvalidPadding(f64),
    #[error("{name} must be a finite, non-negative multiplier, got {value}")]
    InvalidFactor { name: &'static str, value: f64 },
    #[error("scroll threshold must lie in (0, 1], got {0}")]
    ThresholdOutOfRange(f64),
}
