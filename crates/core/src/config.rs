//! Tunables for layout, feed growth and resize handling
//!
//! Every field has a default matching the stock page, and every section is
//! `#[serde(default)]` so a partial `[grid]` table in `config.toml` (or a
//! partial `GRIDFEED_CONFIG` object in the browser) only overrides what it
//! names.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::{CELL_FOOTPRINT_PX, CONTAINER_PADDING_PX};

/// Cell geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Box + border + margin along one axis
    pub cell_footprint_px: f64,
    /// Inner padding of the scroll container, subtracted before division
    pub container_padding_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_footprint_px: CELL_FOOTPRINT_PX,
            container_padding_px: CONTAINER_PADDING_PX,
        }
    }
}

/// Fill and growth policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Capacity multiplier for a flush (initial fill)
    pub initial_fill_factor: f64,
    /// Capacity multiplier for each scroll-triggered growth
    pub growth_factor: f64,
    /// Fraction of the scroll height that must be in view to grow
    pub scroll_threshold: f64,
    /// How long the loading overlay stays up after a flush
    pub loading_grace_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_fill_factor: 1.5,
            growth_factor: 1.0,
            scroll_threshold: 0.75,
            loading_grace_ms: 500,
        }
    }
}

/// Window resize pipeline timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Minimum spacing between two recalculations
    pub throttle_ms: u64,
    /// Quiet period required after the last resize event
    pub debounce_ms: u64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 500,
            debounce_ms: 500,
        }
    }
}

/// Full grid configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub layout: LayoutConfig,
    pub feed: FeedConfig,
    pub resize: ResizeConfig,
}

impl GridConfig {
    /// Reject values that would make the layout arithmetic meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let footprint = self.layout.cell_footprint_px;
        if !footprint.is_finite() || footprint <= 0.0 {
            return Err(ConfigError::InvalidFootprint(footprint));
        }

        let padding = self.layout.container_padding_px;
        if !padding.is_finite() || padding < 0.0 {
            return Err(ConfigError::InvalidPadding(padding));
        }

        for (name, value) in [
            ("initial_fill_factor", self.feed.initial_fill_factor),
            ("growth_factor", self.feed.growth_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidFactor { name, value });
            }
        }

        let threshold = self.feed.scroll_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(threshold));
        }

        Ok(())
    }

    pub const fn loading_grace(&self) -> Duration {
        Duration::from_millis(self.feed.loading_grace_ms)
    }
}
