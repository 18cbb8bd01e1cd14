//! Layout calculator
//!
//! Each box is 13x13 px with a 2 px border and a 3 px margin, so one cell
//! occupies 18 px along either axis. The scroll container has 3 px of inner
//! padding that is subtracted before dividing.

use serde::Serialize;

use crate::config::LayoutConfig;

pub const CELL_FOOTPRINT_PX: f64 = 18.0;
pub const CONTAINER_PADDING_PX: f64 = 3.0;

/// Height left for the scroll container once the header is laid out.
///
/// Never negative: a header taller than the viewport leaves a zero-height
/// container (and therefore an empty capacity).
pub fn container_height(viewport_height: f64, header_height: f64) -> f64 {
    let height = viewport_height - header_height;
    if height.is_finite() && height > 0.0 {
        height
    } else {
        0.0
    }
}

/// Number of whole cells that fit in the container along each axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Capacity {
    pub columns: u32,
    pub rows: u32,
}

impl Capacity {
    pub const EMPTY: Self = Self {
        columns: 0,
        rows: 0,
    };

    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Capacity of a container box measured in CSS pixels
    pub fn compute(width: f64, height: f64, layout: &LayoutConfig) -> Self {
        Self {
            columns: fit(width, layout),
            rows: fit(height, layout),
        }
    }

    /// Cells needed to cover the container exactly once
    pub const fn cells(self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub const fn is_empty(self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

fn fit(extent: f64, layout: &LayoutConfig) -> u32 {
    let usable = extent - layout.container_padding_px;
    if !usable.is_finite() || usable <= 0.0 || layout.cell_footprint_px <= 0.0 {
        return 0;
    }
    (usable / layout.cell_footprint_px).floor() as u32
}

/// `floor(columns * rows * multiplier)`, the number of cells to append
pub fn fill_target(capacity: Capacity, multiplier: f64) -> usize {
    let target = (capacity.cells() as f64 * multiplier).floor();
    if target.is_finite() && target > 0.0 {
        target as usize
    } else {
        0
    }
}
