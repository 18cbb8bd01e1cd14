use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 24-bit RGB color, displayed as a fixed-width `#rrggbb` token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexColor(u32);

impl HexColor {
    pub const MAX: u32 = 0x00FF_FFFF;

    /// Bits above the 24-bit range are dropped
    pub const fn new(rgb: u32) -> Self {
        Self(rgb & Self::MAX)
    }

    /// Uniform over the whole displayable range
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..=Self::MAX))
    }

    pub const fn rgb(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// One box in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub color: HexColor,
    /// Set by clicking the box; purely visual
    pub activated: bool,
}

impl Cell {
    pub const fn new(color: HexColor) -> Self {
        Self {
            color,
            activated: false,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(HexColor::random(rng))
    }

    /// Flip the activated flag and return its new value
    pub fn toggle(&mut self) -> bool {
        self.activated = !self.activated;
        self.activated
    }
}
