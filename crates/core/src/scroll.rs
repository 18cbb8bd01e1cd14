//! Scroll-triggered growth guard
//!
//! Appending cells changes the container's scroll height, and the browser
//! keeps firing scroll events while the new rows are being laid out. The
//! coordinator lets exactly one growth through and then stays in
//! [`GrowthState::Growing`] until the controller's settle continuation
//! runs.

/// Scroll position of the container, as reported by the DOM
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// Bottom of the viewport has passed `threshold` of the content height
    pub fn reached(&self, threshold: f64) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height * threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrowthState {
    #[default]
    Idle,
    Growing,
}

#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    state: GrowthState,
    threshold: f64,
}

impl ScrollCoordinator {
    pub const fn new(threshold: f64) -> Self {
        Self {
            state: GrowthState::Idle,
            threshold,
        }
    }

    pub const fn state(&self) -> GrowthState {
        self.state
    }

    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Enter `Growing` if idle and the threshold is reached.
    ///
    /// Returns true when the caller should append cells.
    pub fn try_begin(&mut self, metrics: ScrollMetrics) -> bool {
        if self.state == GrowthState::Growing || !metrics.reached(self.threshold) {
            return false;
        }
        self.state = GrowthState::Growing;
        true
    }

    /// Back to `Idle` once the appended cells are on screen
    pub fn settle(&mut self) {
        self.state = GrowthState::Idle;
    }
}
