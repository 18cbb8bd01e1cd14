//! The seam between the controller and whatever displays the grid

use std::time::Duration;

use crate::cell::Cell;
use crate::layout::Capacity;
use crate::scroll::ScrollMetrics;

/// A continuation the controller asks the host to run later through
/// [`GridController::run_deferred`](crate::GridController::run_deferred).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// First flush, after the initial render pass
    InitialFill,
    /// End of the post-flush loading grace period
    ClearLoading,
    /// Second half of a reset, after the forced render
    ClearGrid,
    /// Appended cells are on screen; scroll growth may trigger again
    GrowthSettled,
    /// A resize deadline may have passed
    ResizeDeadline,
}

/// What the renderer needs to draw the grid
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    pub cells: &'a [Cell],
    /// See [`BoxFeed::epoch`](crate::BoxFeed::epoch)
    pub epoch: u64,
    pub capacity: Capacity,
    pub loading: bool,
}

/// Measurements and effects the controller needs from its environment.
///
/// Measurements of elements that are not attached yet read as 0.
pub trait ViewHost {
    /// `window.innerHeight`
    fn viewport_height(&self) -> f64;
    /// Offset height of the header above the scroll container
    fn header_height(&self) -> f64;
    /// Offset `(width, height)` of the scroll container
    fn container_size(&self) -> (f64, f64);
    fn scroll_metrics(&self) -> ScrollMetrics;
    /// Monotonic time since an arbitrary origin
    fn now(&self) -> Duration;

    /// Write the container's inline height; must be committed before
    /// [`container_size`](Self::container_size) is read again.
    fn set_container_height(&mut self, px: f64);
    fn scroll_to_top(&mut self);
    /// Draw synchronously, before returning
    fn render_now(&mut self, view: GridView<'_>);
    /// Draw on the next frame
    fn request_render(&mut self);
    fn schedule(&mut self, delay: Duration, task: Deferred);
}
