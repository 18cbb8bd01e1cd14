//! Grid controller
//!
//! Owns the feed, the current capacity, the loading flag and both
//! coordinators for one mounted view. Every entry point takes the host by
//! `&mut` so the controller can be driven from DOM callbacks and from the
//! test harness alike.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::config::GridConfig;
use crate::feed::BoxFeed;
use crate::host::{Deferred, GridView, ViewHost};
use crate::layout::{container_height, fill_target, Capacity};
use crate::resize::{ResizePipeline, Wake};
use crate::scroll::{GrowthState, ScrollCoordinator};

pub struct GridController<R = StdRng> {
    config: GridConfig,
    feed: BoxFeed,
    capacity: Capacity,
    loading: bool,
    /// Grace timers still outstanding; only the last one ends loading
    loading_graces: usize,
    scroll: ScrollCoordinator,
    resize: ResizePipeline,
    rng: R,
}

impl GridController<StdRng> {
    pub fn new(config: GridConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GridController<R> {
    pub fn with_rng(config: GridConfig, rng: R) -> Self {
        Self {
            scroll: ScrollCoordinator::new(config.feed.scroll_threshold),
            resize: ResizePipeline::from_config(&config.resize),
            config,
            feed: BoxFeed::new(),
            capacity: Capacity::EMPTY,
            loading: false,
            loading_graces: 0,
            rng,
        }
    }

    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn growth_state(&self) -> GrowthState {
        self.scroll.state()
    }

    pub const fn feed(&self) -> &BoxFeed {
        &self.feed
    }

    pub fn view(&self) -> GridView<'_> {
        GridView {
            cells: self.feed.cells(),
            epoch: self.feed.epoch(),
            capacity: self.capacity,
            loading: self.loading,
        }
    }

    /// The view is attached and measurable: size it, then fill it once the
    /// first render pass is done.
    pub fn mount(&mut self, host: &mut impl ViewHost) {
        self.recalculate_layout(host);
        host.schedule(Duration::ZERO, Deferred::InitialFill);
    }

    /// Resize the container to the viewport, then measure how many cells
    /// fit in it. Height is always written before capacity is read.
    pub fn recalculate_layout(&mut self, host: &mut impl ViewHost) -> Capacity {
        let height = container_height(host.viewport_height(), host.header_height());
        host.set_container_height(height);

        let (width, measured_height) = host.container_size();
        self.capacity = Capacity::compute(width, measured_height, &self.config.layout);

        debug!(
            container_height = height,
            columns = self.capacity.columns,
            rows = self.capacity.rows,
            "Layout recalculated"
        );
        host.request_render();
        self.capacity
    }

    /// Raw window resize; the recalculation happens once the burst is over.
    pub fn on_resize(&mut self, host: &mut impl ViewHost) {
        let wait = self.resize.record(host.now());
        host.schedule(wait, Deferred::ResizeDeadline);
    }

    /// Container scroll; grows the feed by one capacity when the bottom of
    /// the view passes the threshold. Returns the number of cells appended.
    pub fn on_scroll(&mut self, host: &mut impl ViewHost) -> usize {
        let metrics = host.scroll_metrics();
        if !self.scroll.try_begin(metrics) {
            trace!(state = ?self.scroll.state(), "Scroll ignored");
            return 0;
        }

        let count = fill_target(self.capacity, self.config.feed.growth_factor);
        let appended = self.feed.append_random(count, &mut self.rng);
        debug!(appended, total = self.feed.len(), "Feed grown on scroll");

        host.request_render();
        host.schedule(Duration::ZERO, Deferred::GrowthSettled);
        appended
    }

    /// Clear the grid and refill it to the initial fill factor, showing the
    /// loading overlay for the grace period.
    pub fn flush_boxes(&mut self, host: &mut impl ViewHost) -> usize {
        host.scroll_to_top();
        self.loading = true;
        host.render_now(self.view());

        let removed = self.feed.clear();
        let count = fill_target(self.capacity, self.config.feed.initial_fill_factor);
        let appended = self.feed.append_random(count, &mut self.rng);
        debug!(removed, appended, "Feed flushed");

        host.request_render();
        self.loading_graces += 1;
        host.schedule(self.config.loading_grace(), Deferred::ClearLoading);
        appended
    }

    /// Scroll back up and empty the grid without refilling it.
    pub fn reset_boxes(&mut self, host: &mut impl ViewHost) {
        host.scroll_to_top();
        host.render_now(self.view());
        host.schedule(Duration::ZERO, Deferred::ClearGrid);
    }

    /// Flip one cell's activated flag, returning the new value
    pub fn toggle_activation(&mut self, index: usize) -> Option<bool> {
        let activated = self.feed.toggle(index);
        trace!(index, ?activated, "Cell toggled");
        activated
    }

    /// Run a continuation previously handed to [`ViewHost::schedule`]
    pub fn run_deferred(&mut self, task: Deferred, host: &mut impl ViewHost) {
        match task {
            Deferred::InitialFill => {
                self.flush_boxes(host);
            }
            Deferred::ClearLoading => {
                self.loading_graces = self.loading_graces.saturating_sub(1);
                if self.loading_graces == 0 {
                    self.loading = false;
                    host.request_render();
                } else {
                    trace!(pending = self.loading_graces, "Earlier flush grace ignored");
                }
            }
            Deferred::ClearGrid => {
                let removed = self.feed.clear();
                debug!(removed, "Feed reset");
                host.request_render();
            }
            Deferred::GrowthSettled => self.scroll.settle(),
            Deferred::ResizeDeadline => match self.resize.wake(host.now()) {
                Wake::Deliver => {
                    self.recalculate_layout(host);
                }
                Wake::Rearm(wait) => {
                    trace!(?wait, "Resize deadline not reached, re-arming");
                    host.schedule(wait, Deferred::ResizeDeadline);
                }
                Wake::Idle => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::ScrollMetrics;

    /// Records effects without a clock; tasks are inspected, not run.
    #[derive(Default)]
    struct RecordingHost {
        container: (f64, f64),
        heights: Vec<f64>,
        scrolls_to_top: usize,
        forced: Vec<(bool, usize)>,
        scheduled: Vec<(Duration, Deferred)>,
        metrics: ScrollMetrics,
    }

    impl ViewHost for RecordingHost {
        fn viewport_height(&self) -> f64 {
            800.0
        }
        fn header_height(&self) -> f64 {
            40.0
        }
        fn container_size(&self) -> (f64, f64) {
            self.container
        }
        fn scroll_metrics(&self) -> ScrollMetrics {
            self.metrics
        }
        fn now(&self) -> Duration {
            Duration::ZERO
        }
        fn set_container_height(&mut self, px: f64) {
            self.heights.push(px);
            self.container.1 = px;
        }
        fn scroll_to_top(&mut self) {
            self.scrolls_to_top += 1;
        }
        fn render_now(&mut self, view: GridView<'_>) {
            self.forced.push((view.loading, view.cells.len()));
        }
        fn request_render(&mut self) {}
        fn schedule(&mut self, delay: Duration, task: Deferred) {
            self.scheduled.push((delay, task));
        }
    }

    fn controller() -> GridController<StdRng> {
        GridController::with_rng(GridConfig::default(), StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_mount_sizes_then_schedules_fill() {
        let mut host = RecordingHost {
            container: (738.0, 0.0),
            ..Default::default()
        };
        let mut grid = controller();
        grid.mount(&mut host);

        assert_eq!(host.heights, vec![760.0]);
        assert_eq!(grid.capacity(), Capacity::new(40, 42));
        assert_eq!(host.scheduled, vec![(Duration::ZERO, Deferred::InitialFill)]);
        assert!(grid.feed().is_empty());
    }

    #[test]
    fn test_flush_forces_loading_render_before_clearing() {
        let mut host = RecordingHost {
            container: (741.0, 0.0),
            ..Default::default()
        };
        let mut grid = controller();
        grid.recalculate_layout(&mut host);
        grid.flush_boxes(&mut host);
        grid.flush_boxes(&mut host);

        let filled = fill_target(grid.capacity(), 1.5);
        // Second flush renders "loading" while the first fill is still shown
        assert_eq!(host.forced, vec![(true, 0), (true, filled)]);
        assert_eq!(grid.feed().len(), filled);
        assert!(grid.is_loading());
        assert_eq!(host.scrolls_to_top, 2);
        assert!(host
            .scheduled
            .contains(&(Duration::from_millis(500), Deferred::ClearLoading)));
    }

    #[test]
    fn test_reset_defers_clear() {
        let mut host = RecordingHost {
            container: (741.0, 0.0),
            ..Default::default()
        };
        let mut grid = controller();
        grid.recalculate_layout(&mut host);
        grid.flush_boxes(&mut host);
        grid.run_deferred(Deferred::ClearLoading, &mut host);
        let filled = grid.feed().len();

        grid.reset_boxes(&mut host);
        assert_eq!(grid.feed().len(), filled);
        assert_eq!(host.forced.last(), Some(&(false, filled)));

        grid.run_deferred(Deferred::ClearGrid, &mut host);
        assert!(grid.feed().is_empty());
        assert!(!grid.is_loading());
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut grid = controller();
        assert_eq!(grid.toggle_activation(0), None);
    }
}
