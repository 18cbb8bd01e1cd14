//! Common test utilities
//!
//! A fake view with a virtual clock. Deferred tasks are queued with their due
//! time and run in order by [`Harness::advance`], the way the browser's timer
//! queue would run them.
#![allow(dead_code)] // Not every test file uses every helper

use std::time::Duration;

use gridfeed_core::{
    Deferred, GridConfig, GridController, GridView, ScrollMetrics, ViewHost,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Height of one laid-out row of boxes
const ROW_PX: f64 = 18.0;

#[derive(Debug, Default)]
pub struct FakeHost {
    pub viewport: (f64, f64),
    pub header_height: f64,
    pub container_height: f64,
    pub scroll_top: f64,
    pub columns_rendered: usize,
    pub content_len: usize,
    pub clock: Duration,
    /// Arm timers in whole milliseconds like `setTimeout`: truncated, but
    /// never less than one tick for a nonzero wait
    pub whole_ms_timers: bool,
    /// Fire the next nonzero timer this much before it is due
    pub early_once: Option<Duration>,
    queue: Vec<(Duration, u64, Deferred)>,
    seq: u64,

    pub height_writes: Vec<f64>,
    pub scrolls_to_top: usize,
    pub forced_renders: Vec<(bool, usize)>,
    pub render_requests: usize,
}

impl FakeHost {
    pub fn new(viewport_width: f64, viewport_height: f64, header_height: f64) -> Self {
        Self {
            viewport: (viewport_width, viewport_height),
            header_height,
            ..Self::default()
        }
    }

    pub fn pending(&self) -> Vec<Deferred> {
        let mut queue = self.queue.clone();
        queue.sort_by_key(|&(due, seq, _)| (due, seq));
        queue.into_iter().map(|(_, _, task)| task).collect()
    }

    fn pop_due(&mut self, until: Duration) -> Option<(Duration, Deferred)> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.0 <= until)
            .min_by_key(|(_, entry)| (entry.0, entry.1))
            .map(|(index, _)| index)?;
        let (due, _, task) = self.queue.remove(index);
        Some((due, task))
    }
}

impl ViewHost for FakeHost {
    fn viewport_height(&self) -> f64 {
        self.viewport.1
    }

    fn header_height(&self) -> f64 {
        self.header_height
    }

    fn container_size(&self) -> (f64, f64) {
        (self.viewport.0, self.container_height)
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        let columns = self.columns_rendered.max(1);
        let content_rows = self.content_len.div_ceil(columns);
        ScrollMetrics {
            scroll_top: self.scroll_top,
            client_height: self.container_height,
            scroll_height: (content_rows as f64 * ROW_PX).max(self.container_height),
        }
    }

    fn now(&self) -> Duration {
        self.clock
    }

    fn set_container_height(&mut self, px: f64) {
        self.height_writes.push(px);
        self.container_height = px;
    }

    fn scroll_to_top(&mut self) {
        self.scrolls_to_top += 1;
        self.scroll_top = 0.0;
    }

    fn render_now(&mut self, view: GridView<'_>) {
        self.forced_renders.push((view.loading, view.cells.len()));
        self.content_len = view.cells.len();
        self.columns_rendered = view.capacity.columns as usize;
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }

    fn schedule(&mut self, mut delay: Duration, task: Deferred) {
        if !delay.is_zero() {
            if self.whole_ms_timers {
                delay = Duration::from_millis(delay.as_millis().max(1) as u64);
            }
            if let Some(early) = self.early_once.take() {
                delay = delay.saturating_sub(early);
            }
        }
        self.seq += 1;
        self.queue.push((self.clock + delay, self.seq, task));
    }
}

pub struct Harness {
    pub grid: GridController<StdRng>,
    pub host: FakeHost,
}

impl Harness {
    pub fn new(host: FakeHost) -> Self {
        Self::with_config(host, GridConfig::default())
    }

    pub fn with_config(host: FakeHost, config: GridConfig) -> Self {
        Self {
            grid: GridController::with_rng(config, StdRng::seed_from_u64(0x6772_6964)),
            host,
        }
    }

    /// 738px-wide container under a 40px header in an 800px-tall viewport
    pub fn reference() -> Self {
        Self::new(FakeHost::new(738.0, 800.0, 40.0))
    }

    /// Mount and let the initial fill and its loading grace run out
    pub fn mounted() -> Self {
        let mut harness = Self::reference();
        harness.grid.mount(&mut harness.host);
        harness.advance(Duration::from_secs(1));
        harness
    }

    /// Move the clock forward, running every task that falls due on the way
    pub fn advance(&mut self, by: Duration) {
        let until = self.host.clock + by;
        while let Some((due, task)) = self.host.pop_due(until) {
            self.host.clock = self.host.clock.max(due);
            self.grid.run_deferred(task, &mut self.host);
            self.sync_dom();
        }
        self.host.clock = until;
        self.sync_dom();
    }

    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn scroll_to(&mut self, scroll_top: f64) -> usize {
        self.host.scroll_top = scroll_top;
        self.grid.on_scroll(&mut self.host)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.host.viewport = (width, height);
        self.grid.on_resize(&mut self.host);
    }

    /// Bring the fake DOM up to date with the feed (what a frame would do)
    pub fn sync_dom(&mut self) {
        self.host.content_len = self.grid.feed().len();
        self.host.columns_rendered = self.grid.capacity().columns as usize;
    }
}
