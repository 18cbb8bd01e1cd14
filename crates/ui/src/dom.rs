use std::time::Duration;

use gridfeed_core::{Deferred, GridView, ScrollMetrics, ViewHost};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement, Window};

use crate::render::GridRenderer;

pub const HEADER_ID: &str = "counter-wrapper";
pub const CONTAINER_ID: &str = "infinite-scrolling";
pub const GRID_ID: &str = "grid";
pub const LOADING_ID: &str = "loading";
pub const COUNT_ID: &str = "box-count";
pub const CAPACITY_ID: &str = "box-capacity";
pub const FLUSH_BUTTON_ID: &str = "flush-boxes";
pub const RESET_BUTTON_ID: &str = "reset-boxes";

/// Get document helper
pub fn get_document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Look up a required element by id
pub fn element(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{id} not found")))
}

fn html_element(doc: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    element(doc, id)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

/// [`ViewHost`] over the page's DOM.
///
/// Scheduled tasks and render requests are collected here and armed by the
/// app after each controller call returns.
pub struct DomHost {
    window: Window,
    header: HtmlElement,
    container: HtmlElement,
    renderer: GridRenderer,
    outbox: Vec<(Duration, Deferred)>,
    render_requested: bool,
}

impl DomHost {
    pub fn new(window: Window, doc: &Document) -> Result<Self, JsValue> {
        let renderer = GridRenderer::new(
            doc.clone(),
            element(doc, GRID_ID)?,
            element(doc, LOADING_ID)?,
            doc.get_element_by_id(COUNT_ID),
            doc.get_element_by_id(CAPACITY_ID),
        );
        Ok(Self {
            window,
            header: html_element(doc, HEADER_ID)?,
            container: html_element(doc, CONTAINER_ID)?,
            renderer,
            outbox: Vec::new(),
            render_requested: false,
        })
    }

    pub const fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Tasks scheduled since the last call
    pub fn take_scheduled(&mut self) -> Vec<(Duration, Deferred)> {
        std::mem::take(&mut self.outbox)
    }

    pub fn take_render_request(&mut self) -> bool {
        std::mem::replace(&mut self.render_requested, false)
    }

    /// Frame callback body
    pub fn draw(&mut self, view: GridView<'_>) {
        if let Err(e) = self.renderer.draw(view) {
            tracing::warn!(error = ?e, "Grid render failed");
        }
    }
}

impl ViewHost for DomHost {
    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn header_height(&self) -> f64 {
        f64::from(self.header.offset_height())
    }

    fn container_size(&self) -> (f64, f64) {
        (
            f64::from(self.container.offset_width()),
            f64::from(self.container.offset_height()),
        )
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: f64::from(self.container.scroll_top()),
            client_height: f64::from(self.container.client_height()),
            scroll_height: f64::from(self.container.scroll_height()),
        }
    }

    fn now(&self) -> Duration {
        let ms = self
            .window
            .performance()
            .map_or(0.0, |p| p.now())
            .max(0.0);
        Duration::from_secs_f64(ms / 1000.0)
    }

    fn set_container_height(&mut self, px: f64) {
        if let Err(e) = self.container.style().set_property("height", &format!("{px}px")) {
            tracing::warn!(error = ?e, "Failed to size scroll container");
        }
    }

    fn scroll_to_top(&mut self) {
        self.container.scroll_to_with_x_and_y(0.0, 0.0);
    }

    fn render_now(&mut self, view: GridView<'_>) {
        self.render_requested = false;
        self.draw(view);
    }

    fn request_render(&mut self) {
        self.render_requested = true;
    }

    fn schedule(&mut self, delay: Duration, task: Deferred) {
        self.outbox.push((delay, task));
    }
}
