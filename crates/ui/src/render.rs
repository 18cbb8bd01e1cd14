//! Grid renderer
//!
//! Draws the feed as one `div.box` per cell. The feed only grows between
//! resets, so a frame appends the cells it has not drawn yet; a new feed
//! epoch (flush or reset) rebuilds from scratch.

use gridfeed_core::{Capacity, Cell, GridView};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

pub const BOX_CLASS: &str = "box";
pub const BOX_SELECTOR: &str = ".box";
pub const ACTIVATED_CLASS: &str = "clicked";
pub const INDEX_ATTR: &str = "data-index";

pub struct GridRenderer {
    document: Document,
    grid: Element,
    loading: Element,
    count: Option<Element>,
    capacity: Option<Element>,
    drawn: usize,
    epoch: Option<u64>,
}

impl GridRenderer {
    pub fn new(
        document: Document,
        grid: Element,
        loading: Element,
        count: Option<Element>,
        capacity: Option<Element>,
    ) -> Self {
        Self {
            document,
            grid,
            loading,
            count,
            capacity,
            drawn: 0,
            epoch: None,
        }
    }

    pub fn draw(&mut self, view: GridView<'_>) -> Result<(), JsValue> {
        if self.epoch != Some(view.epoch) || view.cells.len() < self.drawn {
            self.grid.set_inner_html("");
            self.drawn = 0;
            self.epoch = Some(view.epoch);
        }

        if view.cells.len() > self.drawn {
            let fragment = self.document.create_document_fragment();
            for (index, cell) in view.cells.iter().enumerate().skip(self.drawn) {
                let el = self.box_element(index, cell)?;
                fragment.append_child(&el)?;
            }
            self.grid.append_child(&fragment)?;
            self.drawn = view.cells.len();
        }

        self.loading
            .class_list()
            .toggle_with_force("hidden", !view.loading)?;

        if let Some(el) = &self.count {
            el.set_text_content(Some(&view.cells.len().to_string()));
        }
        if let Some(el) = &self.capacity {
            el.set_text_content(Some(&capacity_label(view.capacity)));
        }
        Ok(())
    }

    fn box_element(&self, index: usize, cell: &Cell) -> Result<Element, JsValue> {
        let el = self.document.create_element("div")?;
        el.set_class_name(&box_class(cell));
        el.set_attribute(INDEX_ATTR, &index.to_string())?;
        el.set_attribute("style", &format!("background-color: {}", cell.color))?;
        Ok(el)
    }
}

fn box_class(cell: &Cell) -> String {
    if cell.activated {
        format!("{BOX_CLASS} {ACTIVATED_CLASS}")
    } else {
        BOX_CLASS.to_string()
    }
}

fn capacity_label(capacity: Capacity) -> String {
    format!("{}x{}", capacity.columns, capacity.rows)
}

/// Cell index carried by a box's `data-index` attribute
fn parse_index(attr: Option<String>) -> Option<usize> {
    attr?.trim().parse().ok()
}

/// Cell a grid click lands on.
///
/// `hit` is the `data-index` attribute of the nearest box at or above the
/// click target, or `None` when the click missed every box. Indices past
/// the end of the feed (a box drawn before a reset emptied it) are ignored.
pub fn clicked_index(hit: Option<Option<String>>, len: usize) -> Option<usize> {
    parse_index(hit?).filter(|&index| index < len)
}
