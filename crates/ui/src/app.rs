//! The mounted view: controller, DOM host, listeners and timers
//!
//! Every DOM callback goes through [`App::dispatch`], which runs one
//! controller entry point and then arms the timeouts and the animation frame
//! the controller asked for. Callbacks hold a `Weak` back-reference so an
//! unmounted app is simply skipped.

use std::cell::RefCell;
use std::rc::Rc;

use gridfeed_core::{GridConfig, GridController};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, Event};

use crate::dom::{self, DomHost};
use crate::listeners::Listeners;
use crate::render::{clicked_index, ACTIVATED_CLASS, BOX_SELECTOR, INDEX_ATTR};
use crate::timers::Timers;

pub struct App {
    controller: RefCell<GridController>,
    host: RefCell<DomHost>,
    timers: RefCell<Timers>,
    listeners: RefCell<Listeners>,
}

impl App {
    pub fn new(config: GridConfig) -> Result<Rc<Self>, JsValue> {
        let window = window().ok_or("no global `window` exists")?;
        let doc = window.document().ok_or("should have a document on window")?;
        let host = DomHost::new(window.clone(), &doc)?;

        Ok(Rc::new(Self {
            controller: RefCell::new(GridController::new(config)),
            host: RefCell::new(host),
            timers: RefCell::new(Timers::new(window)),
            listeners: RefCell::new(Listeners::new()),
        }))
    }

    pub fn mount(self: &Rc<Self>) -> Result<(), JsValue> {
        self.bind_events()?;
        self.dispatch(|grid, host| grid.mount(host));
        Ok(())
    }

    pub fn teardown(&self) {
        // Dropping the old guard detaches every listener
        drop(std::mem::take(&mut *self.listeners.borrow_mut()));

        let mut timers = self.timers.borrow_mut();
        let pending = timers.pending();
        timers.cancel_all();
        tracing::debug!(pending, "Cancelled pending timers");
    }

    fn bind_events(self: &Rc<Self>) -> Result<(), JsValue> {
        let window = window().ok_or("no window")?;
        let doc = dom::get_document().ok_or("no document")?;
        let container = self.host.borrow().container().clone();
        let grid_el = dom::element(&doc, dom::GRID_ID)?;
        let mut listeners = self.listeners.borrow_mut();

        let weak = Rc::downgrade(self);
        listeners.listen(&window, "resize", move |_| {
            if let Some(app) = weak.upgrade() {
                app.dispatch(|grid, host| grid.on_resize(host));
            }
        })?;

        let weak = Rc::downgrade(self);
        listeners.listen(&container, "scroll", move |_| {
            if let Some(app) = weak.upgrade() {
                app.dispatch(|grid, host| {
                    grid.on_scroll(host);
                });
            }
        })?;

        let weak = Rc::downgrade(self);
        listeners.listen(&grid_el, "click", move |event| {
            if let Some(app) = weak.upgrade() {
                app.on_box_click(&event);
            }
        })?;

        // Header buttons are optional in custom pages
        if let Some(button) = doc.get_element_by_id(dom::FLUSH_BUTTON_ID) {
            let weak = Rc::downgrade(self);
            listeners.listen(&button, "click", move |_| {
                if let Some(app) = weak.upgrade() {
                    app.dispatch(|grid, host| {
                        grid.flush_boxes(host);
                    });
                }
            })?;
        }
        if let Some(button) = doc.get_element_by_id(dom::RESET_BUTTON_ID) {
            let weak = Rc::downgrade(self);
            listeners.listen(&button, "click", move |_| {
                if let Some(app) = weak.upgrade() {
                    app.dispatch(|grid, host| grid.reset_boxes(host));
                }
            })?;
        }

        Ok(())
    }

    /// Delegated click on the grid: toggle the box under the pointer
    fn on_box_click(&self, event: &Event) {
        let hit = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|target| target.closest(BOX_SELECTOR).ok().flatten());
        let len = self.controller.borrow().feed().len();
        let index = clicked_index(hit.as_ref().map(|el| el.get_attribute(INDEX_ATTR)), len);
        let (Some(el), Some(index)) = (hit, index) else {
            return;
        };

        let Some(activated) = self.controller.borrow_mut().toggle_activation(index) else {
            return;
        };
        if let Err(e) = el.class_list().toggle_with_force(ACTIVATED_CLASS, activated) {
            tracing::warn!(error = ?e, index, activated, "Failed to toggle box class");
        }
    }

    /// Run one controller entry point, then arm whatever it scheduled
    fn dispatch<F>(self: &Rc<Self>, f: F)
    where
        F: FnOnce(&mut GridController, &mut DomHost),
    {
        {
            let mut grid = self.controller.borrow_mut();
            let mut host = self.host.borrow_mut();
            f(&mut *grid, &mut *host);
        }
        self.arm();
    }

    fn arm(self: &Rc<Self>) {
        let (scheduled, render) = {
            let mut host = self.host.borrow_mut();
            (host.take_scheduled(), host.take_render_request())
        };
        let mut timers = self.timers.borrow_mut();

        for (delay, task) in scheduled {
            let weak = Rc::downgrade(self);
            let armed = timers.set_timeout(delay, move |id| {
                if let Some(app) = weak.upgrade() {
                    app.timers.borrow_mut().fired(id);
                    app.dispatch(|grid, host| grid.run_deferred(task, host));
                }
            });
            if let Err(e) = armed {
                tracing::warn!(error = ?e, ?task, "Failed to arm timer");
            }
        }

        if render {
            let weak = Rc::downgrade(self);
            let requested = timers.request_frame(move || {
                if let Some(app) = weak.upgrade() {
                    app.timers.borrow_mut().frame_fired();
                    app.draw();
                }
            });
            if let Err(e) = requested {
                tracing::warn!(error = ?e, "Failed to request animation frame");
            }
        }
    }

    fn draw(&self) {
        let grid = self.controller.borrow();
        self.host.borrow_mut().draw(grid.view());
    }
}
