mod app;
mod config;
mod dom;
mod listeners;
mod render;
mod timers;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::app::App;

thread_local! {
    /// The mounted view; one per page
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    mount()
}

/// Mount the grid into the page. A previously mounted view is torn down
/// first.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    unmount();

    let config = config::load();
    let app = App::new(config)?;
    app.mount()?;

    APP.with(|slot| *slot.borrow_mut() = Some(app));
    tracing::info!("Grid mounted");
    Ok(())
}

/// Remove every listener, cancel pending timers and drop the view
#[wasm_bindgen]
pub fn unmount() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    if let Some(app) = app {
        app.teardown();
        tracing::info!("Grid unmounted");
    }
}
