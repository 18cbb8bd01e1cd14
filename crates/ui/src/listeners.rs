//! Scoped DOM event subscriptions
//!
//! Every listener registered through [`Listeners`] is removed again when the
//! guard is dropped, so unmounting the view leaves nothing attached to the
//! window or the container.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

struct Binding {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

#[derive(Default)]
pub struct Listeners {
    bound: Vec<Binding>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to `event` on `target` for the guard's lifetime
    pub fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.bound.push(Binding {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for binding in self.bound.drain(..) {
            let removed = binding
                .target
                .remove_event_listener_with_callback(binding.event, binding.callback.as_ref().unchecked_ref());
            if let Err(e) = removed {
                tracing::warn!(error = ?e, event = binding.event, "Failed to remove listener");
            }
        }
    }
}
