//! Timeouts and animation frames owned by the mounted view
//!
//! Handles are tracked until they fire so teardown can cancel whatever is
//! still pending.

use std::collections::HashMap;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub struct Timers {
    window: Window,
    next_id: u64,
    timeouts: HashMap<u64, i32>,
    frame: Option<i32>,
}

impl Timers {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_id: 0,
            timeouts: HashMap::new(),
            frame: None,
        }
    }

    /// Arm a one-shot timeout. `callback` receives the id that
    /// [`fired`](Self::fired) must be told about when it runs.
    pub fn set_timeout<F>(&mut self, delay: Duration, callback: F) -> Result<u64, JsValue>
    where
        F: FnOnce(u64) + 'static,
    {
        self.next_id += 1;
        let id = self.next_id;
        let closure = Closure::once_into_js(move || callback(id));
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.unchecked_ref(),
                timeout_millis(delay),
            )?;
        self.timeouts.insert(id, handle);
        Ok(id)
    }

    pub fn fired(&mut self, id: u64) {
        self.timeouts.remove(&id);
    }

    /// Request one animation frame; a no-op while one is already pending
    pub fn request_frame<F>(&mut self, callback: F) -> Result<(), JsValue>
    where
        F: FnOnce() + 'static,
    {
        if self.frame.is_some() {
            return Ok(());
        }
        let closure = Closure::once_into_js(callback);
        let handle = self.window.request_animation_frame(closure.unchecked_ref())?;
        self.frame = Some(handle);
        Ok(())
    }

    pub fn frame_fired(&mut self) {
        self.frame = None;
    }

    pub fn pending(&self) -> usize {
        self.timeouts.len() + usize::from(self.frame.is_some())
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.timeouts.drain() {
            self.window.clear_timeout_with_handle(handle);
        }
        if let Some(handle) = self.frame.take() {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                tracing::warn!(error = ?e, "Failed to cancel animation frame");
            }
        }
    }
}

/// `setTimeout` takes whole milliseconds; round up so a timer never fires
/// before the wait it was armed for.
fn timeout_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_micros().div_ceil(1000)).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_rounds_up() {
        assert_eq!(timeout_millis(Duration::ZERO), 0);
        assert_eq!(timeout_millis(Duration::from_micros(600)), 1);
        assert_eq!(timeout_millis(Duration::from_millis(500)), 500);
        assert_eq!(timeout_millis(Duration::from_micros(1_799_600)), 1800);
    }

    #[test]
    fn test_timeout_saturates() {
        assert_eq!(timeout_millis(Duration::from_secs(u64::MAX)), i32::MAX);
    }
}
