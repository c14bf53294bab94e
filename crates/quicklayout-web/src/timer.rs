//! Cancellable one-shot timer over `setTimeout`.

use crate::pending::PendingAction;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// At most one pending callback; arming again cancels the previous one.
///
/// One JS function lives as long as the timer and runs whatever action is
/// queued, so a cancelled action is dropped instead of leaking with its
/// never-called closure.
pub struct Timeout {
    window: Window,
    handle: Rc<Cell<Option<i32>>>,
    pending: PendingAction,
    callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(window: Window) -> Self {
        let handle = Rc::new(Cell::new(None));
        let pending = PendingAction::new();

        let callback = {
            let handle = Rc::clone(&handle);
            let pending = pending.clone();
            Closure::<dyn FnMut()>::new(move || {
                handle.set(None);
                pending.run();
            })
        };

        Self {
            window,
            handle,
            pending,
            callback,
        }
    }

    /// Run `action` after `delay`, replacing any pending action.
    /// Sub-millisecond remainders round up.
    pub fn arm<F>(&self, delay: Duration, action: F) -> Result<(), JsValue>
    where
        F: FnOnce() + 'static,
    {
        self.cancel();
        self.pending.set(action);

        let millis = delay.as_nanos().div_ceil(1_000_000);
        let millis = i32::try_from(millis).unwrap_or(i32::MAX);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                millis,
            )
            .inspect_err(|_| self.pending.clear())?;
        self.handle.set(Some(handle));
        Ok(())
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.handle.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        self.pending.clear();
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
