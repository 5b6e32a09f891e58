//! Cancellable `requestAnimationFrame` loop

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Re-arms itself every frame until dropped.
///
/// Must not be dropped from inside its own frame callback.
pub struct FrameLoop {
    window: Window,
    /// Pending request, if any
    handle: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

fn request(window: &Window, callback: &FrameCallback) -> Option<i32> {
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {e:?}");
            None
        }
    }
}

impl FrameLoop {
    /// Start calling `on_frame` with the rAF timestamp (milliseconds)
    pub fn start<F>(window: Window, mut on_frame: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        let handle = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        // Weak so the closure does not keep itself alive
        let this_callback = Rc::downgrade(&callback);
        let this_handle = handle.clone();
        let this_window = window.clone();
        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            this_handle.set(None);
            on_frame(time);

            if let Some(callback) = this_callback.upgrade() {
                if let Some(closure) = callback.borrow().as_ref() {
                    this_handle.set(request(&this_window, closure));
                }
            }
        }));

        if let Some(closure) = callback.borrow().as_ref() {
            handle.set(request(&window, closure));
        }

        Self {
            window,
            handle,
            callback,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.get().is_some()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}
