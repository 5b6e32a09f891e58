//! Scoped DOM event listener

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

/// An `addEventListener` registration removed again on drop
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    /// Register `callback` for `event_type` on `target`.
    ///
    /// Returns `None` (after logging) if the browser rejects the
    /// registration.
    pub fn new<F>(target: &EventTarget, event_type: &'static str, callback: F) -> Option<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(callback);
        match target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
        {
            Ok(()) => Some(Self {
                target: target.clone(),
                event_type,
                callback,
            }),
            Err(e) => {
                log::warn!("Failed to listen for {event_type}: {e:?}");
                None
            }
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref());
    }
}
