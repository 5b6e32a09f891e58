//! Platform abstraction layer
//!
//! Browser registrations are owned values: dropping an [`EventListener`] or
//! a [`FrameLoop`] unregisters its callback, so tearing down a session is
//! just dropping it.

pub mod fps;

#[cfg(target_arch = "wasm32")]
mod frame_loop;
#[cfg(target_arch = "wasm32")]
mod listener;

pub use fps::FpsCounter;

#[cfg(target_arch = "wasm32")]
pub use frame_loop::FrameLoop;
#[cfg(target_arch = "wasm32")]
pub use listener::EventListener;
