//! WebGPU rendering module
//!
//! Uses SDF (Signed Distance Fields) ray marching for the whole scene in the
//! fragment shader.

pub mod camera;
pub mod sdf_pipeline;

pub use camera::CameraBasis;
pub use sdf_pipeline::SdfRenderState;

use thiserror::Error;

/// Failures while bringing up the GPU
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
