//! GPU resource management utilities.
//!
//! Provides wgpu device initialization, growable buffers, shader composition
//! and offscreen render targets.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// wgpu device and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Offscreen render-target textures and pixel readback.
pub mod texture;
