//! GPU side of the instancing stage.
//!
//! One pipeline draws every instance of a base primitive in a single
//! instanced draw call. Draw submission and frame pacing stay with the
//! caller.

pub mod instanced;
pub(crate) mod pipeline_util;
pub mod primitive;

pub use instanced::InstancedPass;
pub use primitive::PrimitiveMesh;
