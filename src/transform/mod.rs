//! CPU reference of the per-vertex instancing transform.
//!
//! Mirrors `assets/shaders/raster/instancing.wgsl` operation for operation:
//! rotate the primitive-local position by the instance quaternion, apply the
//! uniform scale, translate, then hand the homogeneous world position to an
//! external projection. Color is carried through untouched.
//!
//! Every function here is pure. Nothing is validated or clamped; NaN and
//! infinities propagate to the output.

/// Parallel CPU evaluation over a whole instance batch.
pub mod batch;
/// Fragment-stage color pass-through.
pub mod color;
/// Fixed-layout vertex and instance records.
pub mod instance;
/// Uniform scale and translation into world space.
pub mod placement;
/// World-from-local lookup and world-to-clip projection boundaries.
pub mod projection;
/// Vector-form quaternion rotation.
pub mod quat;
/// Full per-vertex stage composition.
pub mod stage;

pub use batch::{transform_batch, transform_batch_sequential};
pub use color::pass_through;
pub use instance::{InstanceAttributes, TransformedVertex, VertexInput};
pub use placement::place;
pub use projection::{
    ClipProjection, ObjectOrigin, ViewProjection, WorldFromLocal,
};
pub use quat::rotate;
pub use stage::{orient, transform_vertex};
