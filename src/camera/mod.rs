//! Perspective camera supplying the view-projection transform.
//!
//! The transform stage only sees the camera through
//! [`ClipProjection`](crate::transform::ClipProjection); this module is the
//! concrete collaborator used by the bundled pass and binary.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Camera uniform buffer and bind group.
pub mod binding;

pub use binding::CameraBinding;
pub use self::core::{Camera, CameraUniform};
