//! Boundary between the transform stage and the scene/camera collaborators.
//!
//! The stage never builds these matrices itself. It asks a [`WorldFromLocal`]
//! for the object's transform and a [`ClipProjection`] for the final clip
//! position; row/column convention and handedness belong to the implementor.

use glam::{Mat4, Vec4};

/// Lookup of an object's world-from-local transform by object index.
pub trait WorldFromLocal {
    /// The transform for `object_index`.
    fn world_from_local(&self, object_index: u32) -> Mat4;
}

/// Every object sits at the world origin with no rotation or scale.
///
/// This is the lookup the instancing pass uses: instance positions are
/// already in world space once placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectOrigin;

impl WorldFromLocal for ObjectOrigin {
    fn world_from_local(&self, _object_index: u32) -> Mat4 {
        Mat4::IDENTITY
    }
}

/// Indexed table of transforms. Indices past the end resolve to identity.
impl WorldFromLocal for [Mat4] {
    fn world_from_local(&self, object_index: u32) -> Mat4 {
        self.get(object_index as usize)
            .copied()
            .unwrap_or(Mat4::IDENTITY)
    }
}

/// World-to-clip projection.
pub trait ClipProjection {
    /// Project a homogeneous position (`w = 1`) through `world_from_local`
    /// and the view-projection into clip space.
    fn project(&self, world_from_local: Mat4, position: Vec4) -> Vec4;
}

/// A fixed view-projection matrix (`clip = view_proj * world_from_local * p`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection(pub Mat4);

impl Default for ViewProjection {
    fn default() -> Self {
        Self(Mat4::IDENTITY)
    }
}

impl ClipProjection for ViewProjection {
    fn project(&self, world_from_local: Mat4, position: Vec4) -> Vec4 {
        self.0 * (world_from_local * position)
    }
}
