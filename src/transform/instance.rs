use glam::{Quat, Vec3, Vec4};

/// Tolerance on `|‖q‖ - 1|` used by
/// [`InstanceAttributes::has_unit_rotation`].
pub const UNIT_ROTATION_TOLERANCE: f32 = 1e-3;

/// Per-vertex input: one vertex of the shared base primitive.
/// Must match the `Vertex` location 0 of `instancing.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VertexInput {
    /// Position in the primitive's local frame.
    pub local_position: [f32; 3],
}

impl VertexInput {
    /// Vertex at the given local position.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            local_position: [x, y, z],
        }
    }

    /// Local position as a vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.local_position)
    }
}

/// Per-instance data for one drawn primitive.
/// Must match the `Vertex` locations 1..=3 of `instancing.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceAttributes {
    /// xyz = world translation, w = uniform scale
    pub pos_scale: [f32; 4],
    /// Unit quaternion, xyz = vector part, w = scalar part
    pub rotation: [f32; 4],
    /// Unpremultiplied RGBA
    pub color: [f32; 4],
}

impl InstanceAttributes {
    /// Pack a translation, uniform scale, rotation and color.
    ///
    /// The rotation is stored as given. Callers own normalization.
    #[must_use]
    pub fn new(
        translation: Vec3,
        scale: f32,
        rotation: Quat,
        color: [f32; 4],
    ) -> Self {
        Self {
            pos_scale: translation.extend(scale).to_array(),
            rotation: rotation.to_array(),
            color,
        }
    }

    /// World translation (`pos_scale.xyz`).
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.pos_scale_vec().truncate()
    }

    /// Uniform scale (`pos_scale.w`).
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.pos_scale[3]
    }

    /// `pos_scale` as a vector.
    #[must_use]
    pub fn pos_scale_vec(&self) -> Vec4 {
        Vec4::from_array(self.pos_scale)
    }

    /// Raw rotation quaternion as a vector (`x, y, z, w`).
    #[must_use]
    pub fn rotation_vec(&self) -> Vec4 {
        Vec4::from_array(self.rotation)
    }

    /// Color as a vector.
    #[must_use]
    pub fn color_vec(&self) -> Vec4 {
        Vec4::from_array(self.color)
    }

    /// `true` when the stored rotation is within
    /// [`UNIT_ROTATION_TOLERANCE`] of unit norm. NaN is never unit.
    #[must_use]
    pub fn has_unit_rotation(&self) -> bool {
        (self.rotation_vec().length() - 1.0).abs() <= UNIT_ROTATION_TOLERANCE
    }
}

/// Output of the vertex stage for one (instance, vertex) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformedVertex {
    /// Position after rotation, scale and translation.
    pub world_position: Vec3,
    /// Projected homogeneous position handed to the rasterizer.
    pub clip_position: Vec4,
    /// Instance color, unmodified.
    pub color: Vec4,
}
