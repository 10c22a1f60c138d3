use serde::{Deserialize, Serialize};

/// Base shape every instance is drawn with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveShape {
    /// Unit quad in the xy plane (splats, billboards).
    #[default]
    Quad,
    /// Two crossed quads (foliage-style impostors).
    Cross,
    /// Unit octahedron (particles).
    Octahedron,
}

/// Target size, clear color and demo batch parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Color the target is cleared to before drawing.
    pub clear_color: [f64; 4],
    /// Base primitive shape.
    pub primitive: PrimitiveShape,
    /// Number of instances in the demo batch.
    pub instance_count: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            primitive: PrimitiveShape::Quad,
            instance_count: 256,
        }
    }
}

impl RenderOptions {
    /// Clear color as a wgpu color.
    #[must_use]
    pub fn clear(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color { r, g, b, a }
    }
}
