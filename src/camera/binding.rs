use wgpu::util::DeviceExt;

use super::core::{Camera, CameraUniform};

/// Camera uniform buffer bound at group(0) of the instancing pipeline.
pub struct CameraBinding {
    /// The uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Layout of the camera bind group.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group exposing `buffer` at binding 0.
    pub bind_group: wgpu::BindGroup,
}

impl CameraBinding {
    /// Create the camera uniform buffer and bind group for `camera`.
    #[must_use]
    pub fn new(device: &wgpu::Device, camera: &Camera) -> Self {
        let uniform = CameraUniform::from_camera(camera);
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            size_of::<CameraUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }
}
