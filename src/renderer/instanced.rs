//! Instanced draw of one base primitive.
//!
//! Binding convention:
//! - vertex slot 0: [`VertexInput`] per vertex (location 0)
//! - vertex slot 1: [`InstanceAttributes`] per instance (locations 1..=3)
//! - group(0): camera uniform
//! - group(1): object uniform (world-from-local)

use wgpu::util::DeviceExt;

use super::{pipeline_util, primitive::PrimitiveMesh};
use crate::{
    error::SplatterError,
    gpu::{
        dynamic_buffer::TypedBuffer,
        render_context::RenderContext,
        shader_composer::{ShaderComposer, INSTANCING_SHADER},
    },
    transform::{InstanceAttributes, VertexInput, WorldFromLocal},
};

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];

// 1: pos_scale, 2: rotation, 3: color
const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![1 => Float32x4, 2 => Float32x4, 3 => Float32x4];

/// Initial instance buffer capacity, in instances.
const INITIAL_INSTANCE_CAPACITY: usize = 1024;

/// Per-vertex buffer layout of the base primitive.
#[must_use]
pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<VertexInput>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// Per-instance buffer layout of [`InstanceAttributes`].
#[must_use]
pub fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<InstanceAttributes>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRIBUTES,
    }
}

/// Pipeline, base primitive buffers and instance buffer for one batch.
pub struct InstancedPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    draw_count: u32,
    instance_buffer: TypedBuffer<InstanceAttributes>,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    instance_count: u32,
}

impl InstancedPass {
    /// Build the pipeline for `mesh`, rendering into `context.format`.
    ///
    /// The object transform starts as identity.
    ///
    /// # Errors
    ///
    /// Returns [`SplatterError::Shader`] if the instancing shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        mesh: &PrimitiveMesh,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, SplatterError> {
        let device = &context.device;
        let shader = shader_composer.compose(
            device,
            "Instancing Shader",
            &INSTANCING_SHADER,
        )?;

        let object_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            size_of::<[[f32; 4]; 4]>() as u64,
                        ),
                    },
                    count: None,
                }],
            },
        );
        let object_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Object Buffer"),
                contents: bytemuck::cast_slice(
                    &glam::Mat4::IDENTITY.to_cols_array(),
                ),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let object_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Object Bind Group"),
                layout: &object_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object_buffer.as_entire_binding(),
                }],
            });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Instancing Pipeline Layout"),
                bind_group_layouts: &[camera_layout, &object_layout],
                push_constant_ranges: &[],
            });

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Instancing Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout(), instance_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::color_targets(context.format),
                    compilation_options: Default::default(),
                }),
                primitive: pipeline_util::primitive_state(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Primitive Vertex Buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = mesh.indices.as_ref().map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Primitive Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let instance_buffer = TypedBuffer::with_capacity(
            device,
            "Instance Buffer",
            INITIAL_INSTANCE_CAPACITY,
            wgpu::BufferUsages::VERTEX,
        );

        log::debug!(
            "Created instancing pipeline ({} vertices, {})",
            mesh.vertices.len(),
            if index_buffer.is_some() {
                "indexed"
            } else {
                "non-indexed"
            }
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            draw_count: mesh.draw_count(),
            instance_buffer,
            object_buffer,
            object_bind_group,
            instance_count: 0,
        })
    }

    /// Upload the world-from-local transform `lookup` returns for
    /// `object_index`.
    pub fn set_world_from_local<L: WorldFromLocal + ?Sized>(
        &self,
        queue: &wgpu::Queue,
        lookup: &L,
        object_index: u32,
    ) {
        let matrix = lookup.world_from_local(object_index);
        queue.write_buffer(
            &self.object_buffer,
            0,
            bytemuck::cast_slice(&matrix.to_cols_array()),
        );
    }

    /// Write instances to the GPU buffer, growing it when needed.
    ///
    /// Instances are uploaded as given; rotations are never normalized.
    /// Returns `true` if the underlying buffer was reallocated.
    pub fn write_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[InstanceAttributes],
    ) -> bool {
        if log::log_enabled!(log::Level::Debug) {
            let non_unit = instances
                .iter()
                .filter(|instance| !instance.has_unit_rotation())
                .count();
            if non_unit > 0 {
                log::debug!(
                    "{non_unit} of {} instances have a non-unit rotation",
                    instances.len()
                );
            }
        }
        let reallocated = self.instance_buffer.write(device, queue, instances);
        self.instance_count = instances.len() as u32;
        reallocated
    }

    /// Number of instances drawn by [`Self::draw`].
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Issue the instanced draw. Does nothing without instances.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        if self.instance_count == 0 || self.draw_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.object_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.used_slice());
        match &self.index_buffer {
            Some(index_buffer) => {
                render_pass.set_index_buffer(
                    index_buffer.slice(..),
                    wgpu::IndexFormat::Uint16,
                );
                render_pass.draw_indexed(
                    0..self.draw_count,
                    0,
                    0..self.instance_count,
                );
            }
            None => {
                render_pass.draw(0..self.draw_count, 0..self.instance_count);
            }
        }
    }

    /// Record a render pass that clears `view` to `clear` and draws the
    /// batch into it.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear: wgpu::Color,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        let mut render_pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Instancing Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });
        self.draw(&mut render_pass, camera_bind_group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layout_matches_record() {
        let layout = instance_layout();
        assert_eq!(layout.array_stride, 48);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        let placed: Vec<(u32, u64)> = layout
            .attributes
            .iter()
            .map(|attr| (attr.shader_location, attr.offset))
            .collect();
        assert_eq!(placed, vec![(1, 0), (2, 16), (3, 32)]);
    }

    #[test]
    fn vertex_layout_is_position_only() {
        let layout = vertex_layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }
}
