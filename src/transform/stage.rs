use glam::{Mat4, Vec3};

use super::{
    color::pass_through,
    instance::{InstanceAttributes, TransformedVertex, VertexInput},
    placement::place,
    projection::ClipProjection,
    quat::rotate,
};

/// Rotate, scale and translate a local position into world space for one
/// instance.
#[inline]
#[must_use]
pub fn orient(local: Vec3, instance: &InstanceAttributes) -> Vec3 {
    let rotated = rotate(local, instance.rotation_vec());
    place(rotated, instance.pos_scale_vec())
}

/// Run the whole vertex stage for one (vertex, instance) pair.
#[must_use]
pub fn transform_vertex<P: ClipProjection + ?Sized>(
    vertex: &VertexInput,
    instance: &InstanceAttributes,
    world_from_local: Mat4,
    projection: &P,
) -> TransformedVertex {
    let world_position = orient(vertex.position(), instance);
    TransformedVertex {
        world_position,
        clip_position: projection
            .project(world_from_local, world_position.extend(1.0)),
        color: pass_through(instance.color_vec()),
    }
}
