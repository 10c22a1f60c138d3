//! Whole-batch evaluation on the CPU.
//!
//! Output is instance-major: the result for instance `i`, vertex `v` lives at
//! `i * vertices.len() + v`, the order a `draw(0..V, 0..I)` call would emit.

use rayon::prelude::{
    IndexedParallelIterator, IntoParallelIterator, ParallelIterator,
};

use super::{
    instance::{InstanceAttributes, TransformedVertex, VertexInput},
    projection::{ClipProjection, WorldFromLocal},
    stage::transform_vertex,
};

/// Transform every vertex of every instance in parallel.
///
/// Each output depends only on its own (vertex, instance) pair, so results
/// are identical to [`transform_batch_sequential`] regardless of scheduling.
#[must_use]
pub fn transform_batch<L, P>(
    vertices: &[VertexInput],
    instances: &[InstanceAttributes],
    lookup: &L,
    object_index: u32,
    projection: &P,
) -> Vec<TransformedVertex>
where
    L: WorldFromLocal + ?Sized,
    P: ClipProjection + Sync + ?Sized,
{
    let world_from_local = lookup.world_from_local(object_index);
    let vertex_count = vertices.len();
    let mut out = Vec::new();
    (0..vertex_count * instances.len())
        .into_par_iter()
        .map(|index| {
            transform_vertex(
                &vertices[index % vertex_count],
                &instances[index / vertex_count],
                world_from_local,
                projection,
            )
        })
        .collect_into_vec(&mut out);
    out
}

/// Single-threaded equivalent of [`transform_batch`].
#[must_use]
pub fn transform_batch_sequential<L, P>(
    vertices: &[VertexInput],
    instances: &[InstanceAttributes],
    lookup: &L,
    object_index: u32,
    projection: &P,
) -> Vec<TransformedVertex>
where
    L: WorldFromLocal + ?Sized,
    P: ClipProjection + ?Sized,
{
    let world_from_local = lookup.world_from_local(object_index);
    instances
        .iter()
        .flat_map(|instance| {
            vertices.iter().map(move |vertex| {
                transform_vertex(vertex, instance, world_from_local, projection)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Quat, Vec3};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::transform::projection::{ObjectOrigin, ViewProjection};

    fn quad() -> Vec<VertexInput> {
        vec![
            VertexInput::new(-0.5, -0.5, 0.0),
            VertexInput::new(0.5, -0.5, 0.0),
            VertexInput::new(0.5, 0.5, 0.0),
            VertexInput::new(-0.5, 0.5, 0.0),
        ]
    }

    fn random_instances(count: usize) -> Vec<InstanceAttributes> {
        let mut rng = StdRng::seed_from_u64(42);
        (0..count)
            .map(|_| {
                InstanceAttributes::new(
                    Vec3::new(
                        rng.random_range(-20.0..20.0),
                        rng.random_range(-20.0..20.0),
                        rng.random_range(-20.0..20.0),
                    ),
                    rng.random_range(0.1..3.0),
                    Quat::from_rotation_arc(
                        Vec3::Z,
                        Vec3::new(
                            rng.random_range(-1.0..1.0),
                            rng.random_range(-1.0..1.0),
                            rng.random_range(0.1..1.0),
                        )
                        .normalize(),
                    ),
                    [rng.random(), rng.random(), rng.random(), 1.0],
                )
            })
            .collect()
    }

    #[test]
    fn parallel_matches_sequential_exactly() {
        let vertices = quad();
        let instances = random_instances(2000);
        let eye = Vec3::new(0.0, 0.0, 50.0);
        let projection = ViewProjection(
            Mat4::perspective_rh(0.8, 1.0, 0.1, 100.0)
                * Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y),
        );
        let parallel = transform_batch(
            &vertices,
            &instances,
            &ObjectOrigin,
            0,
            &projection,
        );
        let sequential = transform_batch_sequential(
            &vertices,
            &instances,
            &ObjectOrigin,
            0,
            &projection,
        );
        assert_eq!(parallel.len(), vertices.len() * instances.len());
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn output_is_instance_major() {
        let vertices = quad();
        let instances = random_instances(3);
        let out = transform_batch(
            &vertices,
            &instances,
            &ObjectOrigin,
            0,
            &ViewProjection::default(),
        );
        for (i, instance) in instances.iter().enumerate() {
            for (v, vertex) in vertices.iter().enumerate() {
                let expected = transform_vertex(
                    vertex,
                    instance,
                    Mat4::IDENTITY,
                    &ViewProjection::default(),
                );
                assert_eq!(out[i * vertices.len() + v], expected);
            }
        }
    }

    #[test]
    fn object_lookup_is_applied_to_every_vertex() {
        let vertices = quad();
        let instances = random_instances(4);
        let table = [
            Mat4::IDENTITY,
            Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0)),
        ];
        let out = transform_batch(
            &vertices,
            &instances,
            &table[..],
            1,
            &ViewProjection::default(),
        );
        for vertex in &out {
            let expected_z = vertex.world_position.z - 3.0;
            assert!((vertex.clip_position.z - expected_z).abs() < 1e-5);
        }
    }

    #[test]
    fn empty_inputs_produce_nothing() {
        let projection = ViewProjection::default();
        let none: Vec<InstanceAttributes> = Vec::new();
        let no_instances =
            transform_batch(&quad(), &none, &ObjectOrigin, 0, &projection);
        assert!(no_instances.is_empty());
        let no_vertices = transform_batch(
            &[],
            &random_instances(5),
            &ObjectOrigin,
            0,
            &projection,
        );
        assert!(no_vertices.is_empty());
    }
}
