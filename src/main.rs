//! Headless demo: orient a ring of instances on the CPU and on the GPU.
//!
//! Usage: `splatter [options.toml]`

use std::{
    f32::consts::{FRAC_PI_2, TAU},
    path::Path,
    time::Instant,
};

use glam::{Quat, Vec3};
use rand::Rng;
use splatter::{
    camera::{Camera, CameraBinding},
    gpu::{
        render_context::RenderContext, shader_composer::ShaderComposer,
        texture::RenderTarget,
    },
    options::Options,
    renderer::{InstancedPass, PrimitiveMesh},
    transform::{self, InstanceAttributes, ObjectOrigin, ViewProjection},
    SplatterError,
};

/// Color of the instance placed at the world origin.
const CENTER_COLOR: [f32; 4] = [0.2, 0.4, 0.6, 1.0];

/// One instance at the origin facing the camera, then `count - 1` instances
/// on a ring, each flattened onto the ground plane and turned along the ring.
fn demo_batch(count: u32, rng: &mut impl Rng) -> Vec<InstanceAttributes> {
    let mut instances = Vec::with_capacity(count as usize);
    if count == 0 {
        return instances;
    }
    instances.push(InstanceAttributes::new(
        Vec3::ZERO,
        2.0,
        Quat::IDENTITY,
        CENTER_COLOR,
    ));

    let ring = count - 1;
    let flatten = Quat::from_rotation_x(-FRAC_PI_2);
    for i in 0..ring {
        let angle = i as f32 / ring as f32 * TAU;
        let translation = Vec3::new(
            angle.cos() * 6.0,
            angle.sin() * 6.0,
            rng.random_range(-1.0..1.0),
        );
        let heading = Quat::from_rotation_z(angle);
        let color = [
            0.5 + 0.5 * angle.cos(),
            0.5 + 0.5 * angle.sin(),
            rng.random(),
            1.0,
        ];
        instances.push(InstanceAttributes::new(
            translation,
            rng.random_range(0.5..1.5),
            flatten * heading,
            color,
        ));
    }
    instances
}

fn main() -> Result<(), SplatterError> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let options = match std::env::args_os().nth(1) {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };
    let render = &options.render;

    let mesh = PrimitiveMesh::from_shape(render.primitive);
    let instances = demo_batch(render.instance_count, &mut rand::rng());

    let context = pollster::block_on(RenderContext::headless(
        wgpu::TextureFormat::Rgba8Unorm,
        render.width,
        render.height,
    ))?;
    let camera = Camera::from_options(&options.camera, context.aspect());

    let start = Instant::now();
    let reference = transform::transform_batch(
        &mesh.expanded(),
        &instances,
        &ObjectOrigin,
        0,
        &ViewProjection(camera.build_matrix()),
    );
    let (min, max) = reference.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(min, max), vertex| {
            (min.min(vertex.world_position), max.max(vertex.world_position))
        },
    );
    log::info!(
        "CPU: {} vertices for {} instances in {:?}, world bounds {min} .. {max}",
        reference.len(),
        instances.len(),
        start.elapsed()
    );

    let mut shader_composer = ShaderComposer::new()?;
    let camera_binding = CameraBinding::new(&context.device, &camera);
    let mut pass = InstancedPass::new(
        &context,
        &camera_binding.layout,
        &mesh,
        &mut shader_composer,
    )?;
    pass.set_world_from_local(&context.queue, &ObjectOrigin, 0);
    let _ = pass.write_instances(&context.device, &context.queue, &instances);

    let target = RenderTarget::new(
        &context.device,
        context.width,
        context.height,
        context.format,
    );
    let mut encoder = context.create_encoder();
    pass.encode(
        &mut encoder,
        &target.view,
        render.clear(),
        &camera_binding.bind_group,
    );
    context.submit(encoder);

    let image = target.read_rgba8(&context.device, &context.queue)?;
    let background = image.pixel(0, 0);
    let covered = image
        .pixels
        .iter()
        .filter(|&&pixel| Some(pixel) != background)
        .count();
    log::info!(
        "GPU: {} instances drawn, {covered} of {} pixels covered, center {:?}",
        pass.instance_count(),
        image.pixels.len(),
        image.center()
    );
    Ok(())
}
