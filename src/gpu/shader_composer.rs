use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::SplatterError;

/// Instanced raster shader: `vs_main` (orient + project) and `fs_main`
/// (color pass-through).
pub const INSTANCING_SHADER: ShaderSource = ShaderSource {
    source: include_str!("../../assets/shaders/raster/instancing.wgsl"),
    file_path: "raster/instancing.wgsl",
};

/// Shared modules importable as `splatter::<name>`, in dependency order.
const MODULES: &[ShaderSource] = &[
    ShaderSource {
        source: include_str!("../../assets/shaders/modules/quat.wgsl"),
        file_path: "modules/quat.wgsl",
    },
    ShaderSource {
        source: include_str!("../../assets/shaders/modules/camera.wgsl"),
        file_path: "modules/camera.wgsl",
    },
];

/// WGSL source text paired with the path used in diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSource {
    /// WGSL text, possibly with `#import` directives.
    pub source: &'static str,
    /// Path reported in composer errors.
    pub file_path: &'static str,
}

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// The shared modules are registered once at construction; consuming
/// shaders pull them in with `#import splatter::quat::rotate` and the like.
/// Composition yields `naga::Module` IR directly.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`SplatterError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, SplatterError> {
        let mut composer = Composer::default();
        for module in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: module.source,
                    file_path: module.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    SplatterError::Shader(format!(
                        "failed to register '{}': {e:?}",
                        module.file_path
                    ))
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose `shader` into naga IR and validate it.
    ///
    /// Needs no GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`SplatterError::Shader`] on composition or validation
    /// failure.
    pub fn compose_naga(
        &mut self,
        shader: &ShaderSource,
    ) -> Result<naga::Module, SplatterError> {
        let module = self
            .composer
            .make_naga_module(NagaModuleDescriptor {
                source: shader.source,
                file_path: shader.file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                SplatterError::Shader(format!(
                    "failed to compose '{}': {e}",
                    shader.file_path
                ))
            })?;

        let _ = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .map_err(|e| {
            SplatterError::Shader(format!(
                "'{}' failed validation: {e:?}",
                shader.file_path
            ))
        })?;
        Ok(module)
    }

    /// Compose `shader` into a `wgpu::ShaderModule` ready for pipeline
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`SplatterError::Shader`] on composition or validation
    /// failure.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        shader: &ShaderSource,
    ) -> Result<wgpu::ShaderModule, SplatterError> {
        let module = self.compose_naga(shader)?;
        log::debug!("Composed shader '{}'", shader.file_path);
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_point<'a>(
        module: &'a naga::Module,
        name: &str,
    ) -> Option<&'a naga::EntryPoint> {
        module.entry_points.iter().find(|ep| ep.name == name)
    }

    #[test]
    fn instancing_shader_composes_and_validates() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer.compose_naga(&INSTANCING_SHADER).unwrap();

        let vs = entry_point(&module, "vs_main").unwrap();
        assert_eq!(vs.stage, naga::ShaderStage::Vertex);
        let fs = entry_point(&module, "fs_main").unwrap();
        assert_eq!(fs.stage, naga::ShaderStage::Fragment);
    }

    #[test]
    fn vertex_stage_reads_four_locations() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer.compose_naga(&INSTANCING_SHADER).unwrap();
        let vs = entry_point(&module, "vs_main").unwrap();

        let mut locations: Vec<u32> = Vec::new();
        for argument in &vs.function.arguments {
            if let naga::TypeInner::Struct { members, .. } =
                &module.types[argument.ty].inner
            {
                locations.extend(members.iter().filter_map(|member| {
                    match member.binding {
                        Some(naga::Binding::Location { location, .. }) => {
                            Some(location)
                        }
                        _ => None,
                    }
                }));
            }
        }
        locations.sort_unstable();
        assert_eq!(locations, vec![0, 1, 2, 3]);
    }

    #[test]
    fn undefined_identifier_is_reported_with_path() {
        let mut composer = ShaderComposer::new().unwrap();
        let broken = ShaderSource {
            source: "fn f() -> f32 {\n    return missing_value;\n}\n",
            file_path: "broken.wgsl",
        };
        let err = composer.compose_naga(&broken).unwrap_err();
        assert!(matches!(err, SplatterError::Shader(_)));
        assert!(err.to_string().contains("broken.wgsl"), "got {err}");
    }

    #[test]
    fn composer_is_reusable_after_an_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let broken = ShaderSource {
            source: "fn f( {",
            file_path: "broken.wgsl",
        };
        assert!(composer.compose_naga(&broken).is_err());
        assert!(composer.compose_naga(&INSTANCING_SHADER).is_ok());
    }
}
