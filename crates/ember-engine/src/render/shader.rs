//! Sprite shader contract.
//!
//! The WGSL source is parsed and validated with naga before any GPU object is
//! created, so a broken shader is reported as a [`ShaderError`] instead of a
//! device-lost panic. Uniforms are resolved by name; their `@group`/`@binding`
//! must sit in group 0, bindings 0..3.

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::ShaderError;

/// Built-in sprite program.
pub const SPRITE_SHADER: &str = include_str!("shaders/sprite.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

pub const UNIFORM_MODEL: &str = "model";
pub const UNIFORM_PROJECTION: &str = "projection";
pub const UNIFORM_SPRITE_COLOR: &str = "spriteColor";

pub(crate) const UNIFORM_GROUP: u32 = 0;
pub(crate) const UNIFORM_SLOTS: u32 = 3;

/// Resolved location of one uniform.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniformBinding {
    pub group: u32,
    pub binding: u32,
}

/// Resolved locations of the three sprite uniforms.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpriteUniforms {
    pub model: UniformBinding,
    pub projection: UniformBinding,
    pub sprite_color: UniformBinding,
}

/// Validated sprite shader with its uniform locations.
#[derive(Debug)]
pub struct SpriteProgram {
    source: String,
    uniforms: SpriteUniforms,
}

impl SpriteProgram {
    /// Compiles the built-in program.
    pub fn builtin() -> Result<Self, ShaderError> {
        Self::compile(SPRITE_SHADER)
    }

    pub fn compile(source: &str) -> Result<Self, ShaderError> {
        let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
            log: e.emit_to_string(source),
        })?;

        Validator::new(ValidationFlags::all(), Capabilities::empty())
            .validate(&module)
            .map_err(|e| ShaderError::Validation {
                log: error_chain(&e),
            })?;

        require_entry(&module, naga::ShaderStage::Vertex, VERTEX_ENTRY)?;
        require_entry(&module, naga::ShaderStage::Fragment, FRAGMENT_ENTRY)?;

        let uniforms = SpriteUniforms {
            model: resolve_uniform(&module, UNIFORM_MODEL)?,
            projection: resolve_uniform(&module, UNIFORM_PROJECTION)?,
            sprite_color: resolve_uniform(&module, UNIFORM_SPRITE_COLOR)?,
        };

        let bindings = [
            uniforms.model.binding,
            uniforms.projection.binding,
            uniforms.sprite_color.binding,
        ];
        if bindings[0] == bindings[1] || bindings[0] == bindings[2] || bindings[1] == bindings[2] {
            return Err(ShaderError::InvalidBinding {
                name: UNIFORM_SPRITE_COLOR,
                reason: format!("sprite uniforms share a binding slot ({bindings:?})"),
            });
        }

        log::debug!("sprite program validated; uniforms at {uniforms:?}");

        Ok(Self {
            source: source.to_owned(),
            uniforms,
        })
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn uniforms(&self) -> SpriteUniforms {
        self.uniforms
    }
}

fn require_entry(
    module: &naga::Module,
    stage: naga::ShaderStage,
    name: &'static str,
) -> Result<(), ShaderError> {
    let found = module
        .entry_points
        .iter()
        .any(|ep| ep.stage == stage && ep.name == name);

    if found {
        Ok(())
    } else {
        Err(ShaderError::MissingEntryPoint {
            stage: match stage {
                naga::ShaderStage::Vertex => "vertex",
                naga::ShaderStage::Fragment => "fragment",
                _ => "compute",
            },
            name,
        })
    }
}

fn resolve_uniform(module: &naga::Module, name: &'static str) -> Result<UniformBinding, ShaderError> {
    let (_, var) = module
        .global_variables
        .iter()
        .find(|(_, var)| var.name.as_deref() == Some(name))
        .ok_or(ShaderError::MissingUniform { name })?;

    if var.space != naga::AddressSpace::Uniform {
        return Err(ShaderError::InvalidBinding {
            name,
            reason: format!("declared in {:?} instead of uniform space", var.space),
        });
    }

    let Some(binding) = var.binding.as_ref() else {
        return Err(ShaderError::InvalidBinding {
            name,
            reason: "missing @group/@binding".to_owned(),
        });
    };

    if binding.group != UNIFORM_GROUP || binding.binding >= UNIFORM_SLOTS {
        return Err(ShaderError::InvalidBinding {
            name,
            reason: format!(
                "@group({}) @binding({}) is outside group {UNIFORM_GROUP}, bindings 0..{UNIFORM_SLOTS}",
                binding.group, binding.binding
            ),
        });
    }

    Ok(UniformBinding {
        group: binding.group,
        binding: binding.binding,
    })
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut log = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        log.push_str("\n  caused by: ");
        log.push_str(&cause.to_string());
        source = cause.source();
    }
    log
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = "
        @fragment
        fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }
    ";

    fn shader_with(globals: &str, fragment: &str) -> String {
        format!(
            "{globals}
            @vertex
            fn vs_main(@location(0) pos: vec2<f32>) -> @builtin(position) vec4<f32> {{
                return vec4<f32>(pos, 0.0, 1.0);
            }}
            {fragment}"
        )
    }

    #[test]
    fn builtin_program_resolves_all_uniforms() {
        let program = SpriteProgram::builtin().unwrap();
        let u = program.uniforms();
        assert_eq!(u.model, UniformBinding { group: 0, binding: 0 });
        assert_eq!(u.projection, UniformBinding { group: 0, binding: 1 });
        assert_eq!(u.sprite_color, UniformBinding { group: 0, binding: 2 });
        assert!(program.source().contains("spriteColor"));
    }

    #[test]
    fn syntax_error_is_a_compile_error_with_log() {
        let err = SpriteProgram::compile("fn vs_main( {").unwrap_err();
        let ShaderError::Compile { log } = err else {
            panic!("expected compile error, got {err:?}");
        };
        assert!(!log.is_empty());
    }

    #[test]
    fn missing_uniform_is_reported_by_name() {
        let src = shader_with(
            "@group(0) @binding(0) var<uniform> model: mat4x4<f32>;
             @group(0) @binding(1) var<uniform> projection: mat4x4<f32>;",
            FRAGMENT,
        );
        assert_eq!(
            SpriteProgram::compile(&src).unwrap_err(),
            ShaderError::MissingUniform { name: "spriteColor" }
        );
    }

    #[test]
    fn out_of_range_binding_is_rejected() {
        let src = shader_with(
            "@group(0) @binding(0) var<uniform> model: mat4x4<f32>;
             @group(0) @binding(1) var<uniform> projection: mat4x4<f32>;
             @group(1) @binding(0) var<uniform> spriteColor: vec4<f32>;",
            FRAGMENT,
        );
        let err = SpriteProgram::compile(&src).unwrap_err();
        assert!(matches!(err, ShaderError::InvalidBinding { name: "spriteColor", .. }), "{err:?}");
    }

    #[test]
    fn missing_fragment_entry_is_rejected() {
        let src = shader_with(
            "@group(0) @binding(0) var<uniform> model: mat4x4<f32>;
             @group(0) @binding(1) var<uniform> projection: mat4x4<f32>;
             @group(0) @binding(2) var<uniform> spriteColor: vec4<f32>;",
            "",
        );
        assert_eq!(
            SpriteProgram::compile(&src).unwrap_err(),
            ShaderError::MissingEntryPoint { stage: "fragment", name: "fs_main" }
        );
    }
}
