use thiserror::Error;

/// Fatal sprite-program setup errors.
///
/// Each of these means the shader artifact is broken; the engine refuses to start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderError {
    #[error("sprite shader failed to compile:\n{log}")]
    Compile { log: String },

    #[error("sprite shader failed validation:\n{log}")]
    Validation { log: String },

    #[error("sprite shader has no {stage} entry point `{name}`")]
    MissingEntryPoint { stage: &'static str, name: &'static str },

    #[error("sprite shader does not declare uniform `{name}`")]
    MissingUniform { name: &'static str },

    #[error("sprite shader uniform `{name}` has an invalid binding: {reason}")]
    InvalidBinding { name: &'static str, reason: String },
}

/// Errors from registering custom meshes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("custom mesh needs a non-empty triangle list (got {0} vertices)")]
    NotTriangles(usize),

    #[error("custom mesh contains a non-finite vertex")]
    NonFinite,
}
