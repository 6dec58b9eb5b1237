//! Texture roles, GPU handles and the shared texture record.

/// Semantic role of a texture, i.e. how the shader uses its sampled value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureRole {
    Diffuse,
    Specular,
    Normal,
    Height,
}

impl TextureRole {
    /// Sampler uniform name the shaders bind this role under.
    pub fn shader_name(&self) -> &'static str {
        match self {
            TextureRole::Diffuse => "texture_diffuse",
            TextureRole::Specular => "texture_specular",
            TextureRole::Normal => "texture_normal",
            TextureRole::Height => "texture_height",
        }
    }
}

/// Opaque GPU texture identifier minted by a [`crate::gpu::GpuContext`].
///
/// Only meaningful to the context that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// A loaded texture: its GPU handle, its semantic role and the source path
/// it was loaded from. The path doubles as the per-model cache key, so each
/// unique path is decoded and uploaded at most once per model.
#[derive(Clone, Debug)]
pub struct Texture {
    pub handle: TextureHandle,
    pub role: TextureRole,
    pub path: String,
}
