//! GPU collaborator seam.
//!
//! The loader talks to the GPU through the [`GpuContext`] trait so the load
//! pipeline stays testable without a device. [`wgpu_context::WgpuContext`]
//! is the real backend.

pub mod wgpu_context;

pub use wgpu_context::{DrawModel, GpuMesh, GpuModel, WgpuContext};

use crate::data_structures::texture::TextureHandle;
use crate::error::LoadError;

/// Pixel layout of a decoded image. Channel counts other than 1, 3 and 4 are
/// rejected at decode time, before an upload is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    R8,
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(&self) -> u32 {
        match self {
            PixelFormat::R8 => 1,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Raw pixels produced by the image decoder, ready for upload.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Tightly packed rows, `width * channels` bytes per row.
    pub pixels: Vec<u8>,
}

/// Turns decoded pixels into bindable GPU texture objects.
///
/// An upload mutates context state (the texture registry and the GPU queue),
/// so all loads against a single context must be serialized. A returned
/// handle is only meaningful to the context that minted it; after an `Err`
/// the caller must not treat any handle as produced.
pub trait GpuContext {
    fn upload_texture(
        &mut self,
        image: &DecodedImage,
        label: &str,
    ) -> Result<TextureHandle, LoadError>;
}
