//! Texture loading: path resolution, image decode and GPU upload.

use std::fs;
use std::path::Path;

use image::DynamicImage;

use crate::data_structures::texture::TextureHandle;
use crate::error::LoadError;
use crate::gpu::{DecodedImage, GpuContext, PixelFormat};

/// Load an image file relative to the model's base directory and upload it.
///
/// Any failure up to and including the upload yields
/// [`LoadError::AssetDecode`] with the attempted path; no handle escapes on
/// error. The upload leaves the GPU context's registry grown by one entry,
/// which callers must not assume is reversible.
pub fn load_texture(
    gpu: &mut dyn GpuContext,
    directory: &str,
    file_name: &str,
) -> Result<TextureHandle, LoadError> {
    let path = Path::new(directory).join(file_name);
    let bytes = fs::read(&path).map_err(|e| LoadError::AssetDecode {
        path: path.clone(),
        message: e.to_string(),
    })?;
    let image = image::load_from_memory(&bytes).map_err(|e| LoadError::AssetDecode {
        path: path.clone(),
        message: e.to_string(),
    })?;
    let decoded = to_decoded(image, &path)?;
    gpu.upload_texture(&decoded, file_name)
}

/// Decode and upload an image embedded in the asset's binary payload.
pub fn load_texture_from_memory(
    gpu: &mut dyn GpuContext,
    bytes: &[u8],
    label: &str,
) -> Result<TextureHandle, LoadError> {
    let image = image::load_from_memory(bytes).map_err(|e| LoadError::AssetDecode {
        path: label.into(),
        message: e.to_string(),
    })?;
    let decoded = to_decoded(image, Path::new(label))?;
    gpu.upload_texture(&decoded, label)
}

/// Maps the decoded channel count to a pixel format: 1 to single-channel,
/// 3 to RGB, 4 to RGBA. Anything else (e.g. 2-channel luma-alpha) is
/// rejected instead of being silently uploaded with the wrong format.
fn to_decoded(image: DynamicImage, path: &Path) -> Result<DecodedImage, LoadError> {
    let width = image.width();
    let height = image.height();
    let (format, pixels) = match image.color().channel_count() {
        1 => (PixelFormat::R8, image.to_luma8().into_raw()),
        3 => (PixelFormat::Rgb8, image.to_rgb8().into_raw()),
        4 => (PixelFormat::Rgba8, image.to_rgba8().into_raw()),
        channels => {
            return Err(LoadError::AssetDecode {
                path: path.to_path_buf(),
                message: format!("unsupported channel count {channels}"),
            });
        }
    };
    Ok(DecodedImage {
        width,
        height,
        format,
        pixels,
    })
}
