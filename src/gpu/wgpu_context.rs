//! wgpu backend for the GPU seam.
//!
//! Owns the texture registry behind [`TextureHandle`]s, uploads decoded
//! pixels with a full CPU-generated mip chain, and provides vertex/index
//! buffer upload plus the pass-through draw for loaded models.

use std::borrow::Cow;

use image::imageops::FilterType;
use image::{GrayImage, ImageBuffer, Pixel, RgbaImage};
use wgpu::util::DeviceExt;

use super::{DecodedImage, GpuContext, PixelFormat};
use crate::data_structures::model::Model;
use crate::data_structures::texture::TextureHandle;
use crate::error::LoadError;

/// A GPU texture with its view and sampler.
#[derive(Debug)]
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

/// Real GPU backend: uploads go through the device queue and handles index
/// into an internal registry.
///
/// Uploads mutate the registry and queue state, so loads against one context
/// must be serialized. Dropping the context drops every texture it minted.
pub struct WgpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    textures: Vec<GpuTexture>,
}

impl WgpuContext {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            textures: Vec::new(),
        }
    }

    /// Look up a previously uploaded texture. Returns `None` for handles this
    /// context did not mint.
    pub fn texture(&self, handle: TextureHandle) -> Option<&GpuTexture> {
        self.textures.get(handle.0 as usize)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}

impl GpuContext for WgpuContext {
    fn upload_texture(
        &mut self,
        image: &DecodedImage,
        label: &str,
    ) -> Result<TextureHandle, LoadError> {
        let format = match image.format {
            PixelFormat::R8 => wgpu::TextureFormat::R8Unorm,
            // wgpu has no 3-channel 8-bit format; RGB rows are expanded to
            // RGBA on upload.
            PixelFormat::Rgb8 | PixelFormat::Rgba8 => wgpu::TextureFormat::Rgba8UnormSrgb,
        };

        let expected = image.width as usize * image.height as usize * image.format.channels() as usize;
        if image.pixels.len() != expected {
            return Err(LoadError::AssetDecode {
                path: label.into(),
                message: format!(
                    "pixel buffer holds {} bytes, expected {expected}",
                    image.pixels.len()
                ),
            });
        }

        let mip_level_count = mip_level_count(image.width, image.height);
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        match image.format {
            PixelFormat::R8 => {
                let base = GrayImage::from_raw(image.width, image.height, image.pixels.clone());
                write_mip_chain(&self.queue, &texture, base, mip_level_count, 1, label)?;
            }
            PixelFormat::Rgb8 => {
                let rgba = expand_rgb_to_rgba(&image.pixels);
                let base = RgbaImage::from_raw(image.width, image.height, rgba);
                write_mip_chain(&self.queue, &texture, base, mip_level_count, 4, label)?;
            }
            PixelFormat::Rgba8 => {
                let base = RgbaImage::from_raw(image.width, image.height, image.pixels.clone());
                write_mip_chain(&self.queue, &texture, base, mip_level_count, 4, label)?;
            }
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(GpuTexture {
            texture,
            view,
            sampler,
        });
        Ok(handle)
    }
}

/// Mip levels for a full chain down to 1x1.
fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

fn expand_rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(u8::MAX);
    }
    rgba
}

/// Writes level 0 from the source pixels and CPU-downsamples every further
/// level. `Queue::write_texture` stages internally, so tightly packed rows
/// are fine at any width.
fn write_mip_chain<P>(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    base: Option<ImageBuffer<P, Vec<u8>>>,
    mip_level_count: u32,
    bytes_per_pixel: u32,
    label: &str,
) -> Result<(), LoadError>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let base = base.ok_or_else(|| LoadError::AssetDecode {
        path: label.into(),
        message: "pixel buffer does not match image dimensions".to_string(),
    })?;
    for level in 0..mip_level_count {
        let level_width = (base.width() >> level).max(1);
        let level_height = (base.height() >> level).max(1);
        let pixels: Cow<[u8]> = if level == 0 {
            Cow::Borrowed(base.as_raw())
        } else {
            Cow::Owned(
                image::imageops::resize(&base, level_width, level_height, FilterType::Triangle)
                    .into_raw(),
            )
        };
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture,
                mip_level: level,
                origin: wgpu::Origin3d::ZERO,
            },
            &pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(level_width * bytes_per_pixel),
                rows_per_image: Some(level_height),
            },
            wgpu::Extent3d {
                width: level_width,
                height: level_height,
                depth_or_array_layers: 1,
            },
        );
    }
    Ok(())
}

/// GPU-side mesh: uploaded vertex/index buffers for one [`Mesh`].
///
/// [`Mesh`]: crate::data_structures::model::Mesh
#[derive(Debug)]
pub struct GpuMesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

/// GPU-side model: one [`GpuMesh`] per loaded mesh, in mesh-list order.
#[derive(Debug)]
pub struct GpuModel {
    pub meshes: Vec<GpuMesh>,
}

impl GpuModel {
    /// Upload every mesh of a loaded model into vertex/index buffers.
    pub fn new(device: &wgpu::Device, model: &Model) -> Self {
        let meshes = model
            .meshes
            .iter()
            .map(|mesh| {
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{:?} Vertex Buffer", mesh.name)),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{:?} Index Buffer", mesh.name)),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                GpuMesh {
                    name: mesh.name.clone(),
                    vertex_buffer,
                    index_buffer,
                    num_elements: mesh.indices.len() as u32,
                }
            })
            .collect();
        Self { meshes }
    }
}

/// Pass-through draw: binds each mesh's buffers and issues one indexed draw
/// per mesh, in mesh-list order. Pipeline and bind-group state are the
/// caller's responsibility.
pub trait DrawModel {
    fn draw_mesh(&mut self, mesh: &GpuMesh);
    fn draw_model(&mut self, model: &GpuModel);
}

impl DrawModel for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &GpuMesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.num_elements, 0, 0..1);
    }

    fn draw_model(&mut self, model: &GpuModel) {
        for mesh in &model.meshes {
            self.draw_mesh(mesh);
        }
    }
}
