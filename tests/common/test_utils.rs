// Shared between the integration test binaries; not every binary uses every
// helper.
#![allow(dead_code)]

use std::path::PathBuf;

use lumen_scene::importer::{ImportedMaterial, ImportedMesh, ImportedNode, ImportedScene};
use lumen_scene::{
    DecodedImage, GpuContext, LoadError, Material, Mesh, ModelVertex, PixelFormat, TextureHandle,
};

pub(crate) fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug)]
pub(crate) struct UploadRecord {
    pub(crate) label: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) format: PixelFormat,
}

/// GPU stand-in that records every upload it receives and mints sequential
/// handles.
#[derive(Default)]
pub(crate) struct RecordingGpu {
    pub(crate) uploads: Vec<UploadRecord>,
}

impl GpuContext for RecordingGpu {
    fn upload_texture(
        &mut self,
        image: &DecodedImage,
        label: &str,
    ) -> Result<TextureHandle, LoadError> {
        self.uploads.push(UploadRecord {
            label: label.to_string(),
            width: image.width,
            height: image.height,
            format: image.format,
        });
        Ok(TextureHandle(self.uploads.len() as u32 - 1))
    }
}

/// A unit triangle as an imported mesh record, without normals or UVs.
pub(crate) fn triangle_mesh(name: &str, material_index: Option<usize>) -> ImportedMesh {
    ImportedMesh {
        name: name.to_string(),
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 3],
        tex_coords: None,
        indices: vec![0, 1, 2],
        material_index,
    }
}

/// A scene with one root node holding the given meshes.
pub(crate) fn single_node_scene(
    meshes: Vec<ImportedMesh>,
    materials: Vec<ImportedMaterial>,
) -> ImportedScene {
    ImportedScene {
        roots: vec![0],
        nodes: vec![ImportedNode {
            name: "root".to_string(),
            mesh_indices: (0..meshes.len()).collect(),
            children: Vec::new(),
        }],
        meshes,
        materials,
    }
}

/// A built quad mesh (4 vertices) with the given indices and emissive
/// properties, for driving the light extractor directly.
pub(crate) fn quad_mesh(
    name: &str,
    indices: Vec<u32>,
    emissive: [f32; 3],
    intensity: f32,
) -> Mesh {
    let positions = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
    ];
    Mesh {
        name: name.to_string(),
        vertices: positions
            .iter()
            .map(|&position| ModelVertex {
                position,
                normal: [0.0, 1.0, 0.0],
                tex_coords: [0.0, 0.0],
            })
            .collect(),
        indices,
        textures: Vec::new(),
        material: Material {
            set: true,
            emissive,
            intensity,
            ..Material::default()
        },
    }
}

/// PNG-encode an image in memory.
pub(crate) fn png_bytes(image: image::DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("png encode failed");
    bytes
}

/// A fresh directory under the system temp dir for tests that write image
/// files to disk.
pub(crate) fn temp_asset_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lumen-scene-test-{}-{tag}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("failed to create temp asset dir");
    dir
}
