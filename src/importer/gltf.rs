//! glTF importer backend.
//!
//! Parses a `.gltf`/`.glb` file into an [`ImportedScene`], resolving external
//! buffers relative to the asset's directory and applying the configured
//! post-processing (triangulation of strip/fan primitives, V-axis flip,
//! normal generation).

use std::fs;
use std::path::Path;

use cgmath::{InnerSpace, Vector3};
use gltf::Gltf;
use gltf::mesh::Mode;

use super::{
    ImportSettings, ImportedMaterial, ImportedMesh, ImportedNode, ImportedScene, TextureSlot,
    TextureSource,
};
use crate::error::LoadError;

/// Import a scene from disk.
///
/// Fails with [`LoadError::AssetImport`] when the file cannot be parsed, a
/// buffer cannot be resolved, or the document carries no root nodes.
pub fn import_file(path: &Path, settings: ImportSettings) -> Result<ImportedScene, LoadError> {
    let gltf = Gltf::open(path).map_err(|e| LoadError::AssetImport {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let buffers = load_buffers(&gltf, path)?;

    let roots = root_nodes(&gltf, path)?;
    let materials = load_materials(&gltf, &buffers);
    let (meshes, mesh_ranges) = load_meshes(&gltf, &buffers, settings);

    let nodes = gltf
        .nodes()
        .map(|node| ImportedNode {
            name: node.name().unwrap_or("unnamed_node").to_string(),
            mesh_indices: node
                .mesh()
                .map(|mesh| mesh_ranges[mesh.index()].clone())
                .unwrap_or_default(),
            children: node.children().map(|child| child.index()).collect(),
        })
        .collect();

    Ok(ImportedScene {
        roots,
        nodes,
        meshes,
        materials,
    })
}

/// The default scene's root node indices, or the first scene's when no
/// default is set. A document without any scene nodes is rootless and fails
/// the import.
fn root_nodes(gltf: &Gltf, path: &Path) -> Result<Vec<usize>, LoadError> {
    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| LoadError::AssetImport {
            path: path.to_path_buf(),
            message: "document contains no scene".to_string(),
        })?;
    let roots: Vec<usize> = scene.nodes().map(|node| node.index()).collect();
    if roots.is_empty() {
        return Err(LoadError::AssetImport {
            path: path.to_path_buf(),
            message: "scene has no root nodes".to_string(),
        });
    }
    Ok(roots)
}

fn load_buffers(gltf: &Gltf, path: &Path) -> Result<Vec<Vec<u8>>, LoadError> {
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf.blob.as_deref().ok_or_else(|| LoadError::AssetImport {
                    path: path.to_path_buf(),
                    message: "buffer references a missing binary blob".to_string(),
                })?;
                buffer_data.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) => {
                if uri.starts_with("data:") {
                    return Err(LoadError::AssetImport {
                        path: path.to_path_buf(),
                        message: "data-URI buffers are not supported".to_string(),
                    });
                }
                let buffer_path = base_dir.join(uri);
                let bin = fs::read(&buffer_path).map_err(|e| LoadError::AssetImport {
                    path: buffer_path.clone(),
                    message: e.to_string(),
                })?;
                buffer_data.push(bin);
            }
        }
    }
    Ok(buffer_data)
}

fn load_materials(gltf: &Gltf, buffers: &[Vec<u8>]) -> Vec<ImportedMaterial> {
    gltf.materials()
        .map(|material| {
            let pbr = material.pbr_metallic_roughness();
            let base_color = pbr.base_color_factor();
            let mut textures = Vec::new();
            if let Some(info) = pbr.base_color_texture() {
                push_texture(&mut textures, TextureSlot::Diffuse, info.texture(), buffers);
            }
            if let Some(info) = pbr.metallic_roughness_texture() {
                push_texture(&mut textures, TextureSlot::Specular, info.texture(), buffers);
            }
            // Normal maps land in the height slot, matching the asset
            // pipeline's slot convention (see TextureSlot docs).
            if let Some(normal) = material.normal_texture() {
                push_texture(&mut textures, TextureSlot::Height, normal.texture(), buffers);
            }
            if let Some(occlusion) = material.occlusion_texture() {
                push_texture(&mut textures, TextureSlot::Ambient, occlusion.texture(), buffers);
            }
            ImportedMaterial {
                name: material.name().unwrap_or("unnamed_material").to_string(),
                ambient: None,
                diffuse: Some([base_color[0], base_color[1], base_color[2]]),
                specular: None,
                emissive: Some(material.emissive_factor()),
                shininess: None,
                refraction: material.ior(),
                intensity: material.emissive_strength(),
                textures,
            }
        })
        .collect()
}

fn push_texture(
    textures: &mut Vec<(TextureSlot, TextureSource)>,
    slot: TextureSlot,
    texture: gltf::Texture,
    buffers: &[Vec<u8>],
) {
    let image = texture.source();
    let source = match image.source() {
        gltf::image::Source::Uri { uri, .. } => TextureSource::Uri(uri.to_string()),
        gltf::image::Source::View { view, .. } => {
            let Some(buffer) = buffers.get(view.buffer().index()) else {
                log::warn!("embedded image {} references a missing buffer", image.index());
                return;
            };
            let start = view.offset();
            let end = start + view.length();
            let Some(bytes) = buffer.get(start..end) else {
                log::warn!("embedded image {} is out of buffer bounds", image.index());
                return;
            };
            TextureSource::Embedded {
                index: image.index(),
                bytes: bytes.to_vec(),
            }
        }
    };
    textures.push((slot, source));
}

/// Flattens every primitive into one [`ImportedMesh`] and records, per glTF
/// mesh, which flattened indices it produced (nodes reference glTF meshes).
fn load_meshes(
    gltf: &Gltf,
    buffers: &[Vec<u8>],
    settings: ImportSettings,
) -> (Vec<ImportedMesh>, Vec<Vec<usize>>) {
    let mut meshes = Vec::new();
    let mut mesh_ranges = Vec::new();
    for mesh in gltf.meshes() {
        let name = mesh.name().unwrap_or("unnamed_mesh");
        let mut range = Vec::new();
        for (prim_index, primitive) in mesh.primitives().enumerate() {
            match load_primitive(name, prim_index, &primitive, buffers, settings) {
                Some(imported) => {
                    range.push(meshes.len());
                    meshes.push(imported);
                }
                None => continue,
            }
        }
        mesh_ranges.push(range);
    }
    (meshes, mesh_ranges)
}

fn load_primitive(
    mesh_name: &str,
    prim_index: usize,
    primitive: &gltf::Primitive,
    buffers: &[Vec<u8>],
    settings: ImportSettings,
) -> Option<ImportedMesh> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|b| b.as_slice()));

    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    if positions.is_empty() {
        return None;
    }

    let mut indices: Vec<u32> = reader
        .read_indices()
        .map(|indices| indices.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    match primitive.mode() {
        Mode::Triangles => {}
        Mode::TriangleStrip if settings.triangulate => indices = strip_to_list(&indices),
        Mode::TriangleFan if settings.triangulate => indices = fan_to_list(&indices),
        mode => {
            log::warn!("skipping {mode:?} primitive {prim_index} of mesh '{mesh_name}'");
            return None;
        }
    }

    let mut tex_coords: Option<Vec<[f32; 2]>> = reader
        .read_tex_coords(0)
        .map(|coords| coords.into_f32().collect());
    if settings.flip_uvs {
        for uv in tex_coords.iter_mut().flatten() {
            uv[1] = 1.0 - uv[1];
        }
    }

    let normals: Vec<[f32; 3]> = match reader.read_normals() {
        Some(normals) => normals.collect(),
        None if settings.generate_normals => generate_normals(&positions, &indices),
        None => vec![[0.0; 3]; positions.len()],
    };

    Some(ImportedMesh {
        name: format!("{mesh_name}.{prim_index}"),
        positions,
        normals,
        tex_coords,
        indices,
        material_index: primitive.material().index(),
    })
}

/// Triangle strip to triangle list, alternating winding so every emitted
/// triangle keeps the strip's facing.
fn strip_to_list(indices: &[u32]) -> Vec<u32> {
    let mut list = Vec::with_capacity(indices.len().saturating_sub(2) * 3);
    for i in 2..indices.len() {
        if i % 2 == 0 {
            list.extend_from_slice(&[indices[i - 2], indices[i - 1], indices[i]]);
        } else {
            list.extend_from_slice(&[indices[i - 1], indices[i - 2], indices[i]]);
        }
    }
    list
}

fn fan_to_list(indices: &[u32]) -> Vec<u32> {
    let mut list = Vec::with_capacity(indices.len().saturating_sub(2) * 3);
    for i in 2..indices.len() {
        list.extend_from_slice(&[indices[0], indices[i - 1], indices[i]]);
    }
    list
}

/// Area-weighted vertex normals: accumulate each face's cross product on its
/// three vertices, then normalize the sums.
fn generate_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vector3::new(0.0f32, 0.0, 0.0); positions.len()];
    for triple in indices.chunks_exact(3) {
        if triple.iter().any(|&i| i as usize >= positions.len()) {
            continue;
        }
        let p0: Vector3<f32> = positions[triple[0] as usize].into();
        let p1: Vector3<f32> = positions[triple[1] as usize].into();
        let p2: Vector3<f32> = positions[triple[2] as usize].into();
        let face_normal = (p1 - p0).cross(p2 - p0);
        for &index in triple {
            accumulated[index as usize] += face_normal;
        }
    }
    accumulated
        .into_iter()
        .map(|normal| {
            if normal.magnitude2() > 0.0 {
                normal.normalize().into()
            } else {
                [0.0, 0.0, 0.0]
            }
        })
        .collect()
}
