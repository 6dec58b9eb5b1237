//! Mesh builder: one imported mesh record becomes one [`Mesh`].
//!
//! Copies vertices and indices, resolves the material, and gathers the
//! mesh's textures through the per-model cache so each unique source path is
//! decoded and uploaded exactly once per model.

use std::collections::HashMap;
use std::rc::Rc;

use crate::data_structures::model::{Material, Mesh, ModelVertex};
use crate::data_structures::texture::{Texture, TextureRole};
use crate::gpu::GpuContext;
use crate::importer::{ImportedMaterial, ImportedMesh, ImportedScene, TextureSlot, TextureSource};
use crate::resources::texture;

/// Importer slot to semantic role, in query order.
///
/// The Normal/Height pair is deliberately crossed: the asset pipeline stores
/// normal maps in the importer's *height* slot and height maps in its
/// *ambient* slot. The mapping is load-bearing for shipped assets and must
/// not be "fixed" to the conventional one.
const SLOT_ROLES: [(TextureSlot, TextureRole); 4] = [
    (TextureSlot::Diffuse, TextureRole::Diffuse),
    (TextureSlot::Specular, TextureRole::Specular),
    (TextureSlot::Height, TextureRole::Normal),
    (TextureSlot::Ambient, TextureRole::Height),
];

/// Build one mesh from its imported record.
///
/// Vertices copy position and normal directly and take the first
/// texture-coordinate channel, defaulting to `(0, 0)` when the mesh carries
/// none. A texture that fails to decode is logged and skipped; it never
/// fails the mesh.
pub fn build_mesh(
    imported: &ImportedMesh,
    scene: &ImportedScene,
    directory: &str,
    textures_loaded: &mut HashMap<String, Rc<Texture>>,
    gpu: &mut dyn GpuContext,
) -> Mesh {
    let vertices = imported
        .positions
        .iter()
        .enumerate()
        .map(|(i, &position)| ModelVertex {
            position,
            normal: imported.normals.get(i).copied().unwrap_or([0.0; 3]),
            tex_coords: imported
                .tex_coords
                .as_ref()
                .and_then(|coords| coords.get(i))
                .copied()
                .unwrap_or([0.0, 0.0]),
        })
        .collect();

    let mut material = Material::default();
    let mut textures = Vec::new();
    if let Some(imported_material) = imported
        .material_index
        .and_then(|index| scene.materials.get(index))
    {
        material = extract_material(imported_material);
        for (slot, role) in SLOT_ROLES {
            load_slot_textures(
                imported_material,
                slot,
                role,
                directory,
                textures_loaded,
                gpu,
                &mut textures,
            );
        }
    }

    Mesh {
        name: imported.name.clone(),
        vertices,
        indices: imported.indices.clone(),
        textures,
        material,
    }
}

/// Read the material properties into a [`Material`].
///
/// Destinations start from the zero defaults and are only overwritten by
/// properties actually present in the record; `set` is raised
/// unconditionally since a record was found.
pub fn extract_material(imported: &ImportedMaterial) -> Material {
    let mut material = Material {
        set: true,
        ..Material::default()
    };
    if let Some(ambient) = imported.ambient {
        material.ambient = ambient;
    }
    if let Some(diffuse) = imported.diffuse {
        material.diffuse = diffuse;
    }
    if let Some(specular) = imported.specular {
        material.specular = specular;
    }
    if let Some(emissive) = imported.emissive {
        material.emissive = emissive;
    }
    if let Some(shininess) = imported.shininess {
        material.shininess = shininess;
    }
    if let Some(refraction) = imported.refraction {
        material.refraction = refraction;
    }
    if let Some(intensity) = imported.intensity {
        material.intensity = intensity;
    }
    material
}

fn load_slot_textures(
    material: &ImportedMaterial,
    slot: TextureSlot,
    role: TextureRole,
    directory: &str,
    textures_loaded: &mut HashMap<String, Rc<Texture>>,
    gpu: &mut dyn GpuContext,
    out: &mut Vec<Rc<Texture>>,
) {
    for source in material.textures_in_slot(slot) {
        let key = source.cache_key();
        if let Some(cached) = textures_loaded.get(&key) {
            out.push(Rc::clone(cached));
            continue;
        }
        let uploaded = match source {
            TextureSource::Uri(uri) => texture::load_texture(gpu, directory, uri),
            TextureSource::Embedded { bytes, .. } => {
                texture::load_texture_from_memory(gpu, bytes, &key)
            }
        };
        match uploaded {
            Ok(handle) => {
                let loaded = Rc::new(Texture {
                    handle,
                    role,
                    path: key.clone(),
                });
                textures_loaded.insert(key, Rc::clone(&loaded));
                out.push(loaded);
            }
            Err(e) => {
                log::warn!(
                    "skipping {} texture of material '{}': {e}",
                    role.shader_name(),
                    material.name
                );
            }
        }
    }
}
