//! Vertex, material, mesh and model definitions.
//!
//! These are the CPU-side results of a load: flat vertex/index arrays per
//! mesh, one material per mesh and shared texture records. GPU buffer upload
//! lives in [`crate::gpu`].

use std::collections::HashMap;
use std::rc::Rc;

use crate::data_structures::texture::Texture;

/// One imported vertex: position, normal and the first texture-coordinate
/// channel. Matches the vertex buffer layout expected by the GPU backend.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

/// Phong-style material properties read from the imported material record.
///
/// Every property that is absent from the source record keeps its zero
/// default. `intensity` defaults to 1.0 so emissive meshes without an
/// explicit strength still contribute full-strength lights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// True once a material record was resolved for the mesh.
    pub set: bool,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub emissive: [f32; 3],
    pub shininess: f32,
    pub refraction: f32,
    /// Scales the emissive contribution when the mesh is used as a light.
    pub intensity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            set: false,
            ambient: [0.0; 3],
            diffuse: [0.0; 3],
            specular: [0.0; 3],
            emissive: [0.0; 3],
            shininess: 0.0,
            refraction: 0.0,
            intensity: 1.0,
        }
    }
}

impl Material {
    /// A mesh with any nonzero emissive component is treated as a light
    /// source by the light extractor.
    pub fn is_emissive(&self) -> bool {
        self.emissive != [0.0, 0.0, 0.0]
    }
}

/// One drawable batch: vertices, a triangle-list index buffer, the textures
/// the mesh samples and its material.
///
/// Invariants: every index is a valid offset into `vertices` and the index
/// count is a multiple of 3. Both hold for meshes produced by the importer;
/// the light extractor re-checks them before reading.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    pub textures: Vec<Rc<Texture>>,
    pub material: Material,
}

/// A fully loaded model: the flattened mesh list in depth-first pre-order,
/// the per-model texture cache and the base directory that relative texture
/// paths were resolved against.
///
/// The mesh list and cache are populated by a single load call and not
/// mutated afterwards. A `Model` is single-threaded by design; loads against
/// one GPU context must be serialized.
#[derive(Debug, Default)]
pub struct Model {
    pub meshes: Vec<Mesh>,
    /// Cache of every texture loaded for this model, keyed by source path.
    /// Meshes share cache entries by reference.
    pub textures_loaded: HashMap<String, Rc<Texture>>,
    pub directory: String,
}
