//! Asset import front-end.
//!
//! The external parser (the `gltf` crate) is wrapped behind a neutral
//! [`ImportedScene`] arena so the rest of the pipeline (walker, mesh builder,
//! light extractor) never touches parser types. Post-processing flags are
//! applied here, before the scene reaches the builder.

pub mod gltf;

/// Post-processing applied during import.
///
/// The load facade always imports with the default set: triangulate
/// non-list primitives, flip the texture-coordinate V axis and generate
/// vertex normals where the asset carries none.
#[derive(Clone, Copy, Debug)]
pub struct ImportSettings {
    pub triangulate: bool,
    pub flip_uvs: bool,
    pub generate_normals: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            triangulate: true,
            flip_uvs: true,
            generate_normals: true,
        }
    }
}

/// Importer-vocabulary texture slots on a material record.
///
/// The asset pipeline stores normal maps in the *height* slot and height
/// maps in the *ambient* slot. The mesh builder preserves that crossed
/// mapping when it tags textures with their semantic role; see
/// [`crate::resources::mesh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSlot {
    Diffuse,
    Specular,
    Height,
    Ambient,
}

/// Where a referenced texture's bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextureSource {
    /// Image file path, relative to the model's base directory.
    Uri(String),
    /// Image embedded in the asset's binary payload.
    Embedded { index: usize, bytes: Vec<u8> },
}

impl TextureSource {
    /// Key under which the loaded texture is cached per model. Embedded
    /// images get a synthetic key since they have no file path.
    pub fn cache_key(&self) -> String {
        match self {
            TextureSource::Uri(uri) => uri.clone(),
            TextureSource::Embedded { index, .. } => format!("#embedded/{index}"),
        }
    }
}

/// One node of the imported scene graph. Children are arena indices into
/// [`ImportedScene::nodes`]; mesh indices point into [`ImportedScene::meshes`].
#[derive(Clone, Debug, Default)]
pub struct ImportedNode {
    pub name: String,
    pub mesh_indices: Vec<usize>,
    pub children: Vec<usize>,
}

/// One imported mesh, already post-processed into an indexed triangle list.
///
/// `normals` always has one entry per position: either read from the asset,
/// generated (when [`ImportSettings::generate_normals`] is set) or zeroed.
/// `tex_coords` is the first texture-coordinate channel only; further
/// channels are never consulted.
#[derive(Clone, Debug, Default)]
pub struct ImportedMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub indices: Vec<u32>,
    pub material_index: Option<usize>,
}

/// Material record as read from the asset. Absent properties stay `None`;
/// the material extractor substitutes zero defaults.
#[derive(Clone, Debug, Default)]
pub struct ImportedMaterial {
    pub name: String,
    pub ambient: Option<[f32; 3]>,
    pub diffuse: Option<[f32; 3]>,
    pub specular: Option<[f32; 3]>,
    pub emissive: Option<[f32; 3]>,
    pub shininess: Option<f32>,
    pub refraction: Option<f32>,
    pub intensity: Option<f32>,
    pub textures: Vec<(TextureSlot, TextureSource)>,
}

impl ImportedMaterial {
    /// Texture references attached to the given importer slot, in
    /// attachment order.
    pub fn textures_in_slot(&self, slot: TextureSlot) -> impl Iterator<Item = &TextureSource> {
        self.textures
            .iter()
            .filter(move |(s, _)| *s == slot)
            .map(|(_, source)| source)
    }
}

/// The imported scene graph: a node arena with root indices plus the
/// flattened mesh and material tables.
///
/// Precondition: the node graph is tree-shaped. Scene graphs produced by the
/// asset format are guaranteed acyclic; the load facade additionally runs a
/// bounded-depth check before walking so malformed input fails the load
/// instead of overflowing the stack.
#[derive(Clone, Debug, Default)]
pub struct ImportedScene {
    pub roots: Vec<usize>,
    pub nodes: Vec<ImportedNode>,
    pub meshes: Vec<ImportedMesh>,
    pub materials: Vec<ImportedMaterial>,
}
