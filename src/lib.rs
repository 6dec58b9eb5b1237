//! lumen-scene
//!
//! Loads a 3D scene graph from an asset file, flattens it into drawable mesh
//! batches with material and texture data, uploads texture pixels to the
//! GPU, and extracts emissive triangles as area light sources. Parsing is
//! delegated to the `gltf` crate, image decode to `image`, GPU state to
//! `wgpu`; this crate owns the traversal and marshalling between them.
//!
//! High-level modules
//! - `data_structures`: scene data types (vertices, materials, meshes, lights)
//! - `error`: load error kinds
//! - `gpu`: GPU collaborator trait and the wgpu backend
//! - `importer`: asset import front-end with post-processing flags
//! - `resources`: the load pipeline (walker, mesh builder, loaders, facade)
//!
//! The whole pipeline is single-threaded and blocking. Loads against one GPU
//! context must be serialized; a load either completes or fails outright.

pub mod data_structures;
pub mod error;
pub mod gpu;
pub mod importer;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use data_structures::light::LightTriangle;
pub use data_structures::model::{Material, Mesh, Model, ModelVertex};
pub use data_structures::texture::{Texture, TextureHandle, TextureRole};
pub use error::LoadError;
pub use gpu::{DecodedImage, DrawModel, GpuContext, GpuModel, PixelFormat, WgpuContext};
pub use resources::{build_model, load_model};
