//! Loading pipeline: import, scene-graph walk, texture/mesh building and
//! light extraction.
//!
//! [`load_model`] is the facade. The whole pipeline is synchronous and
//! blocking; a load either completes or fails outright, and loads against a
//! single GPU context must be serialized.

pub mod light;
pub mod mesh;
pub mod texture;

use std::path::Path;

use crate::data_structures::light::LightTriangle;
use crate::data_structures::model::Model;
use crate::error::LoadError;
use crate::gpu::GpuContext;
use crate::importer::{self, ImportSettings, ImportedScene};

/// Hard cap on node nesting. The walk checks the hierarchy against it once,
/// before recursing, so malformed input fails the load instead of
/// overflowing the stack.
const MAX_NODE_DEPTH: usize = 256;

/// Load a model from disk: import the scene graph with the fixed processing
/// flags (triangulate, flip UVs, generate missing normals), flatten it into
/// meshes, and append one [`LightTriangle`] per triangle of every emissive
/// mesh to `lights`.
///
/// On any error no partial model escapes and `lights` is left untouched.
pub fn load_model(
    path: &str,
    gpu: &mut dyn GpuContext,
    lights: &mut Vec<LightTriangle>,
) -> Result<Model, LoadError> {
    let source = Path::new(path);
    let scene = importer::gltf::import_file(source, ImportSettings::default())?;
    let model = build_model(&scene, source, gpu)?;
    light::extract_light_triangles(&model.meshes, lights)?;
    Ok(model)
}

/// Flatten an imported scene into a [`Model`]: a depth-first pre-order walk
/// over the node tree, building every referenced mesh in attachment order.
///
/// `source` is the asset path the scene came from; its parent directory is
/// used to resolve relative texture paths.
pub fn build_model(
    scene: &ImportedScene,
    source: &Path,
    gpu: &mut dyn GpuContext,
) -> Result<Model, LoadError> {
    check_tree_shape(scene, source)?;

    let directory = source
        .parent()
        .map(|parent| parent.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut model = Model {
        directory,
        ..Model::default()
    };
    for &root in &scene.roots {
        process_node(root, scene, &mut model, gpu);
    }
    Ok(model)
}

/// Visits the node's meshes first, then recurses into its children in child
/// order. Mesh attachment order is preserved in the flattened list.
fn process_node(index: usize, scene: &ImportedScene, model: &mut Model, gpu: &mut dyn GpuContext) {
    let Some(node) = scene.nodes.get(index) else {
        log::warn!("node index {index} out of bounds, skipping");
        return;
    };
    for &mesh_index in &node.mesh_indices {
        if let Some(imported) = scene.meshes.get(mesh_index) {
            let built = mesh::build_mesh(
                imported,
                scene,
                &model.directory,
                &mut model.textures_loaded,
                gpu,
            );
            model.meshes.push(built);
        }
    }
    for &child in &node.children {
        process_node(child, scene, model, gpu);
    }
}

/// One-shot precondition check before the recursive walk: the node graph
/// reachable from the roots must be a tree no deeper than
/// [`MAX_NODE_DEPTH`]. A node reached twice (cycle or shared child) or an
/// over-deep chain fails the load.
fn check_tree_shape(scene: &ImportedScene, source: &Path) -> Result<(), LoadError> {
    let mut visits = 0usize;
    let mut stack: Vec<(usize, usize)> = scene.roots.iter().map(|&root| (root, 0)).collect();
    while let Some((index, depth)) = stack.pop() {
        visits += 1;
        if visits > scene.nodes.len() {
            return Err(LoadError::AssetImport {
                path: source.to_path_buf(),
                message: "node hierarchy is not tree-shaped".to_string(),
            });
        }
        if depth > MAX_NODE_DEPTH {
            return Err(LoadError::AssetImport {
                path: source.to_path_buf(),
                message: format!("node hierarchy exceeds depth {MAX_NODE_DEPTH}"),
            });
        }
        let Some(node) = scene.nodes.get(index) else {
            continue;
        };
        for &child in &node.children {
            stack.push((child, depth + 1));
        }
    }
    Ok(())
}
