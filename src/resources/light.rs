//! Light extraction: emissive mesh triangles become area light sources.

use crate::data_structures::light::LightTriangle;
use crate::data_structures::model::Mesh;
use crate::error::LoadError;

/// Copy every triangle of every emissive mesh into `lights` as a
/// [`LightTriangle`] carrying the triangle's per-vertex positions and
/// normals and the mesh's emissive color and intensity.
///
/// All emissive meshes are validated before anything is appended, so a
/// failed call leaves `lights` untouched. The scan is pure: running it twice
/// over the same mesh list appends the same triangles twice.
///
/// Returns the number of triangles extracted.
pub fn extract_light_triangles(
    meshes: &[Mesh],
    lights: &mut Vec<LightTriangle>,
) -> Result<usize, LoadError> {
    for mesh in meshes.iter().filter(|mesh| mesh.material.is_emissive()) {
        validate_triangle_list(mesh)?;
    }

    let mut count = 0;
    for mesh in meshes.iter().filter(|mesh| mesh.material.is_emissive()) {
        for triple in mesh.indices.chunks_exact(3) {
            let mut positions = [[0.0f32; 3]; 3];
            let mut normals = [[0.0f32; 3]; 3];
            for (corner, &index) in triple.iter().enumerate() {
                let vertex = &mesh.vertices[index as usize];
                positions[corner] = vertex.position;
                normals[corner] = vertex.normal;
            }
            lights.push(LightTriangle {
                positions,
                normals,
                color: mesh.material.emissive,
                intensity: mesh.material.intensity,
            });
            count += 1;
        }
    }
    log::info!("{count} triangle lights loaded");
    Ok(count)
}

/// Checks the invariants the extraction loop relies on: index count is a
/// multiple of 3 and every index is in bounds.
fn validate_triangle_list(mesh: &Mesh) -> Result<(), LoadError> {
    if mesh.indices.len() % 3 != 0 {
        return Err(LoadError::MalformedMesh {
            mesh: mesh.name.clone(),
            message: format!("index count {} is not a multiple of 3", mesh.indices.len()),
        });
    }
    if let Some(&index) = mesh
        .indices
        .iter()
        .find(|&&index| index as usize >= mesh.vertices.len())
    {
        return Err(LoadError::MalformedMesh {
            mesh: mesh.name.clone(),
            message: format!(
                "index {index} out of bounds for {} vertices",
                mesh.vertices.len()
            ),
        });
    }
    Ok(())
}
