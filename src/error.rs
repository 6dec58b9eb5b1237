//! Load-time error kinds.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while importing a scene and turning it into GPU resources.
///
/// `AssetImport` aborts the whole load. `AssetDecode` is caught at the texture
/// loader boundary: the mesh builder logs it and skips the texture slot
/// instead of failing the load. `MalformedMesh` surfaces from the light
/// extractor when a mesh violates the triangle-list invariant.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The importer failed or returned an incomplete/rootless scene.
    #[error("asset import failed for {path}: {message}")]
    AssetImport { path: PathBuf, message: String },

    /// A texture image could not be read or decoded.
    #[error("texture decode failed for {path}: {message}")]
    AssetDecode { path: PathBuf, message: String },

    /// A mesh index buffer is not a valid triangle list.
    #[error("malformed mesh '{mesh}': {message}")]
    MalformedMesh { mesh: String, message: String },
}
