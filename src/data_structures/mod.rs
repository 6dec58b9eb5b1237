//! Scene data types produced by the loader.
//!
//! - `model` contains vertex, material, mesh and model definitions
//! - `texture` contains texture roles, handles and the shared texture record
//! - `light` contains the triangle light record extracted from emissive meshes

pub mod light;
pub mod model;
pub mod texture;
