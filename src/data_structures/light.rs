//! Triangle light records extracted from emissive meshes.

/// One area-light triangle: per-vertex position and normal plus the emitting
/// mesh's shared color and intensity.
///
/// Derived data, recomputed fully on every load. The caller-side light
/// collection owns long-term storage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightTriangle {
    pub positions: [[f32; 3]; 3],
    pub normals: [[f32; 3]; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}
