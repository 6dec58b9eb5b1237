mod common;

use common::test_utils::{init_logs, quad_mesh};
use lumen_scene::LoadError;
use lumen_scene::resources::light::extract_light_triangles;

#[test]
fn zero_emissive_mesh_contributes_no_lights() {
    init_logs();
    let mesh = quad_mesh("floor", vec![0, 1, 2, 2, 1, 3], [0.0, 0.0, 0.0], 1.0);
    let mut lights = Vec::new();
    let count = extract_light_triangles(&[mesh], &mut lights).unwrap();
    assert_eq!(count, 0);
    assert!(lights.is_empty());
}

#[test]
fn emissive_mesh_yields_one_light_per_triangle() {
    init_logs();
    let mesh = quad_mesh("lamp", vec![0, 1, 2, 2, 1, 3], [1.0, 1.0, 1.0], 2.5);
    let mut lights = Vec::new();
    let count = extract_light_triangles(&[mesh], &mut lights).unwrap();

    assert_eq!(count, 2);
    assert_eq!(lights.len(), 2);
    for light in &lights {
        assert_eq!(light.color, [1.0, 1.0, 1.0]);
        assert_eq!(light.intensity, 2.5);
        assert_eq!(light.normals, [[0.0, 1.0, 0.0]; 3]);
    }
    assert_eq!(
        lights[0].positions,
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]
    );
    assert_eq!(
        lights[1].positions,
        [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0]]
    );
}

#[test]
fn index_count_not_multiple_of_three_is_malformed() {
    init_logs();
    let mesh = quad_mesh("lamp", vec![0, 1, 2, 3], [1.0, 0.0, 0.0], 1.0);
    let mut lights = Vec::new();
    let err = extract_light_triangles(&[mesh], &mut lights).unwrap_err();
    assert!(matches!(err, LoadError::MalformedMesh { .. }));
    assert!(lights.is_empty());
}

#[test]
fn out_of_bounds_index_is_malformed() {
    init_logs();
    let mesh = quad_mesh("lamp", vec![0, 1, 9], [1.0, 0.0, 0.0], 1.0);
    let mut lights = Vec::new();
    let err = extract_light_triangles(&[mesh], &mut lights).unwrap_err();
    assert!(matches!(err, LoadError::MalformedMesh { .. }));
    assert!(lights.is_empty());
}

#[test]
fn non_emissive_meshes_are_never_validated_as_lights() {
    init_logs();
    // A malformed index buffer on a non-emissive mesh is not the light
    // extractor's concern.
    let mesh = quad_mesh("floor", vec![0, 1], [0.0, 0.0, 0.0], 1.0);
    let mut lights = Vec::new();
    let count = extract_light_triangles(&[mesh], &mut lights).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn a_malformed_mesh_fails_the_whole_extraction_without_partial_output() {
    init_logs();
    let good = quad_mesh("lamp", vec![0, 1, 2], [1.0, 1.0, 1.0], 1.0);
    let bad = quad_mesh("broken", vec![0, 1], [1.0, 1.0, 1.0], 1.0);
    let mut lights = Vec::new();
    let err = extract_light_triangles(&[good, bad], &mut lights).unwrap_err();
    assert!(matches!(err, LoadError::MalformedMesh { .. }));
    assert!(lights.is_empty());
}

#[test]
fn extraction_is_idempotent() {
    init_logs();
    let meshes = vec![
        quad_mesh("lamp", vec![0, 1, 2, 2, 1, 3], [0.2, 0.4, 0.6], 3.0),
        quad_mesh("floor", vec![0, 1, 2], [0.0, 0.0, 0.0], 1.0),
    ];
    let mut lights = Vec::new();
    let first = extract_light_triangles(&meshes, &mut lights).unwrap();
    let second = extract_light_triangles(&meshes, &mut lights).unwrap();

    assert_eq!(first, second);
    assert_eq!(lights.len(), first + second);
    assert_eq!(lights[..first], lights[first..]);
}
