// Tests for the async model loader: OBJ parsing, size-class normalization,
// grounding, and failure behavior.

use std::time::{Duration, Instant};

use cgmath::{Deg, Vector3};
use showroom::interaction::SizeClass;
use showroom::loader::{
    fit_to_size_class, load_model, AssetSource, LoadRequest, MeshData, ModelLoader,
};

// Quad spanning x in [-2, 2] and y in [-1, 1]; largest extent 4 on X.
const QUAD_OBJ: &str = "\
v -2.0 -1.0 0.0
v 2.0 -1.0 0.0
v 2.0 1.0 0.0
v -2.0 1.0 0.0
f 1 2 3
f 1 3 4
";

fn quad_request(path: std::path::PathBuf) -> LoadRequest {
    LoadRequest {
        source: AssetSource::Path(path),
        tag: "couch".to_string(),
        position: Vector3::new(1.0, 0.0, -2.0),
        rotation_y: Deg(90.0),
        size_class: SizeClass::Large,
        epoch: 7,
    }
}

fn write_obj(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.obj");
    std::fs::write(&path, contents).expect("write obj");
    (dir, path)
}

#[test]
fn load_model_normalizes_scale_to_size_class() {
    let (_dir, path) = write_obj(QUAD_OBJ);
    let model = load_model(&quad_request(path)).expect("load should succeed");

    // Largest extent 4 scaled onto the Large target of 2.4
    let expected_scale = SizeClass::Large.target_extent() / 4.0;
    assert!((model.scale - expected_scale).abs() < 1e-6);

    // Lowest point (-1) lifted to the floor after scaling
    assert!((model.lift - expected_scale).abs() < 1e-6);

    assert_eq!(model.meshes.len(), 1);
    assert_eq!(model.meshes[0].positions.len(), 12);
    assert_eq!(model.meshes[0].indices.len(), 6);
    assert_eq!(model.epoch, 7);
    assert_eq!(model.tag, "couch");
}

#[test]
fn load_model_fails_on_missing_file() {
    let (_dir, path) = write_obj(QUAD_OBJ);
    let missing = path.with_file_name("nope.obj");
    let mut request = quad_request(path);
    request.source = AssetSource::Path(missing);

    assert!(load_model(&request).is_err());
}

#[test]
fn load_model_fails_on_geometry_free_file() {
    let (_dir, path) = write_obj("# just a comment\n");
    assert!(load_model(&quad_request(path)).is_err());
}

#[test]
fn fit_to_size_class_uses_largest_extent() {
    let mesh = MeshData {
        // Two points: extents (1, 10, 2); largest is Y
        positions: vec![0.0, -5.0, 0.0, 1.0, 5.0, 2.0],
        normals: vec![],
        indices: vec![0, 1, 0],
    };
    let (scale, lift) = fit_to_size_class(&[mesh], SizeClass::Small);
    assert!((scale - SizeClass::Small.target_extent() / 10.0).abs() < 1e-6);
    assert!((lift - 5.0 * scale).abs() < 1e-6);
}

#[test]
fn fit_to_size_class_handles_degenerate_geometry() {
    let mesh = MeshData {
        positions: vec![1.0, 2.0, 3.0],
        normals: vec![],
        indices: vec![0, 0, 0],
    };
    // A single point has no extent; the mesh is left unscaled
    let (scale, lift) = fit_to_size_class(&[mesh], SizeClass::Medium);
    assert_eq!(scale, 1.0);
    assert_eq!(lift, 0.0);
}

#[test]
fn spawned_load_arrives_through_poll() {
    let (_dir, path) = write_obj(QUAD_OBJ);
    let loader = ModelLoader::new();
    loader.spawn(quad_request(path));

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let models = loader.poll();
        if !models.is_empty() {
            assert_eq!(models.len(), 1);
            assert_eq!(models[0].tag, "couch");
            break;
        }
        assert!(Instant::now() < deadline, "load did not complete in time");
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn failed_load_yields_nothing() {
    let loader = ModelLoader::new();
    loader.spawn(LoadRequest {
        source: AssetSource::Path(std::path::PathBuf::from("/definitely/not/here.obj")),
        tag: "couch".to_string(),
        position: Vector3::new(0.0, 0.0, 0.0),
        rotation_y: Deg(0.0),
        size_class: SizeClass::Medium,
        epoch: 0,
    });

    // Give the worker time to fail, then confirm silence
    std::thread::sleep(Duration::from_millis(300));
    assert!(loader.poll().is_empty());
}
