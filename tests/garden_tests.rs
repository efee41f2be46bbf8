// Tests for the garden dataset: parsing, projection layout, category
// colors, and scene population.

use cgmath::Vector3;
use showroom::garden::{
    category_color, interactive_categories, layout_positions, load_dataset, populate,
    GardenDataset, SPHERE_RADIUS, TIMING_CATEGORIES,
};
use showroom::gfx::camera::{CameraController, CameraManager, OrbitCamera};
use showroom::gfx::scene::Scene;
use showroom::interaction::InteractionEngine;

fn sample_dataset() -> GardenDataset {
    serde_json::from_str(
        r#"{
            "points": [
                {
                    "content": "It started with constant compliments.",
                    "timing": "beginning",
                    "tactics": ["love_bombing"],
                    "projection": [0.0, 0.0]
                },
                {
                    "content": "Days of silence after any disagreement.",
                    "timing": "middle",
                    "tactics": ["silent_treatment", "gaslighting"],
                    "projection": [10.0, 0.0]
                },
                {
                    "content": "Leaving felt impossible at first.",
                    "timing": "leaving",
                    "tactics": [],
                    "projection": [5.0, 4.0]
                }
            ]
        }"#,
    )
    .expect("sample dataset should parse")
}

fn make_scene() -> Scene {
    let camera = OrbitCamera::new(14.0, 0.6, 0.3, Vector3::new(0.0, 1.0, 0.0), 1.0);
    let controller = CameraController::new(0.005, 0.4);
    Scene::new(CameraManager::new(camera, controller))
}

#[test]
fn dataset_parses_with_defaults() {
    let dataset: GardenDataset = serde_json::from_str(
        r#"{"points": [{"content": "bare", "projection": [1.0, 2.0]}]}"#,
    )
    .expect("decode");
    assert_eq!(dataset.points.len(), 1);
    assert!(dataset.points[0].timing.is_empty());
    assert!(dataset.points[0].tactics.is_empty());
}

#[test]
fn load_dataset_rejects_missing_and_empty_files() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("nope.json");
    assert!(load_dataset(&missing).is_err());

    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, r#"{"points": []}"#).unwrap();
    assert!(load_dataset(&empty).is_err());
}

#[test]
fn unknown_timing_normalizes_to_other() {
    let dataset: GardenDataset = serde_json::from_str(
        r#"{"points": [{"content": "x", "timing": "someday", "projection": [0, 0]}]}"#,
    )
    .unwrap();
    assert_eq!(dataset.points[0].category(), "other");
}

#[test]
fn layout_normalizes_widest_axis_to_spread() {
    let dataset = sample_dataset();
    let spread = 9.0;
    let positions = layout_positions(&dataset, spread);

    // Projection X spans [0, 10]; normalized to [-9, 9]
    assert!((positions[0].x - -spread).abs() < 1e-4);
    assert!((positions[1].x - spread).abs() < 1e-4);

    // Everything stays within the spread on both ground axes
    for position in &positions {
        assert!(position.x.abs() <= spread + 1e-4);
        assert!(position.z.abs() <= spread + 1e-4);
        assert!(position.y > SPHERE_RADIUS);
    }

    // More tactic flags sit taller
    assert!(positions[1].y > positions[2].y);
}

#[test]
fn category_colors_are_stable_and_distinct() {
    let mut seen = Vec::new();
    for category in TIMING_CATEGORIES {
        let color = category_color(category);
        assert_eq!(color, category_color(category));
        assert!(!seen.contains(&color), "duplicate color for {category}");
        seen.push(color);
    }
    // Unknown categories share the gray fallback
    assert_eq!(category_color("someday"), category_color("whenever"));
}

#[test]
fn interactive_categories_deduplicates() {
    let dataset = sample_dataset();
    let categories = interactive_categories(&dataset);
    assert_eq!(categories.len(), 3);
    assert!(categories.contains(&"beginning".to_string()));
    assert!(categories.contains(&"middle".to_string()));
    assert!(categories.contains(&"leaving".to_string()));
}

#[test]
fn populate_builds_spheres_and_registers_targets() {
    let dataset = sample_dataset();
    let mut scene = make_scene();
    let mut engine = InteractionEngine::new(2.5, interactive_categories(&dataset));

    let bindings = populate(&mut scene, &mut engine, &dataset, 9.0);

    assert_eq!(bindings.len(), 3);
    assert_eq!(scene.get_object_count(), 3);
    assert_eq!(engine.len(), 3);
    assert!(scene.material_manager.contains("garden_beginning"));
    assert!(scene.material_manager.contains("garden_middle"));

    // Each target carries its chunk content as the tooltip text
    for ((target, _), point) in bindings.iter().zip(&dataset.points) {
        let placed = engine.get(*target).expect("registered target");
        assert_eq!(placed.description.as_deref(), Some(point.content.as_str()));
    }
}

#[test]
fn proximity_to_a_sphere_focuses_it() {
    let dataset = sample_dataset();
    let mut scene = make_scene();
    let mut engine = InteractionEngine::new(2.5, interactive_categories(&dataset));
    let bindings = populate(&mut scene, &mut engine, &dataset, 9.0);

    let first = engine.get(bindings[0].0).unwrap().position;
    let viewpoint = first + Vector3::new(0.5, 0.0, 0.0);

    let change = engine.tick(viewpoint).expect("should focus nearest sphere");
    assert_eq!(change.entered, Some(bindings[0].0));
}
