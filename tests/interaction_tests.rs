// Tests for the proximity focus engine: nearest-in-range selection,
// edge-triggered transitions, tie-breaking, and clear semantics.

use cgmath::Vector3;
use showroom::interaction::{InteractionEngine, PlacedObject};

const RADIUS: f32 = 2.0;

fn make_engine() -> InteractionEngine {
    InteractionEngine::new(RADIUS, ["couch", "lamp", "table", "chair"])
}

fn placed_at(tag: &str, x: f32, z: f32) -> PlacedObject {
    PlacedObject {
        tag: tag.to_string(),
        position: Vector3::new(x, 0.0, z),
        description: Some(format!("{tag} description")),
    }
}

fn origin() -> Vector3<f32> {
    Vector3::new(0.0, 0.0, 0.0)
}

#[test]
fn highlights_nearest_object_within_radius() {
    let mut engine = make_engine();
    let a = engine.register(placed_at("couch", 1.5, 0.0));
    let b = engine.register(placed_at("lamp", 1.8, 0.0));

    let change = engine.tick(origin()).expect("first tick should focus");
    assert_eq!(change.left, None);
    assert_eq!(change.entered, Some(a));
    assert_eq!(engine.focused(), Some(a));
    assert_ne!(engine.focused(), Some(b));
}

#[test]
fn no_focus_when_everything_is_out_of_range() {
    let mut engine = make_engine();
    engine.register(placed_at("couch", 5.0, 0.0));
    engine.register(placed_at("lamp", 0.0, -7.5));

    assert_eq!(engine.tick(origin()), None);
    assert_eq!(engine.focused(), None);
}

#[test]
fn distance_equal_to_radius_is_out_of_range() {
    let mut engine = make_engine();
    engine.register(placed_at("couch", RADIUS, 0.0));

    assert_eq!(engine.tick(origin()), None);
    assert_eq!(engine.focused(), None);

    // Just inside qualifies
    let mut engine = make_engine();
    let a = engine.register(placed_at("couch", RADIUS - 0.001, 0.0));
    let change = engine.tick(origin()).unwrap();
    assert_eq!(change.entered, Some(a));
}

#[test]
fn repeated_ticks_with_unchanged_state_emit_nothing() {
    let mut engine = make_engine();
    engine.register(placed_at("couch", 1.0, 0.0));

    assert!(engine.tick(origin()).is_some());
    for _ in 0..10 {
        assert_eq!(engine.tick(origin()), None, "tick must be edge-triggered");
    }
}

#[test]
fn equal_distance_tie_goes_to_first_registered() {
    // Symmetric positions, identical distance from the origin
    let mut engine = make_engine();
    let a = engine.register(placed_at("couch", 1.0, 0.0));
    let _b = engine.register(placed_at("lamp", -1.0, 0.0));
    assert_eq!(engine.tick(origin()).unwrap().entered, Some(a));

    // Registration order reversed: the other object wins, reproducibly
    let mut engine = make_engine();
    let b = engine.register(placed_at("lamp", -1.0, 0.0));
    let _a = engine.register(placed_at("couch", 1.0, 0.0));
    assert_eq!(engine.tick(origin()).unwrap().entered, Some(b));
}

#[test]
fn focus_moves_when_nearest_goes_out_of_range() {
    let mut engine = make_engine();
    let a = engine.register(placed_at("couch", 1.5, 0.0));
    let b = engine.register(placed_at("lamp", -1.8, 0.0));

    // From the origin: A at 1.5, B at 1.8
    assert_eq!(engine.tick(origin()).unwrap().entered, Some(a));

    // Viewpoint shifts: A now at 2.5 (out), B at 0.8
    let change = engine.tick(Vector3::new(-1.0, 0.0, 0.0)).unwrap();
    assert_eq!(change.left, Some(a));
    assert_eq!(change.entered, Some(b));
    assert_eq!(engine.focused(), Some(b));
}

#[test]
fn leaving_range_entirely_emits_leave_only() {
    let mut engine = make_engine();
    let a = engine.register(placed_at("couch", 1.0, 0.0));
    engine.tick(origin()).unwrap();

    let change = engine.tick(Vector3::new(10.0, 0.0, 0.0)).unwrap();
    assert_eq!(change.left, Some(a));
    assert_eq!(change.entered, None);
    assert_eq!(engine.focused(), None);
}

#[test]
fn reentry_produces_a_fresh_enter() {
    let mut engine = make_engine();
    let a = engine.register(placed_at("couch", 1.0, 0.0));

    assert_eq!(engine.tick(origin()).unwrap().entered, Some(a));
    assert_eq!(
        engine.tick(Vector3::new(10.0, 0.0, 0.0)).unwrap().left,
        Some(a)
    );

    // Coming back triggers a brand new enter; focus is not sticky
    let change = engine.tick(origin()).unwrap();
    assert_eq!(change.left, None);
    assert_eq!(change.entered, Some(a));
}

#[test]
fn clear_resets_focus_and_registry_without_leave_event() {
    let mut engine = make_engine();
    engine.register(placed_at("couch", 1.0, 0.0));
    engine.tick(origin()).unwrap();
    assert!(engine.focused().is_some());

    engine.clear();
    assert_eq!(engine.focused(), None);
    assert!(engine.is_empty());

    // No pending leave: the next tick over the empty registry is silent
    assert_eq!(engine.tick(origin()), None);
}

#[test]
fn non_interactive_tag_is_never_selected_even_when_nearest() {
    let mut engine = make_engine();
    let _rug = engine.register(placed_at("rug", 0.1, 0.0));
    let couch = engine.register(placed_at("couch", 1.5, 0.0));

    let change = engine.tick(origin()).unwrap();
    assert_eq!(change.entered, Some(couch));
}

#[test]
fn missing_description_still_registers_and_focuses() {
    let mut engine = make_engine();
    let id = engine.register(PlacedObject {
        tag: "couch".to_string(),
        position: Vector3::new(1.0, 0.0, 0.0),
        description: None,
    });

    assert_eq!(engine.tick(origin()).unwrap().entered, Some(id));
    assert!(engine.get(id).unwrap().description.is_none());
}

#[test]
fn clear_bumps_epoch_and_stale_registrations_are_dropped() {
    let mut engine = make_engine();
    let old_epoch = engine.epoch();
    engine.clear();
    assert_ne!(engine.epoch(), old_epoch);

    // A load completion issued before the clear resolves to nothing
    assert!(engine
        .register_at(old_epoch, placed_at("couch", 1.0, 0.0))
        .is_none());
    assert!(engine.is_empty());

    // A current-epoch completion registers normally
    assert!(engine
        .register_at(engine.epoch(), placed_at("couch", 1.0, 0.0))
        .is_some());
    assert_eq!(engine.len(), 1);
}

#[test]
fn viewpoint_above_object_uses_full_euclidean_distance() {
    let mut engine = make_engine();
    engine.register(placed_at("couch", 1.5, 0.0));

    // Horizontal 1.5 but vertical 1.5 as well: total ~2.12, out of range
    assert_eq!(engine.tick(Vector3::new(0.0, 1.5, 0.0)), None);
}
