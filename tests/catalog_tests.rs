// Tests for the model-type catalog: allow-list membership, descriptions,
// and size-class fallback.

use showroom::interaction::{Catalog, SizeClass};

#[test]
fn showroom_catalog_marks_furniture_interactive() {
    let catalog = Catalog::showroom();
    assert!(catalog.is_interactive("couch"));
    assert!(catalog.is_interactive("lamp"));
    // The rug is decor: rendered but never focused
    assert!(!catalog.is_interactive("rug"));
    assert!(!catalog.is_interactive("floor"));
}

#[test]
fn known_tags_have_descriptions() {
    let catalog = Catalog::showroom();
    for tag in ["couch", "table", "chair", "lamp", "bookshelf", "bed", "plant"] {
        let description = catalog.description(tag);
        assert!(description.is_some(), "missing description for {tag}");
        assert!(!description.unwrap().is_empty());
    }
}

#[test]
fn unknown_tag_gets_fallback_size_and_no_description() {
    let catalog = Catalog::showroom();
    assert_eq!(catalog.size_class("hovercraft"), SizeClass::Medium);
    assert!(catalog.description("hovercraft").is_none());
    assert!(!catalog.is_interactive("hovercraft"));
}

#[test]
fn size_classes_are_ordered_by_extent() {
    assert!(SizeClass::Small.target_extent() < SizeClass::Medium.target_extent());
    assert!(SizeClass::Medium.target_extent() < SizeClass::Large.target_extent());
}

#[test]
fn insert_overrides_existing_entries() {
    let mut catalog = Catalog::showroom();
    assert!(catalog.is_interactive("couch"));

    catalog.insert("couch", SizeClass::Small, false, "A tiny couch.");
    assert!(!catalog.is_interactive("couch"));
    assert_eq!(catalog.size_class("couch"), SizeClass::Small);
    assert_eq!(catalog.description("couch"), Some("A tiny couch."));
}

#[test]
fn interactive_tags_feed_the_engine_allow_list() {
    let catalog = Catalog::showroom();
    let tags = catalog.interactive_tags();
    assert!(tags.iter().any(|t| t == "couch"));
    assert!(!tags.iter().any(|t| t == "rug"));
}
