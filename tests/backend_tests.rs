// Tests for backend wire formats and URL resolution. Network behavior is
// exercised against fixtures only; no requests leave the test process.

use showroom::backend::{BackendClient, ChatReply, GeneratedAsset, SceneLayout};

#[test]
fn generated_asset_decodes_full_response() {
    let json = r#"{
        "uid": "a1b2c3",
        "name": "Mid-century couch",
        "license": "by",
        "fileURL": "/downloads/a1/b2/model.obj",
        "tags": ["couch", "sofa"],
        "categories": ["furniture"]
    }"#;

    let asset: GeneratedAsset = serde_json::from_str(json).expect("decode");
    assert_eq!(asset.file_url, "/downloads/a1/b2/model.obj");
    assert_eq!(asset.name, "Mid-century couch");
    assert_eq!(asset.tags, vec!["couch", "sofa"]);
    assert_eq!(asset.categories, vec!["furniture"]);
}

#[test]
fn generated_asset_tolerates_minimal_response() {
    let asset: GeneratedAsset =
        serde_json::from_str(r#"{"fileURL": "http://host/m.obj"}"#).expect("decode");
    assert_eq!(asset.file_url, "http://host/m.obj");
    assert!(asset.name.is_empty());
    assert!(asset.tags.is_empty());
}

#[test]
fn scene_layout_decodes_placements() {
    let json = r#"{
        "objects": [
            {
                "fileURL": "/downloads/c1/couch.obj",
                "position": [1.0, 0.0, -2.0],
                "rotation": [0.0, 1.5708, 0.0],
                "type": "couch"
            },
            {
                "fileURL": "/downloads/l1/lamp.obj",
                "type": "lamp"
            }
        ]
    }"#;

    let layout: SceneLayout = serde_json::from_str(json).expect("decode");
    assert_eq!(layout.objects.len(), 2);
    assert_eq!(layout.objects[0].kind, "couch");
    assert_eq!(layout.objects[0].position, [1.0, 0.0, -2.0]);
    assert!((layout.objects[0].rotation[1] - 1.5708).abs() < 1e-6);
    // Missing placement fields default to the origin
    assert_eq!(layout.objects[1].position, [0.0; 3]);
    assert_eq!(layout.objects[1].rotation, [0.0; 3]);
}

#[test]
fn chat_reply_decodes() {
    let reply: ChatReply =
        serde_json::from_str(r#"{"response": "The couch seats three."}"#).expect("decode");
    assert_eq!(reply.response, "The couch seats three.");
}

#[test]
fn resolve_url_joins_relative_paths() {
    let client = BackendClient::new("http://localhost:8000/");
    assert_eq!(client.base_url(), "http://localhost:8000");
    assert_eq!(
        client.resolve_url("/downloads/m.obj"),
        "http://localhost:8000/downloads/m.obj"
    );
    assert_eq!(
        client.resolve_url("downloads/m.obj"),
        "http://localhost:8000/downloads/m.obj"
    );
}

#[test]
fn resolve_url_passes_absolute_urls_through() {
    let client = BackendClient::new("http://localhost:8000");
    assert_eq!(
        client.resolve_url("https://cdn.example.com/m.obj"),
        "https://cdn.example.com/m.obj"
    );
}
