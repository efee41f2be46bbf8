// Tests for the pure UI state types driven by the interaction engine and
// backend events.

use showroom::ui::{ChatState, OverlayState, MISSING_DESCRIPTION};

#[test]
fn overlay_shows_and_hides() {
    let mut overlay = OverlayState::default();
    assert!(!overlay.is_visible());

    overlay.show("couch", "A deep three-seater couch.");
    assert!(overlay.is_visible());
    assert_eq!(overlay.body(), "A deep three-seater couch.");

    overlay.hide();
    assert!(!overlay.is_visible());
}

#[test]
fn overlay_placeholder_is_not_empty() {
    // Missing descriptions degrade to a placeholder, never an empty panel
    assert!(!MISSING_DESCRIPTION.is_empty());

    let mut overlay = OverlayState::default();
    overlay.show("couch", MISSING_DESCRIPTION);
    assert!(overlay.is_visible());
}

#[test]
fn chat_history_keeps_order_and_roles() {
    let mut chat = ChatState::default();
    chat.push_user("what fits in a small flat?");
    chat.push_reply("A loveseat over a full couch.");

    assert_eq!(chat.lines.len(), 2);
    assert!(chat.lines[0].from_user);
    assert!(!chat.lines[1].from_user);
    assert_eq!(chat.lines[1].text, "A loveseat over a full couch.");
}
