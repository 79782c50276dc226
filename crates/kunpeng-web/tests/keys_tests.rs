// Host-side tests for the keyboard mapping.
// The web crate is wasm-only, so the pure module is included directly.

mod keys {
    include!("../src/keys.rs");
}

use keys::*;

#[test]
fn space_toggles_playback() {
    assert_eq!(key_action(" "), Some(KeyAction::TogglePlayback));
}

#[test]
fn h_toggles_overlay_in_either_case() {
    assert_eq!(key_action("h"), Some(KeyAction::ToggleOverlay));
    assert_eq!(key_action("H"), Some(KeyAction::ToggleOverlay));
}

#[test]
fn other_keys_are_ignored() {
    for key in ["Enter", "Escape", "p", "ArrowUp", "Spacebar", ""] {
        assert_eq!(key_action(key), None, "key {:?}", key);
    }
}
