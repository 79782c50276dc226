// Keyboard shortcuts, kept free of browser types so they can be tested on the host.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlayback,
    ToggleOverlay,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " => Some(KeyAction::TogglePlayback),
        "h" | "H" => Some(KeyAction::ToggleOverlay),
        _ => None,
    }
}
