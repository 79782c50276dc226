pub mod controls;
pub mod keyboard;
pub mod pointer;

pub use controls::{toggle_playback, wire_controls};
pub use keyboard::wire_global_keydown;
pub use pointer::wire_orbit_controls;
