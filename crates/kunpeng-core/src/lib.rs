pub mod analysis;
pub mod camera;
pub mod constants;
pub mod environment;
pub mod error;
pub mod kunpeng;
pub mod math;
pub mod ocean;
pub mod playback;
pub mod scene;
pub mod smoothing;

pub use analysis::*;
pub use camera::*;
pub use constants::*;
pub use environment::*;
pub use error::*;
pub use kunpeng::*;
pub use ocean::*;
pub use playback::*;
pub use scene::*;
pub use smoothing::*;

// Shaders bundled as string constants
pub static OCEAN_WGSL: &str = include_str!("../shaders/ocean.wgsl");
pub static KUNPENG_WGSL: &str = include_str!("../shaders/kunpeng.wgsl");
pub static SPRITES_WGSL: &str = include_str!("../shaders/sprites.wgsl");
