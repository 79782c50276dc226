// Browser-side constants: element ids, audio graph and renderer settings.

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const OVERLAY_ID: &str = "start-overlay";
pub const OVERLAY_ENTER_ID: &str = "overlay-enter";
pub const PLAY_TOGGLE_ID: &str = "play-toggle";
pub const UPLOAD_BUTTON_ID: &str = "upload-button";
pub const FILE_INPUT_ID: &str = "file-input";

// Audio graph
pub const FFT_SIZE: u32 = 512; // 256 frequency bins
pub const CROSS_ORIGIN: &str = "anonymous";

// Controls
pub const PLAY_LABEL: &str = "Play";
pub const PAUSE_LABEL: &str = "Pause";

// Renderer
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches
