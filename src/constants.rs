// DOM and WebXR wiring for the browser front-end.
//
// Tracking and scene tuning lives in `xr_core::constants`; this module only
// holds what the page and the XR session need.

// Page elements
pub const CANVAS_ID: &str = "app-canvas";
pub const VR_BUTTON_ID: &str = "vr-button";
pub const FPS_OVERLAY_ID: &str = "fps-overlay";

// VR button labels
pub const VR_ENTER_LABEL: &str = "ENTER VR";
pub const VR_EXIT_LABEL: &str = "EXIT VR";
pub const VR_UNSUPPORTED_LABEL: &str = "VR NOT SUPPORTED";

// Session
pub const SESSION_MODE: &str = "immersive-vr";
pub const OPTIONAL_FEATURES: [&str; 2] = ["local-floor", "hand-tracking"];

// Stats
pub const FPS_WINDOW_SEC: f32 = 0.5; // overlay refresh interval

// Desktop view: where the head marker stands before a session starts
pub const DESKTOP_HEAD_HEIGHT: f32 = 1.6;

// Vertex buffer starts this large and grows by powers of two
pub const INITIAL_VERTEX_CAPACITY: usize = 16 * 1024;

// Haptic clamp (GamepadHapticActuator.pulse takes 0..=1)
pub const HAPTIC_MAX_INTENSITY: f32 = 1.0;
pub const HAPTIC_MAX_DURATION_MS: f32 = 5000.0;
