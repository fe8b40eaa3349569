use glam::Vec3;

// Shared tracking/visual tuning constants used by both web and native frontends.

// Smoothing
pub const DAMPER_PERIOD_SEC: f32 = 0.15; // trailing window for pointer smoothing

// Gestures
pub const POINTING_DOT_THRESHOLD: f32 = 0.85; // base/tip alignment for a straight finger
pub const PINCH_DISTANCE: f32 = 0.05; // thumb-tip to index-tip, metres
pub const SHOULDER_OFFSET_DIVISOR: f32 = 8.0; // head height / divisor = neck and shoulder offset

// Mechanical controller
pub const LEFT_WRIST_OFFSET: [f32; 3] = [-0.02, 0.0, 0.09]; // grip-local
pub const RIGHT_WRIST_OFFSET: [f32; 3] = [0.02, 0.0, 0.09]; // grip-local
pub const WRIST_YAW_CORRECTION: f32 = std::f32::consts::PI / 8.0 * 1.5;
pub const WRIST_ROLL_CORRECTION: f32 = std::f32::consts::FRAC_PI_2;
pub const CONTROLLER_POINTER_LOCAL: [f32; 3] = [0.0, -1.0, -1.0]; // down/forward, normalized on use

// Haptics
pub const HAPTIC_DEFAULT_INTENSITY: f32 = 1.0;
pub const HAPTIC_DEFAULT_DURATION_MS: f32 = 100.0;
pub const SELECT_PULSE_INTENSITY: f32 = 0.5;
pub const SELECT_PULSE_DURATION_MS: f32 = 30.0;

// Pointer beam
pub const POINTER_DEFAULT_LENGTH: f32 = 1.0;
pub const POINTER_WIDTH: f32 = 0.01;
pub const POINTER_ACTIVE_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 0.8]; // gray
pub const POINTER_PRESSED_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 0.8]; // yellow

// Debug markers
pub const WRIST_AXIS_SIZE: f32 = 0.1;
pub const GRIP_AXIS_SIZE: f32 = 0.2;
pub const JOINT_AXIS_SIZE: f32 = 0.015;
pub const FINGER_BALL_RADIUS: f32 = 0.01;
pub const WRIST_BALL_RADIUS: f32 = 0.03;
pub const HEAD_RADIUS: f32 = 0.1;
pub const HEAD_AXIS_SIZE: f32 = 0.2;
pub const NOSE_RADIUS: f32 = 0.05;

// Scene layout
pub const GROUND_SIZE: f32 = 100.0;
pub const GRID_SIZE: f32 = 10.0;
pub const GRID_DIVISIONS: u32 = 10;
pub const WORLD_AXES_SIZE: f32 = 10.0;

// Palette
pub const SKY_COLOR: [f32; 4] = [0.53, 0.81, 0.92, 1.0]; // skyblue
pub const GROUND_COLOR: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
pub const GRID_COLOR: [f32; 4] = [0.27, 0.27, 0.27, 1.0];
pub const GRID_CENTER_COLOR: [f32; 4] = [0.53, 0.53, 0.53, 1.0];
pub const HEAD_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
pub const NOSE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const GRIP_COLOR: [f32; 4] = [0.2, 0.2, 0.25, 1.0];
pub const POINTING_COLOR: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
pub const NOT_POINTING_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

// Spectator camera
pub const SPECTATOR_EYE: [f32; 3] = [-7.0, 10.0, 15.0];
pub const SPECTATOR_FOVY_DEG: f32 = 45.0;
pub const SPECTATOR_ZNEAR: f32 = 0.1;
pub const SPECTATOR_ZFAR: f32 = 100.0;

#[inline]
pub fn controller_pointer_vec3() -> Vec3 {
    Vec3::from(CONTROLLER_POINTER_LOCAL).normalize()
}
