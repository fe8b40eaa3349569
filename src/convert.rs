// Conversions from raw WebXR readings into `xr_core` snapshot types.
//
// Kept free of `web_sys` so the host-side tests can exercise them.

use glam::{Quat, Vec3};
use xr_core::{GamepadButton, GamepadState, HapticPulse, Pose};

use crate::constants::{HAPTIC_MAX_DURATION_MS, HAPTIC_MAX_INTENSITY};

/// Pose from an `XRRigidTransform` position and orientation (both `DOMPointReadOnly`).
pub fn pose_from_xyzw(position: [f64; 3], orientation: [f64; 4]) -> Pose {
    let [x, y, z] = position.map(|v| v as f32);
    let [qx, qy, qz, qw] = orientation.map(|v| v as f32);
    let rotation = Quat::from_xyzw(qx, qy, qz, qw);
    let rotation = if rotation.length_squared() > 0.0 {
        rotation.normalize()
    } else {
        Quat::IDENTITY
    };
    Pose::new(Vec3::new(x, y, z), rotation)
}

/// One `GamepadButton` reading: pressed, touched, value.
pub type RawButton = (bool, bool, f64);

pub fn gamepad_from_raw(axes: &[f64], buttons: &[RawButton], has_haptics: bool) -> GamepadState {
    GamepadState {
        axes: axes.iter().map(|a| *a as f32).collect(),
        buttons: buttons
            .iter()
            .map(|&(pressed, touched, value)| GamepadButton {
                pressed,
                touched,
                value: value as f32,
            })
            .collect(),
        has_haptics,
    }
}

/// Arguments for `GamepadHapticActuator.pulse(value, duration)`.
pub fn pulse_args(pulse: &HapticPulse) -> (f64, f64) {
    (
        pulse.intensity.clamp(0.0, HAPTIC_MAX_INTENSITY) as f64,
        pulse.duration_ms.clamp(0.0, HAPTIC_MAX_DURATION_MS) as f64,
    )
}
