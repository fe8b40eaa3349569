//! Gamepad state as read from an XR input source.
//!
//! Layout follows the WebXR Gamepads module `xr-standard` mapping
//! (<https://www.w3.org/TR/webxr-gamepads-module-1/>).

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GamepadButton {
    pub pressed: bool,
    pub touched: bool,
    pub value: f32,
}

impl GamepadButton {
    pub fn pressed(pressed: bool) -> Self {
        Self {
            pressed,
            touched: pressed,
            value: if pressed { 1.0 } else { 0.0 },
        }
    }
}

/// One frame's gamepad snapshot. Arrays are as long as the device reports.
#[derive(Clone, Debug, Default)]
pub struct GamepadState {
    pub axes: SmallVec<[f32; 4]>,
    pub buttons: SmallVec<[GamepadButton; 8]>,
    pub has_haptics: bool,
}

impl GamepadState {
    /// `false` when the device has no button at `index`.
    #[inline]
    pub fn is_pressed(&self, index: usize) -> bool {
        self.buttons.get(index).map(|b| b.pressed).unwrap_or(false)
    }
}

/// A vibration request waiting to be forwarded to the device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HapticPulse {
    pub intensity: f32,
    pub duration_ms: f32,
}
