//! Pointer derivation for the standard WebXR grip controller.

use glam::{Quat, Vec2, Vec3};

use crate::constants::{
    controller_pointer_vec3, LEFT_WRIST_OFFSET, RIGHT_WRIST_OFFSET, WRIST_ROLL_CORRECTION,
    WRIST_YAW_CORRECTION,
};
use crate::controller::{ControllerState, XrController};
use crate::frame::FrameClock;
use crate::gamepad::GamepadState;
use crate::head::Head;
use crate::pose::{Handedness, Pose};
use crate::snapshot::InputSnapshot;

// xr-standard button slots
const BUTTON_TOUCHPAD: usize = 2;
const BUTTON_THUMBSTICK: usize = 3;
const BUTTON_A: usize = 4;
const BUTTON_B: usize = 5;

/// Grip-local offset from the controller's grip point to where the wrist sits.
pub fn wrist_offset(hand: Handedness) -> Vec3 {
    Vec3::from(match hand {
        Handedness::Left => LEFT_WRIST_OFFSET,
        Handedness::Right => RIGHT_WRIST_OFFSET,
    })
}

/// Rotation that turns a held controller into a fingers-forward, thumb-up hand.
pub fn wrist_correction(hand: Handedness) -> Quat {
    let s = -hand.sign();
    Quat::from_rotation_z(s * WRIST_ROLL_CORRECTION)
        * Quat::from_rotation_y(s * WRIST_YAW_CORRECTION)
}

/// A mechanical motion controller. The wrist and pointer are placed where
/// they make sense for a held controller, so callers can treat it the same as
/// a tracked hand.
#[derive(Clone, Debug)]
pub struct MechanicalControllerInput {
    state: ControllerState,
    grip: Pose,
    pub touch_pad: Vec2,
    pub touch_pad_button: bool,
    pub thumb_stick: Vec2,
    pub thumb_stick_button: bool,
    pub button_a: bool,
    pub button_b: bool,
}

impl MechanicalControllerInput {
    pub fn new(handedness: Handedness) -> Self {
        Self {
            state: ControllerState::new(handedness),
            grip: Pose::IDENTITY,
            touch_pad: Vec2::ZERO,
            touch_pad_button: false,
            thumb_stick: Vec2::ZERO,
            thumb_stick_button: false,
            button_a: false,
            button_b: false,
        }
    }

    /// Grip pose as of the last refresh.
    pub fn grip(&self) -> Pose {
        self.grip
    }

    fn read_gamepad(&mut self, gp: &GamepadState) {
        self.state.set_has_haptics(gp.has_haptics);

        if gp.axes.len() > 3 {
            // Mixed Reality touchpad
            self.touch_pad = Vec2::new(gp.axes[0], gp.axes[1]);
            // Mixed Reality and Quest thumbstick
            self.thumb_stick = Vec2::new(gp.axes[2], gp.axes[3]);
        } else {
            self.touch_pad = Vec2::ZERO;
            self.thumb_stick = Vec2::ZERO;
        }

        self.touch_pad_button = gp.is_pressed(BUTTON_TOUCHPAD);
        self.thumb_stick_button = gp.is_pressed(BUTTON_THUMBSTICK);
        // Quest only
        self.button_a = gp.is_pressed(BUTTON_A);
        self.button_b = gp.is_pressed(BUTTON_B);
    }
}

impl XrController for MechanicalControllerInput {
    fn state(&self) -> &ControllerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControllerState {
        &mut self.state
    }

    fn refresh(&mut self, clock: &FrameClock, snapshot: &InputSnapshot, _head: &Head) {
        if !self.state.begin_refresh(clock.frame()) {
            return;
        }

        if let Some(grip) = snapshot.grip {
            self.grip = grip;
            let hand = self.state.handedness;
            let wrist = Pose {
                position: grip.transform_point(wrist_offset(hand)),
                rotation: grip.rotation * wrist_correction(hand),
            };
            self.state.set_wrist(wrist, &snapshot.parent);

            self.state.pointer_origin = grip.position;
            self.state.pointer_direction = grip.rotation * controller_pointer_vec3();
        }

        if let Some(gp) = &snapshot.gamepad {
            self.read_gamepad(gp);
        }
    }

    fn pointer_active(&self) -> bool {
        true
    }

    fn has_hand(&self) -> bool {
        false
    }
}
