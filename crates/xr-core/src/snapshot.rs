//! Per-frame device readings handed to the input pipeline by a front-end.

use crate::gamepad::GamepadState;
use crate::joints::HandJoints;
use crate::pose::{Handedness, Pose};

/// Everything read from one input source this frame. Missing pieces are
/// simply absent; the handlers keep their last-known values.
#[derive(Clone, Debug, Default)]
pub struct InputSnapshot {
    /// Pose of the object the input is parented to (the player rig / scene
    /// root). Local wrist poses are expressed relative to it.
    pub parent: Pose,
    pub grip: Option<Pose>,
    pub joints: HandJoints,
    pub gamepad: Option<GamepadState>,
}

/// Head pose plus both hands for one rendered frame.
#[derive(Clone, Debug, Default)]
pub struct InputFrame {
    pub head: Pose,
    pub left: InputSnapshot,
    pub right: InputSnapshot,
}

impl InputFrame {
    pub fn hand(&self, hand: Handedness) -> &InputSnapshot {
        match hand {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    pub fn hand_mut(&mut self, hand: Handedness) -> &mut InputSnapshot {
        match hand {
            Handedness::Left => &mut self.left,
            Handedness::Right => &mut self.right,
        }
    }
}
