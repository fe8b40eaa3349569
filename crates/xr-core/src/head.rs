use glam::{Quat, Vec3};

use crate::pose::{Handedness, Pose};

/// The player's head, derived from the viewer (camera) pose each frame.
///
/// Hand gestures are classified relative to these axes rather than the world
/// axes, so "forward" always means away from the player's face.
#[derive(Clone, Copy, Debug)]
pub struct Head {
    pub position: Vec3,
    pub rotation: Quat,
    pub world_up: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

impl Default for Head {
    fn default() -> Self {
        let mut head = Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            world_up: Vec3::Y,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
        };
        head.update(&Pose::IDENTITY);
        head
    }
}

impl Head {
    pub fn update(&mut self, pose: &Pose) {
        self.position = pose.position;
        self.rotation = pose.rotation;
        self.world_up = Vec3::Y;
        self.up = pose.rotation * Vec3::Y;
        self.forward = pose.rotation * Vec3::NEG_Z;
        self.right = pose.rotation * Vec3::X;
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    /// Approximate shoulder for `hand`: down along head-up to the base of the
    /// neck, then out along head-right, both by `height / divisor` where height
    /// is the distance of the head from the tracking origin.
    pub fn shoulder(&self, hand: Handedness, divisor: f32) -> Vec3 {
        let offset = self.position.length() / divisor;
        let neck = self.position - self.up.normalize_or_zero() * offset;
        neck + self.right.normalize_or_zero() * (offset * hand.sign())
    }
}
