//! Synthetic head, hand and controller poses.
//!
//! Drives the native simulator and the tests with plausible WebXR-shaped
//! input: hand joints laid out in wrist space (-Z toward the fingertips, -Y
//! out of the palm), optional seeded tracking jitter, and a scripted session
//! that aims, pinches and waves a controller.

use glam::{Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::gamepad::{GamepadButton, GamepadState};
use crate::gesture::FingerName;
use crate::joints::{HandJoint, HandJoints};
use crate::pose::{Handedness, Pose};
use crate::snapshot::{InputFrame, InputSnapshot};

// Right-hand wrist-space layout; the left hand mirrors X.
const KNUCKLES: [[f32; 3]; 5] = [
    [-0.020, -0.010, -0.020], // thumb metacarpal
    [-0.025, 0.0, -0.090],
    [-0.005, 0.0, -0.095],
    [0.013, 0.0, -0.090],
    [0.030, 0.0, -0.080],
];
const METACARPAL_Z: f32 = -0.025;
const SEGMENTS: [[f32; 3]; 5] = [
    [0.035, 0.030, 0.025], // thumb
    [0.040, 0.025, 0.020],
    [0.045, 0.028, 0.022],
    [0.042, 0.026, 0.020],
    [0.032, 0.020, 0.018],
];
const THUMB_DIR: [f32; 3] = [-0.6, -0.2, -0.77];
const MAX_BEND_PER_JOINT: f32 = FRAC_PI_2 * 0.8;

/// Finger curl (0 straight, 1 fist) per finger plus a thumb/index pinch (0 open, 1 touching).
#[derive(Clone, Copy, Debug)]
pub struct HandShape {
    pub wrist: Pose,
    pub curl: [f32; 5],
    pub pinch: f32,
}

impl HandShape {
    pub fn open(wrist: Pose) -> Self {
        Self {
            wrist,
            curl: [0.0; 5],
            pinch: 0.0,
        }
    }

    pub fn fist(wrist: Pose) -> Self {
        Self {
            wrist,
            curl: [1.0; 5],
            pinch: 0.0,
        }
    }

    pub fn pinching(wrist: Pose) -> Self {
        Self {
            wrist,
            curl: [0.0, 0.2, 0.6, 0.7, 0.8],
            pinch: 1.0,
        }
    }
}

/// Wrist rotation that points the palm along world -Z (away from a head
/// looking down -Z) with the fingers up.
pub fn palm_forward() -> Quat {
    Quat::from_rotation_x(FRAC_PI_2)
}

/// Wrist rotation with the palm facing the floor and fingers along -Z.
pub fn palm_down() -> Quat {
    Quat::IDENTITY
}

/// Head at `height` above the origin, turned `yaw` radians about +Y.
pub fn head_pose(height: f32, yaw: f32) -> Pose {
    Pose::new(Vec3::new(0.0, height, 0.0), Quat::from_rotation_y(yaw))
}

/// Gamepad with `axes` and the given button slots pressed.
pub fn gamepad(axes: &[f32], button_count: usize, pressed: &[usize]) -> GamepadState {
    GamepadState {
        axes: axes.iter().copied().collect(),
        buttons: (0..button_count)
            .map(|i| GamepadButton::pressed(pressed.contains(&i)))
            .collect(),
        has_haptics: true,
    }
}

/// Lays out hand joints for a [`HandShape`].
pub struct HandRig {
    handedness: Handedness,
    rng: StdRng,
    jitter: f32,
}

impl HandRig {
    pub fn new(handedness: Handedness) -> Self {
        Self::with_jitter(handedness, 0.0, 0)
    }

    /// Add up to `jitter` metres of uniform noise per axis to every joint.
    pub fn with_jitter(handedness: Handedness, jitter: f32, seed: u64) -> Self {
        Self {
            handedness,
            rng: StdRng::seed_from_u64(seed),
            jitter,
        }
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn joints(&mut self, shape: &HandShape) -> HandJoints {
        let mut local = [Vec3::ZERO; 25];
        local[HandJoint::Wrist.index()] = Vec3::ZERO;

        for finger in FingerName::ALL {
            let chain = self.finger_chain(finger, shape.curl[finger as usize]);
            let joints = full_chain(finger);
            for (j, p) in joints.iter().zip(chain.iter()) {
                local[j.index()] = *p;
            }
        }

        if shape.pinch > 0.0 {
            apply_pinch(&mut local, shape.pinch.clamp(0.0, 1.0));
        }

        let mut out = HandJoints::new();
        for joint in HandJoint::ALL {
            let mut world = shape.wrist.transform_point(local[joint.index()]);
            if self.jitter > 0.0 {
                world += Vec3::new(
                    self.rng.gen_range(-self.jitter..=self.jitter),
                    self.rng.gen_range(-self.jitter..=self.jitter),
                    self.rng.gen_range(-self.jitter..=self.jitter),
                );
            }
            out.set(joint, Pose::new(world, shape.wrist.rotation));
        }
        out
    }

    /// Metacarpal, proximal, intermediate, distal, tip for one finger (the
    /// thumb has no intermediate; its distal is repeated in that slot).
    fn finger_chain(&self, finger: FingerName, curl: f32) -> [Vec3; 5] {
        let mirror = Vec3::new(self.handedness.sign(), 1.0, 1.0);
        let seg = SEGMENTS[finger as usize];
        let bend = curl.clamp(0.0, 1.0) * MAX_BEND_PER_JOINT;

        if finger == FingerName::Thumb {
            let meta = Vec3::from(KNUCKLES[0]);
            let dir = Vec3::from(THUMB_DIR).normalize();
            // thumb folds across the palm (+X for a right hand)
            let across = |k: f32| Quat::from_rotation_y(-bend * k) * dir;
            let prox = meta + dir * seg[0];
            let dist = prox + across(1.0) * seg[1];
            let tip = dist + across(2.0) * seg[2];
            return [meta, prox, dist, dist, tip].map(|p| p * mirror);
        }

        let knuckle = Vec3::from(KNUCKLES[finger as usize]);
        let meta = Vec3::new(knuckle.x * 0.6, knuckle.y, METACARPAL_Z);
        let along = |k: f32| Vec3::new(0.0, -(bend * k).sin(), -(bend * k).cos());
        let inter = knuckle + along(1.0) * seg[0];
        let dist = inter + along(2.0) * seg[1];
        let tip = dist + along(3.0) * seg[2];
        [meta, knuckle, inter, dist, tip].map(|p| p * mirror)
    }
}

fn full_chain(finger: FingerName) -> [HandJoint; 5] {
    use HandJoint::*;
    match finger {
        FingerName::Thumb => [
            ThumbMetacarpal,
            ThumbPhalanxProximal,
            ThumbPhalanxDistal,
            ThumbPhalanxDistal,
            ThumbTip,
        ],
        FingerName::Index => [
            IndexMetacarpal,
            IndexPhalanxProximal,
            IndexPhalanxIntermediate,
            IndexPhalanxDistal,
            IndexTip,
        ],
        FingerName::Middle => [
            MiddleMetacarpal,
            MiddlePhalanxProximal,
            MiddlePhalanxIntermediate,
            MiddlePhalanxDistal,
            MiddleTip,
        ],
        FingerName::Ring => [
            RingMetacarpal,
            RingPhalanxProximal,
            RingPhalanxIntermediate,
            RingPhalanxDistal,
            RingTip,
        ],
        FingerName::Pinky => [
            PinkyMetacarpal,
            PinkyPhalanxProximal,
            PinkyPhalanxIntermediate,
            PinkyPhalanxDistal,
            PinkyTip,
        ],
    }
}

/// Pull thumb and index tips (and, half as far, their distal joints) toward
/// the point between the tips.
fn apply_pinch(local: &mut [Vec3; 25], pinch: f32) {
    let thumb_tip = HandJoint::ThumbTip.index();
    let index_tip = HandJoint::IndexTip.index();
    let mid = (local[thumb_tip] + local[index_tip]) / 2.0;
    for (tip, distal) in [
        (thumb_tip, HandJoint::ThumbPhalanxDistal.index()),
        (index_tip, HandJoint::IndexPhalanxDistal.index()),
    ] {
        let shift = (mid - local[tip]) * pinch;
        local[tip] += shift;
        local[distal] += shift * 0.5;
    }
}

/// Scripted two-handed session: a tracked right hand sweeping and pinching
/// with its palm forward, and a mechanical left controller waving about.
pub struct Scenario {
    pub head_height: f32,
    right_rig: HandRig,
}

impl Scenario {
    pub fn new(seed: u64) -> Self {
        Self {
            head_height: 1.6,
            right_rig: HandRig::with_jitter(Handedness::Right, 0.002, seed),
        }
    }

    /// Pinch amount at `t`: closed for roughly a third of each 4 s cycle.
    pub fn pinch_at(t: f32) -> f32 {
        let phase = (t / 4.0).fract();
        if (0.5..0.85).contains(&phase) {
            1.0
        } else {
            0.0
        }
    }

    pub fn head_at(&self, t: f32) -> Pose {
        head_pose(self.head_height, 0.15 * (t * 0.3 * TAU / 4.0).sin())
    }

    pub fn right_wrist_at(&self, t: f32) -> Pose {
        let sweep = (t * 0.5).sin() * 0.25;
        Pose::new(
            Vec3::new(0.25 + sweep, self.head_height - 0.25, -0.45),
            palm_forward(),
        )
    }

    pub fn right_hand_at(&mut self, t: f32) -> HandJoints {
        let shape = HandShape {
            wrist: self.right_wrist_at(t),
            curl: [0.0, 0.1, 0.5, 0.6, 0.7],
            pinch: Self::pinch_at(t),
        };
        self.right_rig.joints(&shape)
    }

    pub fn left_grip_at(&self, t: f32) -> Pose {
        let wave = (t * 1.3).sin();
        Pose::new(
            Vec3::new(-0.3, self.head_height - 0.45 + 0.05 * wave, -0.35),
            Quat::from_rotation_x(0.4 * wave) * Quat::from_rotation_y(0.3),
        )
    }

    pub fn left_gamepad_at(&self, t: f32) -> GamepadState {
        let axes = [0.0, 0.0, (t * 0.7).cos(), (t * 0.7).sin()];
        gamepad(&axes, 6, &[])
    }

    /// Full frame with the right hand tracked and the left as a controller.
    /// The right grip follows the wrist so the right input can also be
    /// connected as a controller.
    pub fn frame_at(&mut self, t: f32) -> InputFrame {
        InputFrame {
            head: self.head_at(t),
            left: InputSnapshot {
                grip: Some(self.left_grip_at(t)),
                gamepad: Some(self.left_gamepad_at(t)),
                ..Default::default()
            },
            right: InputSnapshot {
                grip: Some(self.right_wrist_at(t)),
                joints: self.right_hand_at(t),
                gamepad: Some(gamepad(&[], 2, &[])),
                ..Default::default()
            },
        }
    }
}
