//! Finger, palm and pinch classification from hand-joint poses.
//!
//! Combinations of these flags (a pinch while the palm faces forward, a
//! pointing index finger, ...) are what the rest of the app treats as gestures.

use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::constants::POINTING_DOT_THRESHOLD;
use crate::head::Head;
use crate::joints::{HandJoint, JointSource};
use crate::pose::Handedness;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FingerName {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl FingerName {
    pub const ALL: [FingerName; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }

    /// The four joints read for this finger, base to tip. The thumb has no
    /// intermediate phalanx so its chain starts at the metacarpal.
    pub fn chain(&self) -> [HandJoint; 4] {
        use HandJoint::*;
        match self {
            Self::Thumb => [ThumbMetacarpal, ThumbPhalanxProximal, ThumbPhalanxDistal, ThumbTip],
            Self::Index => [
                IndexPhalanxProximal,
                IndexPhalanxIntermediate,
                IndexPhalanxDistal,
                IndexTip,
            ],
            Self::Middle => [
                MiddlePhalanxProximal,
                MiddlePhalanxIntermediate,
                MiddlePhalanxDistal,
                MiddleTip,
            ],
            Self::Ring => [
                RingPhalanxProximal,
                RingPhalanxIntermediate,
                RingPhalanxDistal,
                RingTip,
            ],
            Self::Pinky => [
                PinkyPhalanxProximal,
                PinkyPhalanxIntermediate,
                PinkyPhalanxDistal,
                PinkyTip,
            ],
        }
    }

    #[inline]
    fn slot(&self) -> usize {
        *self as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Finger {
    /// Base and tip segments point the same way (the finger is straight).
    pub pointing: bool,
    pub base: Vec3,
    pub direction: Vec3,
    pub tip: Vec3,
    /// Set once a full joint chain has been read for this finger.
    pub tracked: bool,
}

/// Direction the palm faces, relative to the player's head.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PalmFacing {
    Forward,
    Backward,
    Up,
    Down,
    Inside,
    Outside,
}

impl PalmFacing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Up => "up",
            Self::Down => "down",
            Self::Inside => "inside",
            Self::Outside => "outside",
        }
    }

    /// Wrist marker colour used by the debug view.
    pub fn debug_color(&self) -> [f32; 4] {
        match self {
            Self::Up => [0.0, 0.0, 1.0, 1.0],
            Self::Inside => [0.0, 0.5, 0.0, 1.0],
            Self::Outside => [0.0, 0.0, 0.0, 1.0],
            Self::Down => [1.0, 0.0, 0.0, 1.0],
            Self::Forward => [1.0, 1.0, 0.0, 1.0],
            Self::Backward => [1.0, 0.0, 1.0, 1.0],
        }
    }
}

#[inline]
pub fn is_pointing(base_dot_tip: f32) -> bool {
    base_dot_tip > POINTING_DOT_THRESHOLD
}

/// Build a finger from its four joint positions, base to tip.
pub fn finger_from_points(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Finger {
    let base_vec = (p1 - p0).normalize_or_zero();
    let tip_vec = (p3 - p2).normalize_or_zero();
    Finger {
        pointing: is_pointing(base_vec.dot(tip_vec)),
        base: p0,
        direction: (p3 - p0).normalize_or_zero(),
        tip: p3,
        tracked: true,
    }
}

/// `acos` that tolerates dot products drifting just outside [-1, 1].
#[inline]
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Bucket the palm normal from its angles (radians) to the head axes.
///
/// Forward/backward wins over up/down, which wins over inside/outside. Which
/// side is "inside" depends on the hand.
pub fn classify_palm_facing(
    forward_rad: f32,
    up_rad: f32,
    right_rad: f32,
    hand: Handedness,
) -> PalmFacing {
    if forward_rad < FRAC_PI_4 {
        PalmFacing::Forward
    } else if forward_rad > FRAC_PI_4 * 3.0 {
        PalmFacing::Backward
    } else if up_rad > FRAC_PI_4 * 3.0 {
        PalmFacing::Down
    } else if up_rad < FRAC_PI_4 {
        PalmFacing::Up
    } else {
        let toward_right = right_rad < FRAC_PI_2;
        match (hand, toward_right) {
            (Handedness::Right, true) | (Handedness::Left, false) => PalmFacing::Outside,
            (Handedness::Right, false) | (Handedness::Left, true) => PalmFacing::Inside,
        }
    }
}

/// Classify a palm normal against the head's axes.
pub fn palm_facing_for(palm: Vec3, head: &Head, hand: Handedness) -> PalmFacing {
    classify_palm_facing(
        angle_between(head.forward, palm),
        angle_between(head.up, palm),
        angle_between(head.right, palm),
        hand,
    )
}

/// Tracks finger pointing, thumb/index spread, palm facing and pinch distance
/// for one hand.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    handedness: Handedness,
    fingers: [Finger; 5],
    /// Spread between thumb and index, 0 (together) to π (opposite).
    pub thumb_index_angle: f32,
    pub palm_facing: PalmFacing,
    /// Thumb tip to index tip, the pinch metric.
    pub thumb_index_distance: f32,
}

impl GestureTracker {
    pub fn new(handedness: Handedness) -> Self {
        Self {
            handedness,
            fingers: [Finger::default(); 5],
            thumb_index_angle: 0.0,
            palm_facing: PalmFacing::Up,
            thumb_index_distance: 0.0,
        }
    }

    #[inline]
    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    #[inline]
    pub fn finger(&self, name: FingerName) -> &Finger {
        &self.fingers[name.slot()]
    }

    pub fn update(&mut self, joints: &impl JointSource, head: &Head) {
        for name in FingerName::ALL {
            self.update_finger(name, joints);
        }

        let thumb = self.fingers[FingerName::Thumb.slot()];
        let index = self.fingers[FingerName::Index.slot()];

        let thumb_to_index = (index.base - thumb.base).normalize_or_zero();
        self.thumb_index_angle = angle_between(thumb.direction, thumb_to_index);

        if let Some(wrist) = joints.joint_pose(HandJoint::Wrist) {
            // ray out from the palm in wrist space
            let palm = wrist.rotation * Vec3::NEG_Y;
            self.palm_facing = palm_facing_for(palm, head, self.handedness);
        }

        self.thumb_index_distance = thumb.tip.distance(index.tip);
    }

    fn update_finger(&mut self, name: FingerName, joints: &impl JointSource) {
        let [j0, j1, j2, j3] = name.chain();
        let points = (
            joints.joint_pose(j0),
            joints.joint_pose(j1),
            joints.joint_pose(j2),
            joints.joint_pose(j3),
        );
        // incomplete chains keep last frame's finger
        if let (Some(p0), Some(p1), Some(p2), Some(p3)) = points {
            self.fingers[name.slot()] =
                finger_from_points(p0.position, p1.position, p2.position, p3.position);
        }
    }
}
