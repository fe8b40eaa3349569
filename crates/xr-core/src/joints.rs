//! WebXR hand joints and the per-frame joint snapshot.
//!
//! Joint names and order follow the WebXR Hand Input module
//! (<https://www.w3.org/TR/webxr-hand-input-1/>).

use crate::pose::Pose;

/// The 25 joints WebXR reports per hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandJoint {
    Wrist,
    ThumbMetacarpal,
    ThumbPhalanxProximal,
    ThumbPhalanxDistal,
    ThumbTip,
    IndexMetacarpal,
    IndexPhalanxProximal,
    IndexPhalanxIntermediate,
    IndexPhalanxDistal,
    IndexTip,
    MiddleMetacarpal,
    MiddlePhalanxProximal,
    MiddlePhalanxIntermediate,
    MiddlePhalanxDistal,
    MiddleTip,
    RingMetacarpal,
    RingPhalanxProximal,
    RingPhalanxIntermediate,
    RingPhalanxDistal,
    RingTip,
    PinkyMetacarpal,
    PinkyPhalanxProximal,
    PinkyPhalanxIntermediate,
    PinkyPhalanxDistal,
    PinkyTip,
}

pub const JOINT_COUNT: usize = 25;

impl HandJoint {
    pub const ALL: [HandJoint; JOINT_COUNT] = [
        Self::Wrist,
        Self::ThumbMetacarpal,
        Self::ThumbPhalanxProximal,
        Self::ThumbPhalanxDistal,
        Self::ThumbTip,
        Self::IndexMetacarpal,
        Self::IndexPhalanxProximal,
        Self::IndexPhalanxIntermediate,
        Self::IndexPhalanxDistal,
        Self::IndexTip,
        Self::MiddleMetacarpal,
        Self::MiddlePhalanxProximal,
        Self::MiddlePhalanxIntermediate,
        Self::MiddlePhalanxDistal,
        Self::MiddleTip,
        Self::RingMetacarpal,
        Self::RingPhalanxProximal,
        Self::RingPhalanxIntermediate,
        Self::RingPhalanxDistal,
        Self::RingTip,
        Self::PinkyMetacarpal,
        Self::PinkyPhalanxProximal,
        Self::PinkyPhalanxIntermediate,
        Self::PinkyPhalanxDistal,
        Self::PinkyTip,
    ];

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The WebXR `XRHandJoint` enum string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbMetacarpal => "thumb-metacarpal",
            Self::ThumbPhalanxProximal => "thumb-phalanx-proximal",
            Self::ThumbPhalanxDistal => "thumb-phalanx-distal",
            Self::ThumbTip => "thumb-tip",
            Self::IndexMetacarpal => "index-finger-metacarpal",
            Self::IndexPhalanxProximal => "index-finger-phalanx-proximal",
            Self::IndexPhalanxIntermediate => "index-finger-phalanx-intermediate",
            Self::IndexPhalanxDistal => "index-finger-phalanx-distal",
            Self::IndexTip => "index-finger-tip",
            Self::MiddleMetacarpal => "middle-finger-metacarpal",
            Self::MiddlePhalanxProximal => "middle-finger-phalanx-proximal",
            Self::MiddlePhalanxIntermediate => "middle-finger-phalanx-intermediate",
            Self::MiddlePhalanxDistal => "middle-finger-phalanx-distal",
            Self::MiddleTip => "middle-finger-tip",
            Self::RingMetacarpal => "ring-finger-metacarpal",
            Self::RingPhalanxProximal => "ring-finger-phalanx-proximal",
            Self::RingPhalanxIntermediate => "ring-finger-phalanx-intermediate",
            Self::RingPhalanxDistal => "ring-finger-phalanx-distal",
            Self::RingTip => "ring-finger-tip",
            Self::PinkyMetacarpal => "pinky-finger-metacarpal",
            Self::PinkyPhalanxProximal => "pinky-finger-phalanx-proximal",
            Self::PinkyPhalanxIntermediate => "pinky-finger-phalanx-intermediate",
            Self::PinkyPhalanxDistal => "pinky-finger-phalanx-distal",
            Self::PinkyTip => "pinky-finger-tip",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|j| j.as_str() == s)
    }
}

/// Anything that can report a joint's world pose. `None` means "not tracked
/// this frame", which callers treat as a normal outcome.
pub trait JointSource {
    fn joint_pose(&self, joint: HandJoint) -> Option<Pose>;
}

/// One frame's worth of joint poses, indexed by [`HandJoint`].
#[derive(Clone, Debug, Default)]
pub struct HandJoints {
    poses: [Option<Pose>; JOINT_COUNT],
}

impl HandJoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, joint: HandJoint, pose: Pose) {
        self.poses[joint.index()] = Some(pose);
    }

    pub fn clear(&mut self) {
        self.poses = [None; JOINT_COUNT];
    }

    pub fn tracked_count(&self) -> usize {
        self.poses.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked_count() == 0
    }

    /// Tracked joints with their poses, in WebXR order.
    pub fn iter(&self) -> impl Iterator<Item = (HandJoint, Pose)> + '_ {
        HandJoint::ALL
            .iter()
            .zip(self.poses.iter())
            .filter_map(|(j, p)| p.map(|p| (*j, p)))
    }
}

impl JointSource for HandJoints {
    #[inline]
    fn joint_pose(&self, joint: HandJoint) -> Option<Pose> {
        self.poses[joint.index()]
    }
}
