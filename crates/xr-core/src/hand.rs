//! Pointer derivation for hand-tracked input.

use glam::Vec3;

use crate::config::TrackingParams;
use crate::controller::{ControllerState, XrController};
use crate::damper::Vec3Damper;
use crate::frame::FrameClock;
use crate::gesture::{FingerName, GestureTracker, PalmFacing};
use crate::head::Head;
use crate::joints::{HandJoint, HandJoints, JointSource};
use crate::pose::Handedness;
use crate::snapshot::InputSnapshot;

/// The player's physical hand, read from WebXR hand-joint poses.
///
/// The pointer runs from a virtual shoulder through the point midway between
/// the thumb and index tips. That makes it feel more like a mouse, and a pinch
/// doubles as the "click". Both origin and direction are damped so the pinch
/// itself does not jerk the ray.
#[derive(Clone, Debug)]
pub struct HandControllerInput {
    state: ControllerState,
    params: TrackingParams,
    gesture: GestureTracker,
    joints: HandJoints,
    origin_damper: Vec3Damper,
    direction_damper: Vec3Damper,
    shoulder: Vec3,
    pointer_active: bool,
}

impl HandControllerInput {
    pub fn new(handedness: Handedness, params: TrackingParams) -> Self {
        Self {
            state: ControllerState::new(handedness),
            gesture: GestureTracker::new(handedness),
            joints: HandJoints::new(),
            origin_damper: Vec3Damper::new(params.damper_period_sec),
            direction_damper: Vec3Damper::new(params.damper_period_sec),
            params,
            shoulder: Vec3::ZERO,
            pointer_active: false,
        }
    }

    pub fn gesture(&self) -> &GestureTracker {
        &self.gesture
    }

    /// Joint poses from the last refresh that saw a wrist.
    pub fn joints(&self) -> &HandJoints {
        &self.joints
    }

    /// Virtual shoulder used as the pointer's pivot on the last refresh.
    pub fn shoulder(&self) -> Vec3 {
        self.shoulder
    }

    pub fn params(&self) -> &TrackingParams {
        &self.params
    }

    fn raw_origin(&self) -> Vec3 {
        let index = self.gesture.finger(FingerName::Index);
        let thumb = self.gesture.finger(FingerName::Thumb);
        if index.tracked && thumb.tracked {
            (index.tip + thumb.tip) / 2.0
        } else {
            self.state.wrist_world.position
        }
    }
}

/// Feed `damper`, starting over if the clock went backwards (a new XR
/// session restarts frame time).
fn damp(damper: &mut Vec3Damper, time: f32, sample: Vec3, what: &str) -> Vec3 {
    match damper.add(time, sample) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("[hand] {} damper reset: {}", what, e);
            damper.clear();
            damper.add(time, sample).unwrap_or(sample)
        }
    }
}

impl XrController for HandControllerInput {
    fn state(&self) -> &ControllerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControllerState {
        &mut self.state
    }

    fn refresh(&mut self, clock: &FrameClock, snapshot: &InputSnapshot, head: &Head) {
        if !self.state.begin_refresh(clock.frame()) {
            return;
        }
        if let Some(gp) = &snapshot.gamepad {
            self.state.set_has_haptics(gp.has_haptics);
        }

        let Some(wrist) = snapshot.joints.joint_pose(HandJoint::Wrist) else {
            return;
        };
        self.state.set_wrist(wrist, &snapshot.parent);
        self.joints.clone_from(&snapshot.joints);

        self.gesture.update(&snapshot.joints, head);

        self.shoulder = head.shoulder(self.state.handedness, self.params.shoulder_offset_divisor);

        let time = clock.elapsed();
        let raw = self.raw_origin();
        let origin = damp(&mut self.origin_damper, time, raw, "origin");
        self.state.pointer_origin = origin;

        let aim = (origin - self.shoulder).normalize_or_zero();
        self.state.pointer_direction = damp(&mut self.direction_damper, time, aim, "direction");

        self.pointer_active = self.gesture.thumb_index_distance < self.params.pinch_distance
            && self.gesture.palm_facing == PalmFacing::Forward;
    }

    fn pointer_active(&self) -> bool {
        self.pointer_active
    }

    fn has_hand(&self) -> bool {
        true
    }
}
