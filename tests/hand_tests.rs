// Host-side tests for the hand-tracked pointer.

use glam::Vec3;
use xr_core::sim::{gamepad, palm_down, palm_forward, HandRig, HandShape};
use xr_core::{
    FingerName, FrameClock, HandControllerInput, HandJoints, Handedness, Head, InputSnapshot,
    PalmFacing, Pose, TrackingParams, XrController,
};

const HEAD_HEIGHT: f32 = 1.6;

fn head() -> Head {
    let mut head = Head::default();
    head.update(&Pose::from_position(Vec3::new(0.0, HEAD_HEIGHT, 0.0)));
    head
}

fn wrist_at(x: f32) -> Pose {
    Pose::new(Vec3::new(x, 1.35, -0.45), palm_forward())
}

fn snapshot(joints: HandJoints) -> InputSnapshot {
    InputSnapshot {
        joints,
        ..Default::default()
    }
}

fn pinch_snapshot(x: f32) -> InputSnapshot {
    let mut rig = HandRig::new(Handedness::Right);
    snapshot(rig.joints(&HandShape::pinching(wrist_at(x))))
}

fn new_hand() -> HandControllerInput {
    HandControllerInput::new(Handedness::Right, TrackingParams::default())
}

#[test]
fn pinch_with_palm_forward_activates_pointer() {
    let mut hand = new_hand();
    let mut clock = FrameClock::new();
    clock.tick(0.0);
    hand.refresh(&clock, &pinch_snapshot(0.25), &head());

    assert!(hand.has_hand());
    assert_eq!(hand.gesture().palm_facing, PalmFacing::Forward);
    assert!(hand.pointer_active());
    assert_eq!(hand.state().last_frame(), Some(1));
}

#[test]
fn open_hand_or_palm_down_keeps_pointer_inactive() {
    let mut rig = HandRig::new(Handedness::Right);
    let mut clock = FrameClock::new();

    let mut hand = new_hand();
    clock.tick(0.0);
    let open = snapshot(rig.joints(&HandShape::open(wrist_at(0.25))));
    hand.refresh(&clock, &open, &head());
    assert!(!hand.pointer_active());

    let mut hand = new_hand();
    clock.tick(0.1);
    let down = Pose::new(Vec3::new(0.25, 1.35, -0.45), palm_down());
    let pinch_down = snapshot(rig.joints(&HandShape::pinching(down)));
    hand.refresh(&clock, &pinch_down, &head());
    assert!(hand.gesture().thumb_index_distance < 0.05);
    assert!(!hand.pointer_active());
}

#[test]
fn pointer_runs_from_shoulder_through_pinch_point() {
    let mut hand = new_hand();
    let mut clock = FrameClock::new();
    clock.tick(0.0);
    let head = head();
    hand.refresh(&clock, &pinch_snapshot(0.25), &head);

    let g = hand.gesture();
    let pinch_point = (g.finger(FingerName::Thumb).tip + g.finger(FingerName::Index).tip) / 2.0;
    assert!((hand.pointer_origin() - pinch_point).length() < 1e-5);

    // shoulder = head lowered and shifted right by height / 8
    let offset = HEAD_HEIGHT / 8.0;
    let shoulder = Vec3::new(offset, HEAD_HEIGHT - offset, 0.0);
    assert!((hand.shoulder() - shoulder).length() < 1e-5);
    let expected = (pinch_point - shoulder).normalize();
    assert!((hand.pointer_direction() - expected).length() < 1e-4);
}

#[test]
fn left_shoulder_is_on_the_left() {
    let head = head();
    let left = head.shoulder(Handedness::Left, 8.0);
    let right = head.shoulder(Handedness::Right, 8.0);
    assert!(left.x < 0.0 && right.x > 0.0);
    assert!((left.y - right.y).abs() < 1e-6);
}

#[test]
fn origin_is_damped_over_the_window() {
    let mut hand = new_hand();
    let mut clock = FrameClock::new();
    let head = head();

    clock.tick(0.0);
    hand.refresh(&clock, &pinch_snapshot(0.25), &head);
    let first = hand.pointer_origin();

    clock.tick(0.05);
    hand.refresh(&clock, &pinch_snapshot(0.35), &head);
    let second = hand.pointer_origin();
    // raw origin moved 0.1 in x; the damped one only half as far
    assert!((second - (first + Vec3::new(0.05, 0.0, 0.0))).length() < 1e-4);
}

#[test]
fn refresh_is_idempotent_within_a_frame() {
    let mut hand = new_hand();
    let mut clock = FrameClock::new();
    let head = head();
    clock.tick(0.0);
    hand.refresh(&clock, &pinch_snapshot(0.25), &head);
    let origin = hand.pointer_origin();
    let wrist = hand.wrist_world();

    hand.refresh(&clock, &pinch_snapshot(0.6), &head);
    assert_eq!(hand.pointer_origin(), origin);
    assert_eq!(hand.wrist_world(), wrist);
}

#[test]
fn missing_wrist_keeps_last_values() {
    let mut hand = new_hand();
    let mut clock = FrameClock::new();
    let head = head();
    clock.tick(0.0);
    hand.refresh(&clock, &pinch_snapshot(0.25), &head);
    let origin = hand.pointer_origin();
    let direction = hand.pointer_direction();

    clock.tick(0.016);
    hand.refresh(&clock, &snapshot(HandJoints::new()), &head);
    assert_eq!(hand.pointer_origin(), origin);
    assert_eq!(hand.pointer_direction(), direction);
    assert!(hand.pointer_active());
    assert_eq!(hand.joints().tracked_count(), 25);
}

#[test]
fn clock_going_backwards_restarts_damping() {
    let mut hand = new_hand();
    let mut clock = FrameClock::new();
    let head = head();
    clock.tick(1.0);
    hand.refresh(&clock, &pinch_snapshot(0.25), &head);

    // a new session restarts frame time
    clock.tick(0.5);
    hand.refresh(&clock, &pinch_snapshot(0.45), &head);
    let g = hand.gesture();
    let raw = (g.finger(FingerName::Thumb).tip + g.finger(FingerName::Index).tip) / 2.0;
    assert!((hand.pointer_origin() - raw).length() < 1e-5);
}

#[test]
fn wrist_local_is_relative_to_parent() {
    let mut hand = new_hand();
    let mut clock = FrameClock::new();
    clock.tick(0.0);
    let mut snap = pinch_snapshot(0.25);
    snap.parent = Pose::from_position(Vec3::new(0.0, 0.0, -1.0));
    hand.refresh(&clock, &snap, &head());

    let world = hand.wrist_world();
    let local = hand.wrist_local();
    assert!((world.position - wrist_at(0.25).position).length() < 1e-6);
    assert!((local.position - (world.position - Vec3::new(0.0, 0.0, -1.0))).length() < 1e-6);
}

#[test]
fn vibrate_needs_a_haptic_gamepad() {
    let mut clock = FrameClock::new();
    let head = head();

    let mut bare = new_hand();
    clock.tick(0.0);
    bare.refresh(&clock, &pinch_snapshot(0.25), &head);
    bare.vibrate(None, None);
    assert!(bare.take_haptics().is_empty());

    let mut with_pad = new_hand();
    let mut snap = pinch_snapshot(0.25);
    snap.gamepad = Some(gamepad(&[], 2, &[]));
    clock.tick(0.1);
    with_pad.refresh(&clock, &snap, &head);
    with_pad.vibrate(None, Some(40.0));
    let pulses = with_pad.take_haptics();
    assert_eq!(pulses.len(), 1);
    assert_eq!(pulses[0].intensity, 1.0);
    assert_eq!(pulses[0].duration_ms, 40.0);
    assert!(with_pad.take_haptics().is_empty());
}
