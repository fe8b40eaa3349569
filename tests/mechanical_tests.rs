// Host-side tests for the grip-controller pointer and gamepad mapping.

use glam::{Quat, Vec2, Vec3};
use std::f32::consts::FRAC_1_SQRT_2;
use xr_core::sim::gamepad;
use xr_core::{
    wrist_correction, wrist_offset, FrameClock, Handedness, Head, InputSnapshot,
    MechanicalControllerInput, Pose, XrController,
};

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

fn grip_snapshot(grip: Pose) -> InputSnapshot {
    InputSnapshot {
        grip: Some(grip),
        ..Default::default()
    }
}

fn refreshed(hand: Handedness, snapshot: &InputSnapshot) -> MechanicalControllerInput {
    let mut c = MechanicalControllerInput::new(hand);
    let mut clock = FrameClock::new();
    clock.tick(0.0);
    c.refresh(&clock, snapshot, &Head::default());
    c
}

#[test]
fn pointer_points_down_and_forward_from_grip() {
    let grip = Pose::from_position(Vec3::new(0.2, 1.2, -0.3));
    let c = refreshed(Handedness::Right, &grip_snapshot(grip));
    assert_eq!(c.pointer_origin(), grip.position);
    assert!(approx(
        c.pointer_direction(),
        Vec3::new(0.0, -FRAC_1_SQRT_2, -FRAC_1_SQRT_2)
    ));
}

#[test]
fn pointer_follows_grip_rotation() {
    let grip = Pose::new(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
    let c = refreshed(Handedness::Left, &grip_snapshot(grip));
    // turned left: forward is now -X
    assert!(approx(
        c.pointer_direction(),
        Vec3::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0)
    ));
}

#[test]
fn wrist_sits_behind_grip_on_the_outside() {
    let grip = Pose::from_position(Vec3::new(1.0, 2.0, 3.0));
    let right = refreshed(Handedness::Right, &grip_snapshot(grip));
    let left = refreshed(Handedness::Left, &grip_snapshot(grip));
    assert!(approx(right.wrist_world().position, Vec3::new(1.02, 2.0, 3.09)));
    assert!(approx(left.wrist_world().position, Vec3::new(0.98, 2.0, 3.09)));
    assert_eq!(wrist_offset(Handedness::Left).x, -wrist_offset(Handedness::Right).x);
}

#[test]
fn correction_turns_controller_into_a_hand() {
    let fingers = Vec3::new(0.0, -0.5556, -0.8315);
    for hand in [Handedness::Left, Handedness::Right] {
        let q = wrist_correction(hand);
        assert!(approx(q * Vec3::NEG_Z, fingers), "{:?}", hand);
    }
    // palms face inward, toward the other hand
    assert!(approx(wrist_correction(Handedness::Right) * Vec3::NEG_Y, Vec3::NEG_X));
    assert!(approx(wrist_correction(Handedness::Left) * Vec3::NEG_Y, Vec3::X));
}

#[test]
fn gamepad_axes_and_buttons() {
    let snapshot = InputSnapshot {
        grip: Some(Pose::IDENTITY),
        gamepad: Some(gamepad(&[0.1, 0.2, -0.5, 0.75], 6, &[3, 4])),
        ..Default::default()
    };
    let c = refreshed(Handedness::Right, &snapshot);
    assert_eq!(c.touch_pad, Vec2::new(0.1, 0.2));
    assert_eq!(c.thumb_stick, Vec2::new(-0.5, 0.75));
    assert!(!c.touch_pad_button);
    assert!(c.thumb_stick_button);
    assert!(c.button_a);
    assert!(!c.button_b);
}

#[test]
fn short_gamepads_leave_missing_inputs_at_rest() {
    let mut c = MechanicalControllerInput::new(Handedness::Left);
    let mut clock = FrameClock::new();
    let head = Head::default();

    let full = InputSnapshot {
        gamepad: Some(gamepad(&[0.1, 0.2, -0.5, 0.75], 6, &[2, 3, 4, 5])),
        ..Default::default()
    };
    clock.tick(0.0);
    c.refresh(&clock, &full, &head);
    assert_eq!(c.thumb_stick, Vec2::new(-0.5, 0.75));
    assert!(c.button_b);

    let short = InputSnapshot {
        gamepad: Some(gamepad(&[0.3, 0.4], 2, &[0, 1])),
        ..Default::default()
    };
    clock.tick(0.016);
    c.refresh(&clock, &short, &head);
    assert_eq!(c.touch_pad, Vec2::ZERO);
    assert_eq!(c.thumb_stick, Vec2::ZERO);
    assert!(!c.touch_pad_button && !c.thumb_stick_button);
    assert!(!c.button_a && !c.button_b);
}

#[test]
fn always_active_and_never_a_hand() {
    let c = MechanicalControllerInput::new(Handedness::Right);
    assert!(c.pointer_active());
    assert!(!c.has_hand());
    assert_eq!(c.handedness(), Handedness::Right);
}

#[test]
fn missing_grip_keeps_last_pose() {
    let mut c = MechanicalControllerInput::new(Handedness::Right);
    let mut clock = FrameClock::new();
    let head = Head::default();
    let grip = Pose::from_position(Vec3::new(0.0, 1.0, -0.5));

    clock.tick(0.0);
    c.refresh(&clock, &grip_snapshot(grip), &head);
    clock.tick(0.016);
    c.refresh(&clock, &InputSnapshot::default(), &head);

    assert_eq!(c.grip().position, grip.position);
    assert_eq!(c.pointer_origin(), grip.position);
}

#[test]
fn refresh_is_memoized_per_frame() {
    let mut c = MechanicalControllerInput::new(Handedness::Right);
    let mut clock = FrameClock::new();
    let head = Head::default();
    clock.tick(0.0);
    c.refresh(&clock, &grip_snapshot(Pose::IDENTITY), &head);
    c.refresh(&clock, &grip_snapshot(Pose::from_position(Vec3::ONE)), &head);
    assert_eq!(c.pointer_origin(), Vec3::ZERO);

    clock.tick(0.016);
    c.refresh(&clock, &grip_snapshot(Pose::from_position(Vec3::ONE)), &head);
    assert_eq!(c.pointer_origin(), Vec3::ONE);
}

#[test]
fn haptics_follow_the_gamepad() {
    let snapshot = InputSnapshot {
        gamepad: Some(gamepad(&[], 2, &[])),
        ..Default::default()
    };
    let mut c = refreshed(Handedness::Left, &snapshot);
    c.vibrate(Some(0.25), None);
    let pulses = c.take_haptics();
    assert_eq!(pulses.len(), 1);
    assert_eq!(pulses[0].intensity, 0.25);
    assert_eq!(pulses[0].duration_ms, 100.0);
}
