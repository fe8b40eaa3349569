// Host-side tests for finger, palm and pinch classification.

use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};
use xr_core::sim::{palm_down, palm_forward, HandRig, HandShape};
use xr_core::{
    classify_palm_facing, finger_from_points, is_pointing, palm_facing_for, FingerName,
    GestureTracker, HandJoints, Handedness, Head, PalmFacing, Pose,
};

fn wrist(rotation: Quat) -> Pose {
    Pose::new(Vec3::new(0.2, 1.3, -0.4), rotation)
}

fn track(hand: Handedness, shape: &HandShape) -> GestureTracker {
    let mut rig = HandRig::new(hand);
    let mut g = GestureTracker::new(hand);
    g.update(&rig.joints(shape), &Head::default());
    g
}

#[test]
fn pointing_threshold_is_strict() {
    assert!(!is_pointing(0.85));
    assert!(is_pointing(0.851));
    assert!(!is_pointing(-1.0));
}

#[test]
fn straight_finger_points() {
    let f = finger_from_points(
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, -0.04),
        Vec3::new(0.0, 0.0, -0.07),
        Vec3::new(0.0, 0.0, -0.09),
    );
    assert!(f.pointing);
    assert!(f.tracked);
    assert!((f.direction - Vec3::NEG_Z).length() < 1e-6);
    assert_eq!(f.tip, Vec3::new(0.0, 0.0, -0.09));
    assert_eq!(f.base, Vec3::ZERO);
}

#[test]
fn bent_finger_does_not_point() {
    let f = finger_from_points(
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 0.0, -2.0),
        Vec3::new(0.0, -1.0, -2.0),
    );
    assert!(!f.pointing);
}

#[test]
fn degenerate_finger_does_not_point() {
    let p = Vec3::new(1.0, 1.0, 1.0);
    let f = finger_from_points(p, p, p, p);
    assert!(!f.pointing);
    assert_eq!(f.direction, Vec3::ZERO);
}

#[test]
fn palm_classification_precedence() {
    let mid = FRAC_PI_2;
    assert_eq!(classify_palm_facing(0.1, 3.0, mid, Handedness::Right), PalmFacing::Forward);
    assert_eq!(classify_palm_facing(3.0, 0.1, mid, Handedness::Right), PalmFacing::Backward);
    assert_eq!(classify_palm_facing(mid, 3.0, mid, Handedness::Right), PalmFacing::Down);
    assert_eq!(classify_palm_facing(mid, 0.2, mid, Handedness::Right), PalmFacing::Up);
}

#[test]
fn inside_outside_depends_on_hand() {
    let mid = FRAC_PI_2;
    assert_eq!(classify_palm_facing(mid, mid, 0.1, Handedness::Right), PalmFacing::Outside);
    assert_eq!(classify_palm_facing(mid, mid, 3.0, Handedness::Right), PalmFacing::Inside);
    assert_eq!(classify_palm_facing(mid, mid, 0.1, Handedness::Left), PalmFacing::Inside);
    assert_eq!(classify_palm_facing(mid, mid, 3.0, Handedness::Left), PalmFacing::Outside);
}

#[test]
fn palm_facing_relative_to_default_head() {
    let head = Head::default();
    let r = Handedness::Right;
    assert_eq!(palm_facing_for(Vec3::NEG_Z, &head, r), PalmFacing::Forward);
    assert_eq!(palm_facing_for(Vec3::Z, &head, r), PalmFacing::Backward);
    assert_eq!(palm_facing_for(Vec3::NEG_Y, &head, r), PalmFacing::Down);
    assert_eq!(palm_facing_for(Vec3::Y, &head, r), PalmFacing::Up);
    assert_eq!(palm_facing_for(Vec3::X, &head, r), PalmFacing::Outside);
    assert_eq!(palm_facing_for(Vec3::NEG_X, &head, r), PalmFacing::Inside);
}

#[test]
fn palm_facing_follows_head_rotation() {
    let mut head = Head::default();
    // head turned to look along -X
    head.update(&Pose::new(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2)));
    assert_eq!(
        palm_facing_for(Vec3::NEG_X, &head, Handedness::Right),
        PalmFacing::Forward
    );
    assert_eq!(
        palm_facing_for(Vec3::NEG_Z, &head, Handedness::Right),
        PalmFacing::Outside
    );
}

#[test]
fn open_hand_points_with_every_finger() {
    for hand in [Handedness::Left, Handedness::Right] {
        let g = track(hand, &HandShape::open(wrist(palm_forward())));
        for name in FingerName::ALL {
            let f = g.finger(name);
            assert!(f.tracked, "{} {}", hand.as_str(), name.as_str());
            assert!(f.pointing, "{} {}", hand.as_str(), name.as_str());
        }
        assert_eq!(g.palm_facing, PalmFacing::Forward);
        assert!(g.thumb_index_distance > 0.05);
    }
}

#[test]
fn fist_does_not_point() {
    let g = track(Handedness::Right, &HandShape::fist(wrist(palm_forward())));
    for name in [FingerName::Index, FingerName::Middle, FingerName::Ring, FingerName::Pinky] {
        assert!(!g.finger(name).pointing, "{}", name.as_str());
    }
}

#[test]
fn pinch_brings_tips_together() {
    let g = track(Handedness::Right, &HandShape::pinching(wrist(palm_forward())));
    assert!(g.thumb_index_distance < 0.05);
    let thumb = g.finger(FingerName::Thumb).tip;
    let index = g.finger(FingerName::Index).tip;
    assert!((thumb - index).length() < 1e-5);
}

#[test]
fn palm_down_is_classified_down() {
    let g = track(Handedness::Left, &HandShape::open(wrist(palm_down())));
    assert_eq!(g.palm_facing, PalmFacing::Down);
}

#[test]
fn missing_joints_keep_previous_values() {
    let mut rig = HandRig::new(Handedness::Right);
    let mut g = GestureTracker::new(Handedness::Right);
    let head = Head::default();
    g.update(&rig.joints(&HandShape::open(wrist(palm_forward()))), &head);
    let before = *g.finger(FingerName::Index);

    g.update(&HandJoints::new(), &head);
    assert_eq!(*g.finger(FingerName::Index), before);
    assert_eq!(g.palm_facing, PalmFacing::Forward);
}

#[test]
fn untracked_tracker_defaults() {
    let g = GestureTracker::new(Handedness::Left);
    assert_eq!(g.handedness(), Handedness::Left);
    assert_eq!(g.palm_facing, PalmFacing::Up);
    assert!(FingerName::ALL.iter().all(|n| !g.finger(*n).tracked));
}

#[test]
fn spread_angle_is_bounded() {
    let g = track(Handedness::Right, &HandShape::open(wrist(palm_forward())));
    assert!(g.thumb_index_angle >= 0.0 && g.thumb_index_angle <= PI);
}
