// Host-side tests for the per-hand input lifecycle and event handling.

use glam::Vec3;
use xr_core::constants::{POINTER_ACTIVE_COLOR, POINTER_PRESSED_COLOR};
use xr_core::sim::{gamepad, Scenario};
use xr_core::{
    ConnectInfo, FrameClock, Handedness, HapticPulse, InputEvent, InputFrame, InputSnapshot,
    Pose, SlotState, XrController, XrInput,
};

fn controller(hand: Handedness) -> InputEvent {
    InputEvent::Connected(ConnectInfo {
        handedness: Some(hand),
        has_hand: false,
        has_gamepad: true,
        has_grip: true,
    })
}

fn tracked_hand(hand: Handedness) -> InputEvent {
    InputEvent::Connected(ConnectInfo {
        handedness: Some(hand),
        has_hand: true,
        has_gamepad: false,
        has_grip: true,
    })
}

fn grip_frame(left: Vec3, right: Vec3) -> InputFrame {
    let snap = |p: Vec3| InputSnapshot {
        grip: Some(Pose::from_position(p)),
        gamepad: Some(gamepad(&[], 6, &[])),
        ..Default::default()
    };
    InputFrame {
        head: Pose::from_position(Vec3::new(0.0, 1.6, 0.0)),
        left: snap(left),
        right: snap(right),
    }
}

fn animate(input: &mut XrInput, clock: &mut FrameClock, t: f32, frame: &InputFrame) {
    clock.tick(t);
    input.on_animate(clock, frame);
}

#[test]
fn slot_goes_connected_then_active() {
    let mut input = XrInput::default();
    let mut clock = FrameClock::new();
    assert_eq!(input.slot_state(Handedness::Left), SlotState::Disconnected);

    input.handle_event(controller(Handedness::Left));
    assert_eq!(input.slot_state(Handedness::Left), SlotState::Connected);
    assert!(input.wrist_axis(Handedness::Left).attached);

    animate(&mut input, &mut clock, 0.0, &InputFrame::default());
    assert_eq!(input.slot_state(Handedness::Left), SlotState::Active);
    assert_eq!(input.slot_state(Handedness::Right), SlotState::Disconnected);
}

#[test]
fn handler_kind_follows_connect_info() {
    let mut input = XrInput::default();
    input.handle_events([controller(Handedness::Left), tracked_hand(Handedness::Right)]);
    let left = input.handler(Handedness::Left).map(|h| h.has_hand());
    let right = input.handler(Handedness::Right).map(|h| h.has_hand());
    assert_eq!(left, Some(false));
    assert_eq!(right, Some(true));
    assert!(input.handler(Handedness::Left).and_then(|h| h.as_mechanical()).is_some());
    assert!(input.handler(Handedness::Right).and_then(|h| h.as_hand()).is_some());
}

#[test]
fn sources_without_handedness_are_ignored() {
    let mut input = XrInput::default();
    input.handle_event(InputEvent::Connected(ConnectInfo {
        handedness: None,
        has_hand: false,
        has_gamepad: false,
        has_grip: false,
    }));
    assert_eq!(input.slot_state(Handedness::Left), SlotState::Disconnected);
    assert_eq!(input.slot_state(Handedness::Right), SlotState::Disconnected);
}

#[test]
fn disconnect_hides_pointer_and_detaches_wrist_axis() {
    let mut input = XrInput::default();
    let mut clock = FrameClock::new();
    input.handle_event(controller(Handedness::Right));
    let frame = grip_frame(Vec3::ZERO, Vec3::new(0.2, 1.2, -0.3));
    animate(&mut input, &mut clock, 0.0, &frame);
    assert!(input.pointer(Handedness::Right).visible);

    input.handle_event(InputEvent::Disconnected(Handedness::Right));
    animate(&mut input, &mut clock, 0.016, &frame);
    assert_eq!(input.slot_state(Handedness::Right), SlotState::Disconnected);
    assert!(!input.pointer(Handedness::Right).visible);
    assert!(!input.wrist_axis(Handedness::Right).attached);
    assert!(input.active_ray(Handedness::Right).is_none());
}

#[test]
fn disconnecting_an_empty_slot_is_harmless() {
    let mut input = XrInput::default();
    input.handle_event(InputEvent::Disconnected(Handedness::Left));
    input.handle_event(InputEvent::SelectStart(Handedness::Left));
    assert_eq!(input.slot_state(Handedness::Left), SlotState::Disconnected);
}

#[test]
fn beam_turns_yellow_while_selecting() {
    let mut input = XrInput::default();
    let mut clock = FrameClock::new();
    input.handle_event(controller(Handedness::Left));
    let frame = grip_frame(Vec3::new(-0.2, 1.2, -0.3), Vec3::ZERO);

    animate(&mut input, &mut clock, 0.0, &frame);
    assert_eq!(input.pointer(Handedness::Left).color, POINTER_ACTIVE_COLOR);

    input.handle_event(InputEvent::SelectStart(Handedness::Left));
    animate(&mut input, &mut clock, 0.016, &frame);
    assert_eq!(input.pointer(Handedness::Left).color, POINTER_PRESSED_COLOR);

    input.handle_event(InputEvent::SelectEnd(Handedness::Left));
    animate(&mut input, &mut clock, 0.032, &frame);
    assert_eq!(input.pointer(Handedness::Left).color, POINTER_ACTIVE_COLOR);
}

#[test]
fn beam_runs_from_pointer_origin() {
    let mut input = XrInput::default();
    let mut clock = FrameClock::new();
    input.handle_event(controller(Handedness::Right));
    let grip = Vec3::new(0.2, 1.2, -0.3);
    animate(&mut input, &mut clock, 0.0, &grip_frame(Vec3::ZERO, grip));

    let beam = input.pointer(Handedness::Right);
    assert_eq!(beam.origin(), grip);
    assert!((beam.length() - input.params().pointer_length).abs() < 1e-5);

    let (origin, dir) = input.active_ray(Handedness::Right).unwrap();
    assert_eq!(origin, grip);
    assert!((dir.length() - 1.0).abs() < 1e-5);
}

#[test]
fn select_pulses_once_the_device_reported_haptics() {
    let mut input = XrInput::default();
    let mut clock = FrameClock::new();
    input.handle_event(controller(Handedness::Right));

    // capabilities are unknown until the first refresh
    input.handle_event(InputEvent::SelectStart(Handedness::Right));
    assert!(input.take_haptics().is_empty());
    input.handle_event(InputEvent::SelectEnd(Handedness::Right));

    animate(&mut input, &mut clock, 0.0, &grip_frame(Vec3::ZERO, Vec3::ZERO));
    input.handle_event(InputEvent::SelectStart(Handedness::Right));
    let pulses = input.take_haptics();
    assert_eq!(
        pulses.as_slice(),
        &[(
            Handedness::Right,
            HapticPulse {
                intensity: 0.5,
                duration_ms: 30.0
            }
        )]
    );
    assert!(input.take_haptics().is_empty());
}

#[test]
fn squeeze_is_tracked() {
    let mut input = XrInput::default();
    input.handle_event(controller(Handedness::Left));
    input.handle_event(InputEvent::SqueezeStart(Handedness::Left));
    assert_eq!(input.handler(Handedness::Left).map(|h| h.squeeze()), Some(true));
    input.handle_event(InputEvent::SqueezeEnd(Handedness::Left));
    assert_eq!(input.handler(Handedness::Left).map(|h| h.squeeze()), Some(false));
}

#[test]
fn events_apply_in_order() {
    let mut input = XrInput::default();
    // a swap arrives as disconnect then connect within one frame
    input.handle_events([
        controller(Handedness::Right),
        InputEvent::Disconnected(Handedness::Right),
        tracked_hand(Handedness::Right),
    ]);
    assert_eq!(
        input.handler(Handedness::Right).map(|h| h.has_hand()),
        Some(true)
    );

    input.handle_events([
        InputEvent::Disconnected(Handedness::Right),
        controller(Handedness::Right),
    ]);
    assert_eq!(
        input.handler(Handedness::Right).map(|h| h.has_hand()),
        Some(false)
    );
}

#[test]
fn reconnect_replaces_the_handler() {
    let mut input = XrInput::default();
    let mut clock = FrameClock::new();
    input.handle_event(controller(Handedness::Left));
    animate(&mut input, &mut clock, 0.0, &InputFrame::default());
    input.handle_event(tracked_hand(Handedness::Left));
    assert_eq!(input.slot_state(Handedness::Left), SlotState::Connected);
    assert_eq!(input.handler(Handedness::Left).map(|h| h.has_hand()), Some(true));
}

#[test]
fn wrist_axis_follows_the_wrist() {
    let mut input = XrInput::default();
    let mut clock = FrameClock::new();
    input.handle_event(controller(Handedness::Right));
    animate(
        &mut input,
        &mut clock,
        0.0,
        &grip_frame(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)),
    );
    let wrist = input.handler(Handedness::Right).map(|h| h.wrist_world());
    assert_eq!(Some(input.wrist_axis(Handedness::Right).pose), wrist);
    let position = input.wrist_axis(Handedness::Right).pose.position;
    assert!((position - Vec3::new(1.02, 1.0, 1.09)).length() < 1e-5);
}

#[test]
fn head_tracks_the_viewer() {
    let mut input = XrInput::default();
    let mut clock = FrameClock::new();
    animate(&mut input, &mut clock, 0.0, &grip_frame(Vec3::ZERO, Vec3::ZERO));
    assert_eq!(input.head().position, Vec3::new(0.0, 1.6, 0.0));
}

#[test]
fn scripted_hand_pinches_into_an_active_ray() {
    let mut input = XrInput::default();
    let mut clock = FrameClock::new();
    let mut scenario = Scenario::new(7);
    input.handle_events([controller(Handedness::Left), tracked_hand(Handedness::Right)]);

    let mut seen_active = false;
    let mut seen_idle = false;
    for i in 0..300 {
        let t = i as f32 / 60.0;
        animate(&mut input, &mut clock, t, &scenario.frame_at(t));
        match input.active_ray(Handedness::Right) {
            Some(_) => seen_active = true,
            None => seen_idle = true,
        }
        assert!(input.active_ray(Handedness::Left).is_some());
    }
    assert!(seen_active && seen_idle);
}
