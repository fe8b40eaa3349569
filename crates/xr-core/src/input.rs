//! Input dispatcher: owns the head, one input slot per hand and the debug
//! pointer beams, and drives them once per frame.

use glam::Vec3;
use smallvec::SmallVec;

use crate::config::TrackingParams;
use crate::constants::{
    POINTER_ACTIVE_COLOR, POINTER_PRESSED_COLOR, SELECT_PULSE_DURATION_MS, SELECT_PULSE_INTENSITY,
};
use crate::controller::{ControllerState, XrController};
use crate::frame::FrameClock;
use crate::gamepad::HapticPulse;
use crate::hand::HandControllerInput;
use crate::head::Head;
use crate::mechanical::MechanicalControllerInput;
use crate::pointer::PointerBeam;
use crate::pose::{Handedness, Pose};
use crate::snapshot::{InputFrame, InputSnapshot};

/// Capabilities reported by the device when an input source connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectInfo {
    pub handedness: Option<Handedness>,
    pub has_hand: bool,
    pub has_gamepad: bool,
    pub has_grip: bool,
}

impl ConnectInfo {
    pub fn describe(&self) -> String {
        let mark = |b: bool| if b { "✔" } else { "❌" };
        format!(
            "{} gamepad{} grip{} hand{}",
            self.handedness.map(|h| h.as_str()).unwrap_or("none"),
            mark(self.has_gamepad),
            mark(self.has_grip),
            mark(self.has_hand)
        )
    }
}

/// Device events, delivered to [`XrInput::handle_event`] in the order they occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Connected(ConnectInfo),
    Disconnected(Handedness),
    SelectStart(Handedness),
    SelectEnd(Handedness),
    SqueezeStart(Handedness),
    SqueezeEnd(Handedness),
}

/// A connected input, either a tracked hand or a mechanical controller.
#[derive(Clone, Debug)]
pub enum InputHandler {
    Hand(HandControllerInput),
    Mechanical(MechanicalControllerInput),
}

impl InputHandler {
    pub fn for_connect(hand: Handedness, info: &ConnectInfo, params: &TrackingParams) -> Self {
        if info.has_hand {
            Self::Hand(HandControllerInput::new(hand, params.clone()))
        } else {
            Self::Mechanical(MechanicalControllerInput::new(hand))
        }
    }

    pub fn as_hand(&self) -> Option<&HandControllerInput> {
        match self {
            Self::Hand(h) => Some(h),
            Self::Mechanical(_) => None,
        }
    }

    pub fn as_mechanical(&self) -> Option<&MechanicalControllerInput> {
        match self {
            Self::Hand(_) => None,
            Self::Mechanical(m) => Some(m),
        }
    }

    fn controller(&self) -> &dyn XrController {
        match self {
            Self::Hand(h) => h,
            Self::Mechanical(m) => m,
        }
    }

    fn controller_mut(&mut self) -> &mut dyn XrController {
        match self {
            Self::Hand(h) => h,
            Self::Mechanical(m) => m,
        }
    }
}

impl XrController for InputHandler {
    fn state(&self) -> &ControllerState {
        self.controller().state()
    }

    fn state_mut(&mut self) -> &mut ControllerState {
        self.controller_mut().state_mut()
    }

    fn refresh(&mut self, clock: &FrameClock, snapshot: &InputSnapshot, head: &Head) {
        self.controller_mut().refresh(clock, snapshot, head)
    }

    fn pointer_active(&self) -> bool {
        self.controller().pointer_active()
    }

    fn has_hand(&self) -> bool {
        self.controller().has_hand()
    }
}

/// Debug axes that follow a handler's wrist while it is connected.
#[derive(Clone, Copy, Debug, Default)]
pub struct WristAxis {
    pub pose: Pose,
    pub attached: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Disconnected,
    Connected,
    Active,
}

/// Lifecycle of one hand's input.
#[derive(Clone, Debug, Default)]
pub enum InputSlot {
    #[default]
    Disconnected,
    /// Handler created, not yet refreshed.
    Connected(InputHandler),
    /// Refreshed at least once.
    Active(InputHandler),
}

impl InputSlot {
    pub fn state(&self) -> SlotState {
        match self {
            Self::Disconnected => SlotState::Disconnected,
            Self::Connected(_) => SlotState::Connected,
            Self::Active(_) => SlotState::Active,
        }
    }

    pub fn handler(&self) -> Option<&InputHandler> {
        match self {
            Self::Disconnected => None,
            Self::Connected(h) | Self::Active(h) => Some(h),
        }
    }

    pub fn handler_mut(&mut self) -> Option<&mut InputHandler> {
        match self {
            Self::Disconnected => None,
            Self::Connected(h) | Self::Active(h) => Some(h),
        }
    }

    fn activate(&mut self) {
        if matches!(self, Self::Connected(_)) {
            if let Self::Connected(h) = std::mem::take(self) {
                *self = Self::Active(h);
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
struct HandSide {
    slot: InputSlot,
    wrist_axis: WristAxis,
    pointer: PointerBeam,
}

/// Creates per-hand handlers as devices connect and refreshes them each frame.
#[derive(Clone, Debug)]
pub struct XrInput {
    params: TrackingParams,
    head: Head,
    left: HandSide,
    right: HandSide,
}

impl Default for XrInput {
    fn default() -> Self {
        Self::new(TrackingParams::default())
    }
}

impl XrInput {
    pub fn new(params: TrackingParams) -> Self {
        Self {
            params,
            head: Head::default(),
            left: HandSide::default(),
            right: HandSide::default(),
        }
    }

    fn side(&self, hand: Handedness) -> &HandSide {
        match hand {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    fn side_mut(&mut self, hand: Handedness) -> &mut HandSide {
        match hand {
            Handedness::Left => &mut self.left,
            Handedness::Right => &mut self.right,
        }
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn params(&self) -> &TrackingParams {
        &self.params
    }

    pub fn handler(&self, hand: Handedness) -> Option<&InputHandler> {
        self.side(hand).slot.handler()
    }

    pub fn handler_mut(&mut self, hand: Handedness) -> Option<&mut InputHandler> {
        self.side_mut(hand).slot.handler_mut()
    }

    pub fn slot_state(&self, hand: Handedness) -> SlotState {
        self.side(hand).slot.state()
    }

    pub fn pointer(&self, hand: Handedness) -> &PointerBeam {
        &self.side(hand).pointer
    }

    pub fn wrist_axis(&self, hand: Handedness) -> &WristAxis {
        &self.side(hand).wrist_axis
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Connected(info) => self.on_connect(&info),
            InputEvent::Disconnected(hand) => self.on_disconnect(hand),
            InputEvent::SelectStart(hand) => self.set_select(hand, true),
            InputEvent::SelectEnd(hand) => self.set_select(hand, false),
            InputEvent::SqueezeStart(hand) => self.set_squeeze(hand, true),
            InputEvent::SqueezeEnd(hand) => self.set_squeeze(hand, false),
        }
    }

    pub fn handle_events(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for ev in events {
            self.handle_event(ev);
        }
    }

    pub fn on_connect(&mut self, info: &ConnectInfo) {
        log::info!("[input] connected {}", info.describe());
        let Some(hand) = info.handedness else {
            log::debug!("[input] ignoring input source without handedness");
            return;
        };
        let handler = InputHandler::for_connect(hand, info, &self.params);
        let side = self.side_mut(hand);
        if side.slot.handler().is_some() {
            log::warn!("[input] {} connected twice; replacing handler", hand.as_str());
        }
        side.slot = InputSlot::Connected(handler);
        side.wrist_axis.attached = true;
    }

    pub fn on_disconnect(&mut self, hand: Handedness) {
        let side = self.side_mut(hand);
        if side.slot.handler().is_none() {
            log::debug!("[input] {} disconnected while not connected", hand.as_str());
        } else {
            log::info!("[input] disconnected {}", hand.as_str());
        }
        side.wrist_axis.attached = false;
        side.slot = InputSlot::Disconnected;
    }

    pub fn set_select(&mut self, hand: Handedness, pressed: bool) {
        if let Some(h) = self.handler_mut(hand) {
            h.state_mut().select = pressed;
            if pressed {
                h.vibrate(Some(SELECT_PULSE_INTENSITY), Some(SELECT_PULSE_DURATION_MS));
            }
        }
    }

    pub fn set_squeeze(&mut self, hand: Handedness, pressed: bool) {
        if let Some(h) = self.handler_mut(hand) {
            h.state_mut().squeeze = pressed;
        }
    }

    /// Called once per rendered frame after any queued events were handled.
    pub fn on_animate(&mut self, clock: &FrameClock, frame: &InputFrame) {
        self.head.update(&frame.head);
        let head = self.head;
        let length = self.params.pointer_length;
        for hand in [Handedness::Left, Handedness::Right] {
            let snapshot = frame.hand(hand);
            let side = self.side_mut(hand);
            if let Some(h) = side.slot.handler_mut() {
                h.refresh(clock, snapshot, &head);
            }
            side.slot.activate();
            if let Some(h) = side.slot.handler() {
                side.wrist_axis.pose = h.wrist_world();
            }
            update_debug_pointer(&mut side.pointer, side.slot.handler(), length);
        }
    }

    /// Haptic pulses queued by either hand since the last call.
    pub fn take_haptics(&mut self) -> SmallVec<[(Handedness, HapticPulse); 2]> {
        let mut out = SmallVec::new();
        for hand in [Handedness::Left, Handedness::Right] {
            if let Some(h) = self.handler_mut(hand) {
                out.extend(h.take_haptics().into_iter().map(|p| (hand, p)));
            }
        }
        out
    }

    /// Pointer ray of `hand`, when it is connected and active.
    pub fn active_ray(&self, hand: Handedness) -> Option<(Vec3, Vec3)> {
        self.handler(hand)
            .filter(|h| h.pointer_active())
            .map(|h| (h.pointer_origin(), h.pointer_direction()))
    }
}

fn update_debug_pointer(pointer: &mut PointerBeam, handler: Option<&InputHandler>, length: f32) {
    let Some(h) = handler.filter(|h| h.pointer_active()) else {
        pointer.visible = false;
        return;
    };
    pointer.visible = true;
    pointer.color = if h.select() {
        POINTER_PRESSED_COLOR
    } else {
        POINTER_ACTIVE_COLOR
    };
    pointer.set_from_dir(h.pointer_origin(), h.pointer_direction(), Some(length));
}
