//! The capability shared by hand-tracked and mechanical inputs.

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::{HAPTIC_DEFAULT_DURATION_MS, HAPTIC_DEFAULT_INTENSITY};
use crate::frame::FrameClock;
use crate::gamepad::HapticPulse;
use crate::head::Head;
use crate::pose::{Handedness, Pose};
use crate::snapshot::InputSnapshot;

/// Cached pose and button state common to every input type.
#[derive(Clone, Debug)]
pub struct ControllerState {
    pub handedness: Handedness,
    pub select: bool,
    pub squeeze: bool,
    pub wrist_world: Pose,
    pub wrist_local: Pose,
    pub pointer_origin: Vec3,
    pub pointer_direction: Vec3,
    has_haptics: bool,
    pending_haptics: SmallVec<[HapticPulse; 2]>,
    last_frame: Option<u64>,
}

impl ControllerState {
    pub fn new(handedness: Handedness) -> Self {
        Self {
            handedness,
            select: false,
            squeeze: false,
            wrist_world: Pose::IDENTITY,
            wrist_local: Pose::IDENTITY,
            pointer_origin: Vec3::ZERO,
            pointer_direction: Vec3::NEG_Z,
            has_haptics: false,
            pending_haptics: SmallVec::new(),
            last_frame: None,
        }
    }

    /// Mark `frame` as refreshed. Returns `false` if it already was.
    pub fn begin_refresh(&mut self, frame: u64) -> bool {
        if self.last_frame == Some(frame) {
            return false;
        }
        self.last_frame = Some(frame);
        true
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.last_frame
    }

    pub fn set_wrist(&mut self, world: Pose, parent: &Pose) {
        self.wrist_world = world;
        self.wrist_local = parent.to_local(&world);
    }

    pub(crate) fn set_has_haptics(&mut self, has_haptics: bool) {
        self.has_haptics = has_haptics;
    }
}

/// Pose and pointer accessors shared by both input variants.
///
/// Implementors provide the refresh logic; everything else reads the cached
/// [`ControllerState`].
pub trait XrController {
    fn state(&self) -> &ControllerState;
    fn state_mut(&mut self) -> &mut ControllerState;

    /// Re-read device data for `clock.frame()`. Calling again within the same
    /// frame does nothing.
    fn refresh(&mut self, clock: &FrameClock, snapshot: &InputSnapshot, head: &Head);

    /// Whether the pointer should currently be drawn / used.
    fn pointer_active(&self) -> bool;

    fn has_hand(&self) -> bool;

    fn handedness(&self) -> Handedness {
        self.state().handedness
    }

    fn wrist_world(&self) -> Pose {
        self.state().wrist_world
    }

    fn wrist_local(&self) -> Pose {
        self.state().wrist_local
    }

    fn pointer_origin(&self) -> Vec3 {
        self.state().pointer_origin
    }

    fn pointer_direction(&self) -> Vec3 {
        self.state().pointer_direction
    }

    fn select(&self) -> bool {
        self.state().select
    }

    fn squeeze(&self) -> bool {
        self.state().squeeze
    }

    /// Queue a vibration if the device reported a haptic actuator.
    fn vibrate(&mut self, intensity: Option<f32>, duration_ms: Option<f32>) {
        let state = self.state_mut();
        if !state.has_haptics {
            return;
        }
        state.pending_haptics.push(HapticPulse {
            intensity: intensity.unwrap_or(HAPTIC_DEFAULT_INTENSITY),
            duration_ms: duration_ms.unwrap_or(HAPTIC_DEFAULT_DURATION_MS),
        });
    }

    /// Pulses queued since the last call, oldest first.
    fn take_haptics(&mut self) -> SmallVec<[HapticPulse; 2]> {
        std::mem::take(&mut self.state_mut().pending_haptics)
    }
}
