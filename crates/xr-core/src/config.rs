use crate::constants::{
    DAMPER_PERIOD_SEC, PINCH_DISTANCE, POINTER_DEFAULT_LENGTH, SHOULDER_OFFSET_DIVISOR,
};

/// Runtime-tunable thresholds for the hand-tracked pointer.
#[derive(Clone, Debug)]
pub struct TrackingParams {
    /// Smoothing window for pointer origin and direction, seconds.
    pub damper_period_sec: f32,
    /// Thumb/index tip distance below which the hand counts as pinching.
    pub pinch_distance: f32,
    /// Head height divided by this gives the neck/shoulder offsets.
    pub shoulder_offset_divisor: f32,
    /// Length of the debug pointer beam.
    pub pointer_length: f32,
}

impl Default for TrackingParams {
    fn default() -> Self {
        Self {
            damper_period_sec: DAMPER_PERIOD_SEC,
            pinch_distance: PINCH_DISTANCE,
            shoulder_offset_divisor: SHOULDER_OFFSET_DIVISOR,
            pointer_length: POINTER_DEFAULT_LENGTH,
        }
    }
}
