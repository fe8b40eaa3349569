//! Time-windowed moving average used to steady hand-tracked pointers.

use glam::Vec3;
use std::collections::VecDeque;
use thiserror::Error;

use crate::constants::DAMPER_PERIOD_SEC;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DamperError {
    #[error("sample time {got:.4}s is earlier than newest sample {newest:.4}s")]
    TimeWentBackwards { newest: f32, got: f32 },
    #[error("sample time is not finite")]
    NonFiniteTime,
}

#[derive(Clone, Copy, Debug)]
struct Sample {
    time: f32,
    value: Vec3,
}

/// Average of the vector samples received over the trailing `period` seconds.
///
/// Samples may arrive at any rate; the window is defined by time, not count.
/// A running total is kept so each insertion only touches the samples that
/// expire, never the whole window.
#[derive(Clone, Debug)]
pub struct Vec3Damper {
    period: f32,
    samples: VecDeque<Sample>,
    total: Vec3,
    average: Vec3,
}

impl Default for Vec3Damper {
    fn default() -> Self {
        Self::new(DAMPER_PERIOD_SEC)
    }
}

impl Vec3Damper {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            samples: VecDeque::new(),
            total: Vec3::ZERO,
            average: Vec3::ZERO,
        }
    }

    /// Add a sample taken at `time` (elapsed seconds) and return the damped value.
    ///
    /// Times must be non-decreasing. An earlier time is rejected and leaves the
    /// window untouched.
    pub fn add(&mut self, time: f32, sample: Vec3) -> Result<Vec3, DamperError> {
        if !time.is_finite() {
            return Err(DamperError::NonFiniteTime);
        }
        if let Some(newest) = self.samples.back() {
            if time < newest.time {
                return Err(DamperError::TimeWentBackwards {
                    newest: newest.time,
                    got: time,
                });
            }
        }

        let remove_before = time - self.period;
        while let Some(oldest) = self.samples.front() {
            if oldest.time >= remove_before {
                break;
            }
            self.total -= oldest.value;
            self.samples.pop_front();
        }
        if self.samples.is_empty() {
            // drop accumulated rounding error once the window has fully expired
            self.total = Vec3::ZERO;
        }

        self.total += sample;
        self.samples.push_back(Sample {
            time,
            value: sample,
        });
        self.average = self.total / self.samples.len() as f32;
        Ok(self.average)
    }

    /// Damped value as of the last successful `add`.
    #[inline]
    pub fn average(&self) -> Vec3 {
        self.average
    }

    #[inline]
    pub fn period(&self) -> f32 {
        self.period
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.total = Vec3::ZERO;
        self.average = Vec3::ZERO;
    }
}
