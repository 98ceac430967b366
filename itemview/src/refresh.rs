use crate::float::{self, EPSILON};

/// Gates pool refreshes on layout-position travel.
///
/// A refresh is due when none has happened yet, or when the position has moved at least
/// `interval` layout positions since the last one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefreshScheduler {
    interval: f32,
    last: Option<f32>,
}

impl RefreshScheduler {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
    }

    /// The position of the last refresh pass.
    pub fn last(&self) -> Option<f32> {
        self.last
    }

    pub fn is_due(&self, position: f32) -> bool {
        let Some(last) = self.last else {
            return true;
        };
        let travelled = float::abs(position - last);
        if self.interval <= 0.0 {
            travelled > EPSILON
        } else {
            travelled >= self.interval
        }
    }

    /// Records a refresh pass at `position`.
    pub fn mark(&mut self, position: f32) {
        self.last = Some(position);
    }

    /// Forgets the last pass so the next check is due.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
